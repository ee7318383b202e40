use crate::base::case::lower_first;
use crate::config::NamingConfig;
use crate::model::{AliasAffix, PropertyId, PropertyKind, PropertyOwner};
use crate::store::ModelStore;

use super::MAX_CHAIN_DEPTH;

/// Name of a property, derived when not written in the source.
///
/// - associations: `{Target}{Pk}{Role}`, or `{Role}{Pk}` with legacy role
///   names, plus `List` for to-many associations. The target name is not
///   repeated when the key already starts with it.
/// - aliases: `{prefix}{target name}{suffix}`.
///
/// Returns `None` while the name depends on an unresolved reference.
pub fn try_property_name(store: &ModelStore, naming: &NamingConfig, id: PropertyId) -> Option<String> {
    derived_name(store, naming, id, 0)
}

fn derived_name(
    store: &ModelStore,
    naming: &NamingConfig,
    id: PropertyId,
    depth: usize,
) -> Option<String> {
    if depth > MAX_CHAIN_DEPTH {
        return None;
    }
    let property = store.property(id)?;
    if let Some(name) = property.declared_name() {
        return Some(name.value.clone());
    }

    match &property.kind {
        PropertyKind::Regular(_) | PropertyKind::Composition(_) => None,
        PropertyKind::Association(association) => {
            let target_id = association.association.target()?;
            let target = store.class(target_id)?;
            let key = match association.property.as_ref() {
                Some(reference) => reference.target()?,
                None => store.single_primary_key(target_id)?.id,
            };
            let key_name = derived_name(store, naming, key, depth + 1)?;
            let role = association.role.as_deref().unwrap_or_default();

            let mut name = match (naming.use_legacy_role_names, role.is_empty()) {
                (true, false) => format!("{role}{key_name}"),
                _ => {
                    let base = if key_name.starts_with(target.name()) {
                        key_name
                    } else {
                        format!("{}{}", target.name(), key_name)
                    };
                    format!("{base}{role}")
                }
            };
            if association.association_type.is_to_many() {
                name.push_str("List");
            }
            Some(name)
        }
        PropertyKind::Alias(alias) => {
            let target = alias.property.as_ref()?.target()?;
            let base = derived_name(store, naming, target, depth + 1)?;
            let class_name = alias
                .class
                .target()
                .and_then(|c| store.class(c))
                .map(|c| c.name().to_string())
                .unwrap_or_default();
            let affix = |affix: &Option<AliasAffix>| match affix {
                Some(AliasAffix::ClassName) => class_name.clone(),
                Some(AliasAffix::Literal(text)) => text.clone(),
                None => String::new(),
            };
            Some(format!("{}{}{}", affix(&alias.prefix), base, affix(&alias.suffix)))
        }
    }
}

/// [`try_property_name`], or an empty name when it cannot be derived.
pub fn property_name(store: &ModelStore, naming: &NamingConfig, id: PropertyId) -> String {
    try_property_name(store, naming, id).unwrap_or_default()
}

/// Java field name (`camelCase`).
pub fn java_name(store: &ModelStore, naming: &NamingConfig, id: PropertyId) -> String {
    lower_first(&property_name(store, naming, id))
}

/// TypeScript field name: `camelCase`, unless the owning endpoint keeps
/// property casing.
pub fn ts_name(store: &ModelStore, naming: &NamingConfig, id: PropertyId) -> String {
    let name = property_name(store, naming, id);
    let preserve = match id.owner {
        PropertyOwner::EndpointParam(endpoint) | PropertyOwner::EndpointReturn(endpoint) => store
            .endpoint(endpoint)
            .is_some_and(|e| e.preserve_property_casing),
        _ => false,
    };
    if preserve { name } else { lower_first(&name) }
}
