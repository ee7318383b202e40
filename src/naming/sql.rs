use crate::base::case::to_constant_case;
use crate::config::NamingConfig;
use crate::model::{ClassId, PropertyId, PropertyKind};
use crate::store::ModelStore;

use super::{MAX_CHAIN_DEPTH, property_name};

/// Column name of a property.
///
/// `host` is the class whose trigram prefixes the column, defaulting to the
/// property's owner. Associations take the column of the target key,
/// followed by the role.
pub fn sql_name(store: &ModelStore, naming: &NamingConfig, id: PropertyId, host: Option<ClassId>) -> String {
    sql_name_at(store, naming, id, host, 0)
}

fn sql_name_at(
    store: &ModelStore,
    naming: &NamingConfig,
    id: PropertyId,
    host: Option<ClassId>,
    depth: usize,
) -> String {
    let Some(property) = store.property(id) else {
        return String::new();
    };
    let host = host.or(id.owner.class());
    if depth > MAX_CHAIN_DEPTH {
        return to_constant_case(&property_name(store, naming, id));
    }

    match &property.kind {
        PropertyKind::Regular(regular) => {
            let mut name = regular.name.value.as_str();
            if regular.primary_key {
                name = strip_owner_prefix(store, id, name);
            }
            with_trigram(store, host, to_constant_case(name))
        }
        PropertyKind::Composition(composition) => to_constant_case(&composition.name.value),
        PropertyKind::Association(association) => {
            let Some(target) = association.association.target() else {
                return to_constant_case(&property_name(store, naming, id));
            };
            let key = match association.property.as_ref() {
                Some(reference) => reference.target(),
                None => store.single_primary_key(target).map(|p| p.id),
            };
            let Some(key) = key else {
                return to_constant_case(&property_name(store, naming, id));
            };

            let mut name = match association.trigram.as_deref() {
                Some(trigram) => format!(
                    "{}_{}",
                    trigram.to_uppercase(),
                    to_constant_case(&property_name(store, naming, key))
                ),
                None => sql_name_at(store, naming, key, Some(target), depth + 1),
            };
            if let Some(role) = association.role.as_deref() {
                name.push('_');
                name.push_str(&to_constant_case(role));
            }
            name
        }
        PropertyKind::Alias(alias) => {
            let renamed = alias.name.is_some() || alias.prefix.is_some() || alias.suffix.is_some();
            match alias.property.as_ref().and_then(|r| r.target()) {
                Some(target) if !renamed => sql_name_at(store, naming, target, None, depth + 1),
                _ => with_trigram(store, host, to_constant_case(&property_name(store, naming, id))),
            }
        }
    }
}

/// `UtilisateurId` on `Utilisateur extends Personne` becomes `Id`.
fn strip_owner_prefix<'a>(store: &ModelStore, id: PropertyId, name: &'a str) -> &'a str {
    let Some(class) = id.owner.class() else {
        return name;
    };
    let Some(parent) = store.parent(class) else {
        return name;
    };
    [class, parent]
        .iter()
        .filter_map(|c| store.class(*c))
        .find_map(|c| {
            name.strip_prefix(c.name())
                .filter(|rest| !rest.is_empty())
        })
        .unwrap_or(name)
}

fn with_trigram(store: &ModelStore, host: Option<ClassId>, name: String) -> String {
    match host.and_then(|c| store.class(c)).and_then(|c| c.trigram()) {
        Some(trigram) => format!("{}_{name}", trigram.to_uppercase()),
        None => name,
    }
}
