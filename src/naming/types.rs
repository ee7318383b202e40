//! Domains and per-language type names.

use crate::config::NamingConfig;
use crate::model::{DomainId, PropertyId, PropertyKind};
use crate::store::ModelStore;

use super::{MAX_CHAIN_DEPTH, property_name};

/// The property whose domain gives the primitive type: aliases are
/// followed to their target, associations to the target key.
///
/// Compositions are their own leaf. Returns `None` on a broken chain.
pub fn leaf_property(store: &ModelStore, id: PropertyId) -> Option<PropertyId> {
    let mut current = id;
    for _ in 0..=MAX_CHAIN_DEPTH {
        let property = store.property(current)?;
        current = match &property.kind {
            PropertyKind::Regular(_) | PropertyKind::Composition(_) => return Some(current),
            PropertyKind::Alias(alias) => alias.property.as_ref()?.target()?,
            PropertyKind::Association(association) => match association.property.as_ref() {
                Some(reference) => reference.target()?,
                None => store.single_primary_key(association.association.target()?)?.id,
            },
        };
    }
    None
}

/// Domain of a property before its own `as` is applied.
pub fn base_domain(store: &ModelStore, id: PropertyId) -> Option<DomainId> {
    base_domain_at(store, id, 0)
}

/// Domain of a property, `as` included.
pub fn effective_domain(store: &ModelStore, id: PropertyId) -> Option<DomainId> {
    effective_domain_at(store, id, 0)
}

fn base_domain_at(store: &ModelStore, id: PropertyId, depth: usize) -> Option<DomainId> {
    if depth > MAX_CHAIN_DEPTH {
        return None;
    }
    let property = store.property(id)?;
    match &property.kind {
        PropertyKind::Regular(p) => p.domain.target(),
        PropertyKind::Composition(p) => p.domain.as_ref()?.target(),
        PropertyKind::Association(p) => {
            let key = match p.property.as_ref() {
                Some(reference) => reference.target()?,
                None => store.single_primary_key(p.association.target()?)?.id,
            };
            effective_domain_at(store, key, depth + 1)
        }
        PropertyKind::Alias(p) => effective_domain_at(store, p.property.as_ref()?.target()?, depth + 1),
    }
}

fn effective_domain_at(store: &ModelStore, id: PropertyId, depth: usize) -> Option<DomainId> {
    let base = base_domain_at(store, id, depth)?;
    let as_name = match &store.property(id)?.kind {
        PropertyKind::Association(p) => p.as_domain.as_ref(),
        PropertyKind::Alias(p) => p.as_domain.as_ref(),
        _ => None,
    };
    match as_name {
        Some(as_name) => store.domain(base)?.as_domains.get(as_name.as_str())?.target(),
        None => Some(base),
    }
}

/// Generated key type of an enum-like reference class (`TypeProfilCode`).
///
/// Applies to the primary key of a reference class with static values,
/// unless the key is generated by the database.
pub fn enum_type_name(store: &ModelStore, naming: &NamingConfig, id: PropertyId) -> Option<String> {
    let property = store.property(id)?;
    let class = store.class(id.owner.class()?)?;
    let regular = property.as_regular()?;
    if !regular.primary_key || !class.is_enum() {
        return None;
    }
    let domain = store.domain(regular.domain.target()?)?;
    if domain.auto_generated_value {
        return None;
    }
    Some(format!("{}{}", class.name(), property_name(store, naming, id)))
}

/// Type of a property in a target language.
///
/// The leaf domain gives the inner type (or the enum key type of a
/// reference class). When `as` switches to another domain, that domain's
/// type wraps it through its `{T}` placeholder. Compositions use the
/// composed class name, wrapped by their domain if they have one.
pub fn type_name(
    store: &ModelStore,
    naming: &NamingConfig,
    id: PropertyId,
    language: &str,
) -> Option<String> {
    let property = store.property(id)?;
    if let PropertyKind::Composition(composition) = &property.kind {
        let class = store.class(composition.composition.target()?)?;
        let wrapper = composition
            .domain
            .as_ref()
            .and_then(|d| d.target())
            .and_then(|d| store.domain(d))
            .and_then(|d| d.type_name(language));
        return Some(match wrapper {
            Some(wrapper) => wrapper.replace("{T}", class.name()),
            None => class.name().to_string(),
        });
    }

    let leaf = leaf_property(store, id)?;
    let leaf_domain = base_domain(store, leaf)?;
    let inner = match enum_type_name(store, naming, leaf) {
        Some(name) => name,
        None => store.domain(leaf_domain)?.type_name(language)?.to_string(),
    };

    let effective = effective_domain(store, id)?;
    if effective == leaf_domain {
        return Some(inner);
    }
    let outer = store.domain(effective)?.type_name(language)?;
    Some(outer.replace("{T}", &inner))
}

/// Endpoint parameters sent in the request body: compositions and
/// properties of a `bodyParam` domain.
pub fn is_body_param(store: &ModelStore, id: PropertyId) -> bool {
    let Some(property) = store.property(id) else {
        return false;
    };
    if matches!(property.kind, PropertyKind::Composition(_)) {
        return true;
    }
    effective_domain(store, id)
        .and_then(|d| store.domain(d))
        .is_some_and(|d| d.body_param)
}
