//! Labels and translation resource keys.

use crate::base::case::lower_first;
use crate::config::NamingConfig;
use crate::model::{ClassId, Namespace, PropertyId, PropertyKind};
use crate::store::ModelStore;

use super::{MAX_CHAIN_DEPTH, owner_info, property_name};

fn module_key(namespace: &Namespace) -> String {
    namespace
        .module_segments()
        .map(lower_first)
        .collect::<Vec<_>>()
        .join(".")
}

fn join_key(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(".")
}

/// `securite.utilisateur.profil` for class `Profil` of module
/// `Securite.Utilisateur`.
pub fn class_resource_key(store: &ModelStore, class: ClassId) -> Option<String> {
    let class = store.class(class)?;
    Some(join_key(&[
        &module_key(&class.namespace),
        &lower_first(class.name()),
    ]))
}

/// Key of a static value: `{module}.{class}.values.{value}`.
pub fn value_resource_key(store: &ModelStore, class: ClassId, value: usize) -> Option<String> {
    let class_key = class_resource_key(store, class)?;
    let value = store.class(class)?.values.get(value)?;
    Some(format!("{class_key}.values.{}", value.name.value))
}

/// Translation key of a property: `{module}.{owner}.{property}`.
///
/// An alias without its own label shares its target's key.
pub fn resource_key(store: &ModelStore, naming: &NamingConfig, id: PropertyId) -> Option<String> {
    let mut current = id;
    for _ in 0..=MAX_CHAIN_DEPTH {
        let property = store.property(current)?;
        match &property.kind {
            PropertyKind::Alias(alias) if alias.label.is_none() => {
                current = alias.property.as_ref()?.target()?;
            }
            _ => {
                let (owner, namespace) = owner_info(store, current)?;
                return Some(join_key(&[
                    &module_key(namespace),
                    &lower_first(owner),
                    &lower_first(&property_name(store, naming, current)),
                ]));
            }
        }
    }
    None
}

/// Display label of a property.
///
/// Falls back to the aliased property's label, the associated class's
/// label, then the property name.
pub fn label(store: &ModelStore, naming: &NamingConfig, id: PropertyId) -> String {
    let mut current = id;
    for _ in 0..=MAX_CHAIN_DEPTH {
        let Some(property) = store.property(current) else {
            break;
        };
        if let Some(label) = property.label() {
            return label.to_string();
        }
        match &property.kind {
            PropertyKind::Alias(alias) => match alias.property.as_ref().and_then(|r| r.target()) {
                Some(target) => current = target,
                None => break,
            },
            PropertyKind::Association(association) => {
                if let Some(class) = association.association.target().and_then(|c| store.class(c)) {
                    return class.label.clone();
                }
                break;
            }
            _ => break,
        }
    }
    property_name(store, naming, id)
}
