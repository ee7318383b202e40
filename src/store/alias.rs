//! Alias properties: expansion and target resolution.
//!
//! An alias property names its target by class and property name, and the
//! target may itself be an alias whose name is derived from its own
//! target. Both steps therefore run as one fixpoint: each round handles the
//! aliases whose target class is settled (no pending expansion, every
//! candidate name known), until nothing moves. What is left is a cycle.
//! Association `property:` targets are resolved at the start of each round,
//! as derived association names (`ACode`) need them.

use rustc_hash::FxHashSet;

use crate::base::{Location, LocatedString};
use crate::model::{
    AliasProperty, Property, PropertyId, PropertyKind, PropertyOwner, Reference,
};
use crate::naming;

use super::{DiagnosticCollector, ModelErrorType, ModelStore, link};

enum Action {
    Resolve(PropertyId, PropertyId),
    Expand(PropertyId, Vec<PropertyKind>),
}

enum Outcome {
    Done(Action),
    Blocked,
    Failed,
}

/// Expand `include`/`exclude` aliases and resolve every alias target.
pub(super) fn resolve_aliases(store: &mut ModelStore, collector: &mut DiagnosticCollector) {
    let naming = store.naming();
    let mut failed: FxHashSet<Location> = FxHashSet::default();

    loop {
        link::resolve_association_targets(store, None);
        let pending = pending_aliases(store, &failed);
        if pending.is_empty() {
            return;
        }

        let mut actions = Vec::new();
        let mut blocked = Vec::new();
        for id in pending {
            match step(store, &naming, id, collector) {
                Outcome::Done(action) => actions.push(action),
                Outcome::Blocked => blocked.push(id),
                Outcome::Failed => {
                    if let Some(property) = store.property(id) {
                        failed.insert(property.location);
                    }
                }
            }
        }

        if actions.is_empty() {
            for id in blocked {
                if let Some(property) = store.property(id) {
                    collector.error(
                        ModelErrorType::CircularAlias,
                        property.location,
                        "Cet alias fait partie d'une référence circulaire entre alias.",
                    );
                    failed.insert(property.location);
                }
            }
            continue;
        }
        apply(store, actions, collector, &mut failed);
    }
}

/// Aliases still needing expansion or a target, in store order.
fn pending_aliases(store: &ModelStore, failed: &FxHashSet<Location>) -> Vec<PropertyId> {
    let properties = store
        .classes()
        .flat_map(|c| c.properties.iter())
        .chain(store.decorators().flat_map(|d| d.properties.iter()))
        .chain(store.endpoints().flat_map(|e| e.params.iter().chain(e.returns.as_ref())));

    properties
        .filter(|p| {
            p.as_alias()
                .is_some_and(|a| a.property.as_ref().is_none_or(|r| !r.is_resolved()))
        })
        .filter(|p| !failed.contains(&p.location))
        .map(|p| p.id)
        .collect()
}

fn step(
    store: &ModelStore,
    naming: &crate::config::NamingConfig,
    id: PropertyId,
    collector: &mut DiagnosticCollector,
) -> Outcome {
    let Some(property) = store.property(id) else {
        return Outcome::Failed;
    };
    let Some(alias) = property.as_alias() else {
        return Outcome::Failed;
    };
    // Class not found is reported by reference resolution.
    let Some(target_class) = alias.class.target() else {
        return Outcome::Failed;
    };

    let candidates = store.class_properties(target_class);
    if candidates
        .iter()
        .any(|p| p.as_alias().is_some_and(AliasProperty::needs_expansion))
    {
        return Outcome::Blocked;
    }
    let names: Vec<(PropertyId, Option<String>)> = candidates
        .iter()
        .map(|p| (p.id, naming::try_property_name(store, naming, p.id)))
        .collect();
    let all_named = names.iter().all(|(_, name)| name.is_some());
    let find = |name: &str| {
        names
            .iter()
            .find(|(_, n)| n.as_deref() == Some(name))
            .map(|(pid, _)| *pid)
    };
    let class_name = store.class(target_class).map(|c| c.name()).unwrap_or_default();
    let not_found = |collector: &mut DiagnosticCollector, name: &LocatedString| {
        collector.error(
            ModelErrorType::PropertyNotFound,
            name.location,
            format!(
                "La propriété '{}' est introuvable sur la classe '{}'.",
                name.value, class_name
            ),
        );
    };

    if let Some(reference) = alias.property.as_ref() {
        return match find(reference.name()) {
            Some(target) if creates_cycle(store, id, target) => {
                collector.error(
                    ModelErrorType::CircularAlias,
                    reference.location(),
                    format!(
                        "L'alias vers '{}.{}' forme une référence circulaire.",
                        class_name,
                        reference.name()
                    ),
                );
                Outcome::Failed
            }
            Some(target) => Outcome::Done(Action::Resolve(id, target)),
            None if !all_named => Outcome::Blocked,
            None => {
                not_found(collector, &reference.name);
                Outcome::Failed
            }
        };
    }

    // Expansion: `include`, or everything but `exclude`.
    if !all_named {
        return Outcome::Blocked;
    }
    let mut selected = Vec::new();
    if alias.include.is_empty() {
        for excluded in &alias.exclude {
            if find(excluded.as_str()).is_none() {
                not_found(collector, excluded);
            }
        }
        for (pid, name) in &names {
            let name = name.as_deref().unwrap_or_default();
            if alias.exclude.iter().all(|e| e.as_str() != name) {
                selected.push((*pid, LocatedString::new(name.to_string(), property.location)));
            }
        }
    } else {
        for included in &alias.include {
            match find(included.as_str()) {
                Some(pid) => selected.push((pid, included.clone())),
                None => not_found(collector, included),
            }
        }
    }

    let expanded = selected
        .into_iter()
        .map(|(target, name)| {
            let mut reference = Reference::new(name);
            reference.resolve(target);
            PropertyKind::Alias(AliasProperty {
                property: Some(reference),
                include: Vec::new(),
                exclude: Vec::new(),
                ..alias.clone()
            })
        })
        .collect::<Vec<_>>();

    if matches!(id.owner, PropertyOwner::EndpointReturn(_)) && expanded.len() != 1 {
        collector.error(
            ModelErrorType::PropertyNotFound,
            property.location,
            "Le retour d'un endpoint doit désigner une seule propriété.",
        );
        return Outcome::Failed;
    }
    Outcome::Done(Action::Expand(id, expanded))
}

/// Whether pointing `from` at `target` closes a chain of aliases.
fn creates_cycle(store: &ModelStore, from: PropertyId, target: PropertyId) -> bool {
    let mut seen = FxHashSet::default();
    let mut current = Some(target);
    while let Some(id) = current {
        if id == from || !seen.insert(id) {
            return true;
        }
        current = store
            .property(id)
            .and_then(Property::as_alias)
            .and_then(|a| a.property.as_ref())
            .and_then(|r| r.target());
    }
    false
}

fn apply(
    store: &mut ModelStore,
    actions: Vec<Action>,
    collector: &mut DiagnosticCollector,
    failed: &mut FxHashSet<Location>,
) {
    let mut expansions = Vec::new();
    for action in actions {
        match action {
            Action::Resolve(id, target) => {
                // Resolutions of this round may chain into each other.
                if creates_cycle(store, id, target) {
                    if let Some(property) = store.property(id) {
                        collector.error(
                            ModelErrorType::CircularAlias,
                            property.location,
                            "Cet alias fait partie d'une référence circulaire entre alias.",
                        );
                        failed.insert(property.location);
                    }
                    continue;
                }
                let reference = store.property_mut(id).and_then(|p| match &mut p.kind {
                    PropertyKind::Alias(a) => a.property.as_mut(),
                    _ => None,
                });
                if let Some(reference) = reference {
                    reference.resolve(target);
                }
            }
            Action::Expand(id, kinds) => expansions.push((id, kinds)),
        }
    }

    // Splice from the end so pending indices stay valid.
    expansions.sort_by(|(a, _), (b, _)| b.cmp(a));
    for (id, kinds) in expansions {
        splice(store, id, kinds);
    }
}

fn splice(store: &mut ModelStore, id: PropertyId, kinds: Vec<PropertyKind>) {
    if let PropertyOwner::EndpointReturn(_) = id.owner {
        if let (Some(property), Some(kind)) = (store.property_mut(id), kinds.into_iter().next()) {
            property.kind = kind;
        }
        return;
    }

    let Some(properties) = store.owner_properties_mut(id.owner) else {
        return;
    };
    let Some(original) = properties.get(id.index()) else {
        return;
    };
    let location = original.location;
    let replacement: Vec<Property> = kinds
        .into_iter()
        .map(|kind| Property { id, location, kind })
        .collect();
    properties.splice(id.index()..=id.index(), replacement);
    for (index, property) in properties.iter_mut().enumerate() {
        property.id = PropertyId::new(id.owner, index as u32);
    }
}
