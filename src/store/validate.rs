//! Integrity checks on the linked model.

use rustc_hash::FxHashMap;

use crate::model::{Class, Endpoint, Property, PropertyKind};
use crate::naming;

use super::{DiagnosticCollector, ModelError, ModelErrorType, ModelStore};

/// Languages in which a class can only have one base class.
const EXTENDS_LANGUAGES: &[&str] = &["csharp", "java", "ts", "php"];

pub(super) fn validate(store: &ModelStore, collector: &mut DiagnosticCollector) {
    check_duplicate_entities(store, collector);
    check_trigrams(store, collector);

    for class in store.classes() {
        check_primary_key(store, class, collector);
        check_duplicate_properties(store, class, collector);
        check_decorator_extends(store, class, collector);
        check_values(store, class, collector);
    }

    let associations = store
        .classes()
        .flat_map(|c| c.properties.iter())
        .chain(store.decorators().flat_map(|d| d.properties.iter()))
        .chain(store.endpoints().flat_map(|e| e.params.iter().chain(e.returns.as_ref())));
    for property in associations {
        check_association_target(store, property, collector);
    }

    for endpoint in store.endpoints() {
        check_parameter_order(store, endpoint, collector);
    }
}

// ============================================================================
// UNIQUENESS
// ============================================================================

fn check_duplicate_entities(store: &ModelStore, collector: &mut DiagnosticCollector) {
    let mut classes = FxHashMap::default();
    for class in store.classes() {
        let key = (class.namespace.module.as_str(), class.name());
        match classes.get(&key) {
            Some(first) => collector.add(
                ModelError::new(
                    ModelErrorType::DuplicateClass,
                    class.name.location,
                    format!(
                        "La classe '{}' est déjà définie dans le module '{}'.",
                        class.name(),
                        class.namespace.module
                    ),
                )
                .with_related(*first, "Première définition"),
            ),
            None => {
                classes.insert(key, class.name.location);
            }
        }
    }

    let mut decorators = FxHashMap::default();
    for decorator in store.decorators() {
        let key = (decorator.namespace.module.as_str(), decorator.name());
        match decorators.get(&key) {
            Some(first) => collector.add(
                ModelError::new(
                    ModelErrorType::DuplicateDecorator,
                    decorator.name.location,
                    format!("Le décorateur '{}' est déjà défini.", decorator.name()),
                )
                .with_related(*first, "Première définition"),
            ),
            None => {
                decorators.insert(key, decorator.name.location);
            }
        }
    }

    let mut domains = FxHashMap::default();
    for domain in store.domains() {
        match domains.get(domain.name()) {
            Some(first) => collector.add(
                ModelError::new(
                    ModelErrorType::DuplicateDomain,
                    domain.name.location,
                    format!("Le domaine '{}' est déjà défini.", domain.name()),
                )
                .with_related(*first, "Première définition"),
            ),
            None => {
                domains.insert(domain.name(), domain.name.location);
            }
        }
    }

    let mut endpoints = FxHashMap::default();
    for endpoint in store.endpoints() {
        let key = (endpoint.namespace.module.as_str(), endpoint.name());
        match endpoints.get(&key) {
            Some(first) => collector.add(
                ModelError::new(
                    ModelErrorType::DuplicateEndpoint,
                    endpoint.name.location,
                    format!(
                        "L'endpoint '{}' est déjà défini dans le module '{}'.",
                        endpoint.name(),
                        endpoint.namespace.module
                    ),
                )
                .with_related(*first, "Première définition"),
            ),
            None => {
                endpoints.insert(key, endpoint.name.location);
            }
        }
    }
}

/// One error per class reusing a trigram already taken.
fn check_trigrams(store: &ModelStore, collector: &mut DiagnosticCollector) {
    let mut seen: FxHashMap<&str, &Class> = FxHashMap::default();
    for class in store.classes() {
        let Some(trigram) = class.trigram.as_ref() else {
            continue;
        };
        match seen.get(trigram.as_str()) {
            Some(first) => {
                let first_location = first
                    .trigram
                    .as_ref()
                    .map(|t| t.location)
                    .unwrap_or(first.location);
                collector.add(
                    ModelError::new(
                        ModelErrorType::DuplicateTrigram,
                        trigram.location,
                        format!(
                            "Le trigramme '{}' de la classe '{}' est déjà utilisé par la classe '{}'.",
                            trigram.value,
                            class.name(),
                            first.name()
                        ),
                    )
                    .with_related(first_location, format!("Trigramme de la classe '{}'", first.name())),
                );
            }
            None => {
                seen.insert(trigram.as_str(), class);
            }
        }
    }
}

fn check_duplicate_properties(store: &ModelStore, class: &Class, collector: &mut DiagnosticCollector) {
    let naming = store.naming();
    let mut seen = FxHashMap::default();
    for property in store.class_properties(class.id) {
        let Some(name) = naming::try_property_name(store, &naming, property.id) else {
            continue;
        };
        if seen.insert(name.clone(), property.location).is_some() {
            let location = if property.owner().class() == Some(class.id) {
                property.location
            } else {
                class.name.location
            };
            collector.error(
                ModelErrorType::DuplicateProperty,
                location,
                format!(
                    "La propriété '{}' est déjà définie sur la classe '{}'.",
                    name,
                    class.name()
                ),
            );
        }
    }
}

// ============================================================================
// KEYS AND ASSOCIATIONS
// ============================================================================

fn check_primary_key(store: &ModelStore, class: &Class, collector: &mut DiagnosticCollector) {
    if store.naming().allow_composite_primary_key {
        return;
    }
    let keys = store.primary_key(class.id);
    if let Some(second) = keys.get(1) {
        collector.error(
            ModelErrorType::CompositePrimaryKey,
            second.location,
            format!(
                "La classe '{}' a plusieurs clés primaires, ce qui n'est pas autorisé.",
                class.name()
            ),
        );
    }
}

fn check_association_target(store: &ModelStore, property: &Property, collector: &mut DiagnosticCollector) {
    let Some(association) = property.as_association() else {
        return;
    };
    let Some(target) = association.association.target() else {
        return;
    };
    if association.property.is_some() || store.primary_key(target).len() == 1 {
        return;
    }
    let name = store.class(target).map(|c| c.name()).unwrap_or_default();
    collector.error(
        ModelErrorType::InvalidAssociationTarget,
        association.association.location(),
        format!(
            "La classe '{name}' doit avoir une et une seule clé primaire pour être la cible d'une association."
        ),
    );
}

fn check_decorator_extends(store: &ModelStore, class: &Class, collector: &mut DiagnosticCollector) {
    for language in EXTENDS_LANGUAGES {
        let decorators = class
            .decorators
            .iter()
            .filter_map(|usage| usage.decorator.target())
            .filter_map(|id| store.decorator(id))
            .filter(|d| {
                d.implementations
                    .get(*language)
                    .is_some_and(|imp| imp.extends.is_some())
            })
            .count();
        let bases = decorators + usize::from(class.extends.is_some());
        if bases > 1 {
            collector.error(
                ModelErrorType::DecoratorExtendsConflict,
                class.name.location,
                format!(
                    "La classe '{}' hérite de plusieurs classes en '{}' (via 'extends' ou ses décorateurs).",
                    class.name(),
                    language
                ),
            );
            return;
        }
    }
}

/// Values must set the primary key (unless generated) and required
/// associations. Required regular fields are checked at load.
fn check_values(store: &ModelStore, class: &Class, collector: &mut DiagnosticCollector) {
    if class.values.is_empty() {
        return;
    }
    let naming = store.naming();
    let required: Vec<&Property> = store
        .class_properties(class.id)
        .into_iter()
        .filter(|p| match &p.kind {
            PropertyKind::Regular(r) if r.primary_key => !r
                .domain
                .target()
                .and_then(|d| store.domain(d))
                .is_some_and(|d| d.auto_generated_value),
            PropertyKind::Association(a) => a.required || a.primary_key,
            _ => false,
        })
        .collect();

    for value in &class.values {
        for property in &required {
            if value.get(property.id).is_none() {
                collector.error(
                    ModelErrorType::MissingRequiredValue,
                    value.name.location,
                    format!(
                        "La valeur '{}' de la classe '{}' doit initialiser la propriété obligatoire '{}'.",
                        value.name.value,
                        class.name(),
                        naming::property_name(store, &naming, property.id)
                    ),
                );
            }
        }
    }
}

// ============================================================================
// ENDPOINTS
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq)]
enum ParamKind {
    Route,
    Body,
    Query,
}

fn check_parameter_order(store: &ModelStore, endpoint: &Endpoint, collector: &mut DiagnosticCollector) {
    let naming = store.naming();
    let route_names = endpoint.route_parameter_names();
    let mut seen_query = false;

    for param in &endpoint.params {
        let name = naming::property_name(store, &naming, param.id);
        let kind = if route_names.iter().any(|r| r.eq_ignore_ascii_case(&name)) {
            ParamKind::Route
        } else if naming::is_body_param(store, param.id) {
            ParamKind::Body
        } else {
            ParamKind::Query
        };

        match kind {
            ParamKind::Query => seen_query = true,
            _ if seen_query => collector.error(
                ModelErrorType::InvalidParameterOrder,
                param.location,
                format!(
                    "Le paramètre '{}' de l'endpoint '{}' doit être déclaré avant les paramètres de query.",
                    name,
                    endpoint.name()
                ),
            ),
            _ => {}
        }
    }
}
