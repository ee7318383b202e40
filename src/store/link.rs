//! The link pass.
//!
//! Runs over the store's fresh copy of the drafts, in this order:
//!
//! 1. resolve `uses` and detect circular dependencies
//! 2. resolve file aliases
//! 3. resolve class, decorator and domain references through the scopes
//! 4. detect inheritance cycles
//! 5. expand multi-property aliases and resolve alias targets, resolving
//!    association `property:` targets as their classes settle
//! 6. resolve remaining property references (keys, values, ...)
//! 7. validate the linked model and report unused declarations

use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::FileId;
use crate::model::{
    AliasProperty, AliasedEntity, ClassId, ClassReference, DomainReference, EndpointId, Property,
    PropertyKind, PropertyReference, ResolvedAlias,
};
use crate::naming;

use super::scope::Scopes;
use super::{DiagnosticCollector, ModelErrorType, ModelStore, alias, validate};

pub(super) fn link(store: &mut ModelStore, collector: &mut DiagnosticCollector) {
    let mut scopes = Scopes::global(store);

    resolve_uses(store, &scopes, collector);
    check_circular_uses(store, collector);
    resolve_file_aliases(store, &scopes, collector);
    scopes.build_file_scopes(store);

    resolve_entity_references(store, &mut scopes, collector);
    check_inheritance_cycles(store, collector);

    alias::resolve_aliases(store, collector);
    resolve_association_targets(store, Some(collector));
    resolve_property_references(store, collector);
    check_as_domains(store, &mut scopes, collector);

    validate::validate(store, collector);
    report_unused(store, &scopes, collector);
}

// ============================================================================
// USES
// ============================================================================

fn resolve_uses(store: &mut ModelStore, scopes: &Scopes, collector: &mut DiagnosticCollector) {
    for file in store.files_mut().values_mut() {
        let mut seen = FxHashSet::default();
        for used in &mut file.uses {
            if !seen.insert(used.name().to_string()) {
                collector.error(
                    ModelErrorType::DuplicateUse,
                    used.location(),
                    format!("Le fichier '{}' est importé plusieurs fois.", used.name()),
                );
                continue;
            }
            match scopes.file(used.name()) {
                Some(id) => used.resolve(id),
                None => collector.error(
                    ModelErrorType::FileNotFound,
                    used.location(),
                    format!("Le fichier '{}' est introuvable.", used.name()),
                ),
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

fn check_circular_uses(store: &ModelStore, collector: &mut DiagnosticCollector) {
    let mut state: FxHashMap<FileId, Visit> = FxHashMap::default();
    let mut path = Vec::new();
    for file in store.files() {
        visit_uses(store, file.id, &mut state, &mut path, collector);
    }
}

fn visit_uses(
    store: &ModelStore,
    id: FileId,
    state: &mut FxHashMap<FileId, Visit>,
    path: &mut Vec<FileId>,
    collector: &mut DiagnosticCollector,
) {
    if state.contains_key(&id) {
        return;
    }
    let Some(file) = store.file(id) else {
        return;
    };
    state.insert(id, Visit::InProgress);
    path.push(id);

    for used in &file.uses {
        let Some(target) = used.target() else {
            continue;
        };
        match state.get(&target) {
            Some(Visit::InProgress) => {
                let start = path.iter().position(|f| *f == target).unwrap_or(0);
                let cycle: Vec<_> = path[start..]
                    .iter()
                    .chain(std::iter::once(&target))
                    .filter_map(|f| store.file_name(*f))
                    .collect();
                collector.error(
                    ModelErrorType::CircularDependency,
                    used.location(),
                    format!("Dépendance circulaire entre fichiers : {}.", cycle.join(" -> ")),
                );
            }
            Some(Visit::Done) => {}
            None => visit_uses(store, target, state, path, collector),
        }
    }

    path.pop();
    state.insert(id, Visit::Done);
}

// ============================================================================
// FILE ALIASES
// ============================================================================

/// Resolution of one `alias` document, computed before being written back.
struct AliasResolution {
    file: FileId,
    alias: usize,
    target: Option<FileId>,
    classes: Vec<Option<ClassId>>,
    endpoints: Vec<Option<EndpointId>>,
    resolved: Vec<ResolvedAlias>,
}

fn resolve_file_aliases(store: &mut ModelStore, scopes: &Scopes, collector: &mut DiagnosticCollector) {
    let mut resolutions = Vec::new();

    for file in store.files() {
        for (index, alias) in file.aliases.iter().enumerate() {
            let mut resolution = AliasResolution {
                file: file.id,
                alias: index,
                target: None,
                classes: Vec::new(),
                endpoints: Vec::new(),
                resolved: Vec::new(),
            };
            let target = scopes.file(alias.file.name()).and_then(|id| store.file(id));
            let Some(target) = target else {
                collector.error(
                    ModelErrorType::FileNotFound,
                    alias.file.location(),
                    format!("Le fichier '{}' est introuvable.", alias.file.name()),
                );
                resolutions.push(resolution);
                continue;
            };
            resolution.target = Some(target.id);

            let mut entities = Vec::new();
            if alias.is_wildcard() {
                entities.extend(target.classes.iter().map(|c| AliasedEntity::Class(c.id)));
                entities.extend(target.endpoints.iter().map(|e| AliasedEntity::Endpoint(e.id)));
            }
            for reference in alias.classes.iter().flatten() {
                let found = target.classes.iter().find(|c| c.name() == reference.name());
                match found {
                    Some(class) => entities.push(AliasedEntity::Class(class.id)),
                    None => collector.error(
                        ModelErrorType::ClassNotFound,
                        reference.location(),
                        format!(
                            "La classe '{}' est introuvable dans le fichier '{}'.",
                            reference.name(),
                            target.name
                        ),
                    ),
                }
                resolution.classes.push(found.map(|c| c.id));
            }
            for reference in alias.endpoints.iter().flatten() {
                let found = target.endpoints.iter().find(|e| e.name() == reference.name());
                match found {
                    Some(endpoint) => entities.push(AliasedEntity::Endpoint(endpoint.id)),
                    None => collector.error(
                        ModelErrorType::EndpointNotFound,
                        reference.location(),
                        format!(
                            "L'endpoint '{}' est introuvable dans le fichier '{}'.",
                            reference.name(),
                            target.name
                        ),
                    ),
                }
                resolution.endpoints.push(found.map(|e| e.id));
            }
            resolution.resolved = entities
                .into_iter()
                .map(|entity| ResolvedAlias {
                    alias: alias.id,
                    entity,
                    location: alias.location,
                })
                .collect();
            resolutions.push(resolution);
        }
    }

    for resolution in resolutions {
        let Some(file) = store.files_mut().get_mut(&resolution.file) else {
            continue;
        };
        let alias = &mut file.aliases[resolution.alias];
        if let Some(target) = resolution.target {
            alias.file.resolve(target);
        }
        for (reference, id) in alias.classes.iter_mut().flatten().zip(&resolution.classes) {
            if let Some(id) = id {
                reference.resolve(*id);
            }
        }
        for (reference, id) in alias.endpoints.iter_mut().flatten().zip(&resolution.endpoints) {
            if let Some(id) = id {
                reference.resolve(*id);
            }
        }
        file.resolved_aliases.extend(resolution.resolved);
    }
}

// ============================================================================
// CLASS, DECORATOR AND DOMAIN REFERENCES
// ============================================================================

fn resolve_entity_references(
    store: &mut ModelStore,
    scopes: &mut Scopes,
    collector: &mut DiagnosticCollector,
) {
    for file in store.files_mut().values_mut() {
        let from = file.id;
        for domain in &mut file.domains {
            for reference in domain.as_domains.values_mut() {
                resolve_domain(reference, scopes, collector);
            }
        }
        for decorator in &mut file.decorators {
            for property in &mut decorator.properties {
                resolve_property(property, from, scopes, collector);
            }
        }
        for class in &mut file.classes {
            if let Some(extends) = class.extends.as_mut() {
                resolve_class(extends, from, scopes, collector);
            }
            for usage in &mut class.decorators {
                match scopes.decorator(from, usage.decorator.name()) {
                    Some(id) => usage.decorator.resolve(id),
                    None => collector.error(
                        ModelErrorType::DecoratorNotFound,
                        usage.decorator.location(),
                        format!(
                            "Le décorateur '{}' est introuvable dans le fichier ou ses dépendances.",
                            usage.decorator.name()
                        ),
                    ),
                }
            }
            for property in &mut class.properties {
                resolve_property(property, from, scopes, collector);
            }
        }
        for endpoint in &mut file.endpoints {
            for property in endpoint.params.iter_mut().chain(endpoint.returns.as_mut()) {
                resolve_property(property, from, scopes, collector);
            }
        }
    }
}

fn resolve_property(
    property: &mut Property,
    from: FileId,
    scopes: &mut Scopes,
    collector: &mut DiagnosticCollector,
) {
    match &mut property.kind {
        PropertyKind::Regular(p) => resolve_domain(&mut p.domain, scopes, collector),
        PropertyKind::Association(p) => resolve_class(&mut p.association, from, scopes, collector),
        PropertyKind::Composition(p) => {
            resolve_class(&mut p.composition, from, scopes, collector);
            if let Some(domain) = p.domain.as_mut() {
                resolve_domain(domain, scopes, collector);
            }
        }
        PropertyKind::Alias(p) => resolve_class(&mut p.class, from, scopes, collector),
    }
}

fn resolve_class(
    reference: &mut ClassReference,
    from: FileId,
    scopes: &mut Scopes,
    collector: &mut DiagnosticCollector,
) {
    match scopes.class(from, reference.name()) {
        Some(id) => reference.resolve(id),
        None => collector.error(
            ModelErrorType::ClassNotFound,
            reference.location(),
            format!(
                "La classe '{}' est introuvable dans le fichier ou ses dépendances.",
                reference.name()
            ),
        ),
    }
}

fn resolve_domain(
    reference: &mut DomainReference,
    scopes: &mut Scopes,
    collector: &mut DiagnosticCollector,
) {
    match scopes.domain(reference.name()) {
        Some(id) => reference.resolve(id),
        None => collector.error(
            ModelErrorType::DomainNotFound,
            reference.location(),
            format!("Le domaine '{}' est introuvable.", reference.name()),
        ),
    }
}

// ============================================================================
// INHERITANCE
// ============================================================================

fn check_inheritance_cycles(store: &ModelStore, collector: &mut DiagnosticCollector) {
    for class in store.classes() {
        let Some(extends) = class.extends.as_ref() else {
            continue;
        };
        let mut seen = FxHashSet::default();
        let mut current = extends.target();
        while let Some(id) = current {
            if id == class.id {
                collector.error(
                    ModelErrorType::CircularInheritance,
                    extends.location(),
                    format!("La classe '{}' hérite d'elle-même.", class.name()),
                );
                break;
            }
            if !seen.insert(id) {
                break;
            }
            current = store
                .class(id)
                .and_then(|c| c.extends.as_ref())
                .and_then(|e| e.target());
        }
    }
}

// ============================================================================
// PROPERTY REFERENCES
// ============================================================================

/// Resolve association `property:` targets, writing each round back before
/// the next lookup so derived names (`ACode`) become findable.
///
/// Without a collector, only targets in classes with no alias left to
/// expand are looked up and misses stay silent: the alias rounds call it
/// this way, since property indices of such a class may still move. With a
/// collector, every remaining miss is reported.
pub(super) fn resolve_association_targets(
    store: &mut ModelStore,
    mut report: Option<&mut DiagnosticCollector>,
) {
    let naming = store.naming();
    let settled_only = report.is_none();

    loop {
        let mut resolved = Vec::new();
        let mut missing = Vec::new();
        let properties = store
            .classes()
            .flat_map(|c| c.properties.iter())
            .chain(store.decorators().flat_map(|d| d.properties.iter()))
            .chain(store.endpoints().flat_map(|e| e.params.iter().chain(e.returns.as_ref())));
        for property in properties {
            let Some(association) = property.as_association() else {
                continue;
            };
            let (Some(reference), Some(target)) =
                (association.property.as_ref(), association.association.target())
            else {
                continue;
            };
            if reference.is_resolved() || (settled_only && !is_settled(store, target)) {
                continue;
            }
            match store.find_property(target, reference.name(), &naming) {
                Some(id) => resolved.push((property.id, id)),
                None => missing.push((target, reference.name.clone())),
            }
        }

        if resolved.is_empty() {
            if let Some(collector) = report.as_deref_mut() {
                for (target, name) in missing {
                    let class_name = store.class(target).map(|c| c.name()).unwrap_or_default();
                    collector.error(
                        ModelErrorType::PropertyNotFound,
                        name.location,
                        format!(
                            "La propriété '{}' est introuvable sur la classe '{}'.",
                            name.value, class_name
                        ),
                    );
                }
            }
            return;
        }

        for (pid, id) in resolved {
            let reference = store.property_mut(pid).and_then(|p| match &mut p.kind {
                PropertyKind::Association(a) => a.property.as_mut(),
                _ => None,
            });
            if let Some(reference) = reference {
                reference.resolve(id);
            }
        }
    }
}

/// No alias of the class (decorators included) still awaits expansion.
fn is_settled(store: &ModelStore, class: ClassId) -> bool {
    !store
        .class_properties(class)
        .iter()
        .any(|p| p.as_alias().is_some_and(AliasProperty::needs_expansion))
}

/// A class-level property reference slot, addressed so it can be written back.
#[derive(Clone, Copy)]
enum Slot {
    Default(ClassId),
    Order(ClassId),
    Flag(ClassId),
    Unique(ClassId, usize, usize),
    Value(ClassId, usize, usize),
}

/// Key, unique and value references of every class. Association targets
/// must be resolved first: these may name derived association properties.
fn resolve_property_references(store: &mut ModelStore, collector: &mut DiagnosticCollector) {
    let naming = store.naming();
    let mut resolved = Vec::new();

    {
        let store = &*store;
        let mut lookup = |slot: Slot,
                          class: ClassId,
                          reference: &PropertyReference,
                          kind: ModelErrorType| {
            match store.find_property(class, reference.name(), &naming) {
                Some(id) => resolved.push((slot, id)),
                None => {
                    let class_name = store.class(class).map(|c| c.name()).unwrap_or_default();
                    collector.error(
                        kind,
                        reference.location(),
                        format!(
                            "La propriété '{}' est introuvable sur la classe '{}'.",
                            reference.name(),
                            class_name
                        ),
                    );
                }
            }
        };

        for class in store.classes() {
            let specials = [
                (class.default_property.as_ref(), Slot::Default(class.id)),
                (class.order_property.as_ref(), Slot::Order(class.id)),
                (class.flag_property.as_ref(), Slot::Flag(class.id)),
            ];
            for (reference, slot) in specials {
                if let Some(reference) = reference {
                    lookup(slot, class.id, reference, ModelErrorType::PropertyNotFound);
                }
            }

            for (g, group) in class.unique_keys.iter().enumerate() {
                for (i, reference) in group.iter().enumerate() {
                    lookup(
                        Slot::Unique(class.id, g, i),
                        class.id,
                        reference,
                        ModelErrorType::UniqueKeyPropertyNotFound,
                    );
                }
            }

            for (v, value) in class.values.iter().enumerate() {
                for (f, field) in value.fields.iter().enumerate() {
                    lookup(
                        Slot::Value(class.id, v, f),
                        class.id,
                        &field.property,
                        ModelErrorType::PropertyNotFound,
                    );
                }
            }
        }
    }

    for (slot, id) in resolved {
        match slot {
            Slot::Default(class) | Slot::Order(class) | Slot::Flag(class) => {
                let Some(class_mut) = store.class_mut(class) else {
                    continue;
                };
                let reference = match slot {
                    Slot::Default(_) => class_mut.default_property.as_mut(),
                    Slot::Order(_) => class_mut.order_property.as_mut(),
                    _ => class_mut.flag_property.as_mut(),
                };
                if let Some(reference) = reference {
                    reference.resolve(id);
                }
            }
            Slot::Unique(class, g, i) => {
                if let Some(reference) = store
                    .class_mut(class)
                    .and_then(|c| c.unique_keys.get_mut(g))
                    .and_then(|group| group.get_mut(i))
                {
                    reference.resolve(id);
                }
            }
            Slot::Value(class, v, f) => {
                if let Some(field) = store
                    .class_mut(class)
                    .and_then(|c| c.values.get_mut(v))
                    .and_then(|value| value.fields.get_mut(f))
                {
                    field.property.resolve(id);
                }
            }
        }
    }
}

// ============================================================================
// `as` DOMAINS
// ============================================================================

/// Associations and aliases with `as` must find that key in the leaf
/// domain's `asDomains`.
fn check_as_domains(store: &ModelStore, scopes: &mut Scopes, collector: &mut DiagnosticCollector) {
    let properties = store
        .classes()
        .flat_map(|c| c.properties.iter())
        .chain(store.decorators().flat_map(|d| d.properties.iter()))
        .chain(store.endpoints().flat_map(|e| e.params.iter().chain(e.returns.as_ref())));

    for property in properties {
        let as_name = match &property.kind {
            PropertyKind::Association(p) => p.as_domain.as_ref(),
            PropertyKind::Alias(p) => p.as_domain.as_ref(),
            _ => None,
        };
        let Some(as_name) = as_name else {
            continue;
        };
        let Some(base) = naming::base_domain(store, property.id) else {
            continue;
        };
        let Some(domain) = store.domain(base) else {
            continue;
        };
        match domain.as_domains.get(as_name.as_str()).and_then(|r| r.target()) {
            Some(target) => {
                if let Some(target) = store.domain(target) {
                    scopes.domain(target.name());
                }
            }
            None => collector.error(
                ModelErrorType::AsDomainNotFound,
                as_name.location,
                format!(
                    "Le domaine '{}' ne définit pas de domaine '{}' dans 'asDomains'.",
                    domain.name(),
                    as_name.value
                ),
            ),
        }
    }
}

// ============================================================================
// UNUSED DECLARATIONS
// ============================================================================

fn report_unused(store: &mut ModelStore, scopes: &Scopes, collector: &mut DiagnosticCollector) {
    for file in store.files_mut().values_mut() {
        let mut useless = Vec::new();
        for (index, used) in file.uses.iter().enumerate() {
            if used.is_resolved() && !scopes.is_import_used(file.id, index) {
                collector.error(
                    ModelErrorType::UnusedImport,
                    used.location(),
                    format!("L'import '{}' n'est pas utilisé.", used.name()),
                );
                useless.push(used.clone());
            }
        }
        file.useless_imports = useless;

        for domain in &file.domains {
            if !scopes.is_domain_used(domain.id) {
                collector.error(
                    ModelErrorType::UnusedDomain,
                    domain.name.location,
                    format!("Le domaine '{}' n'est pas utilisé.", domain.name()),
                );
            }
        }
    }
}
