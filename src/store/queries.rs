//! Model-wide queries on a linked store.

use rustc_hash::FxHashSet;

use crate::base::FileId;
use crate::config::NamingConfig;
use crate::model::{ClassId, Property, PropertyId, PropertyKind};
use crate::naming;

use super::ModelStore;

impl ModelStore {
    /// Declared properties followed by those of each decorator, in order.
    pub fn class_properties(&self, id: ClassId) -> Vec<&Property> {
        let Some(class) = self.class(id) else {
            return Vec::new();
        };
        let mut properties: Vec<&Property> = class.properties.iter().collect();
        for usage in &class.decorators {
            if let Some(decorator) = usage.decorator.target().and_then(|d| self.decorator(d)) {
                properties.extend(decorator.properties.iter());
            }
        }
        properties
    }

    /// Parent chain, nearest first. Stops on a cycle.
    pub fn ancestors(&self, id: ClassId) -> Vec<ClassId> {
        let mut ancestors = Vec::new();
        let mut seen = FxHashSet::default();
        seen.insert(id);
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if !seen.insert(parent) {
                break;
            }
            ancestors.push(parent);
            current = self.parent(parent);
        }
        ancestors
    }

    pub fn parent(&self, id: ClassId) -> Option<ClassId> {
        self.class(id)?.extends.as_ref()?.target()
    }

    /// Properties inherited from the parent chain, root class first.
    pub fn extended_properties(&self, id: ClassId) -> Vec<&Property> {
        self.ancestors(id)
            .into_iter()
            .rev()
            .flat_map(|ancestor| self.class_properties(ancestor))
            .collect()
    }

    /// Primary key properties of the class itself (decorators included,
    /// parents excluded).
    pub fn primary_key(&self, id: ClassId) -> Vec<&Property> {
        self.class_properties(id)
            .into_iter()
            .filter(|p| p.is_primary_key())
            .collect()
    }

    /// The single primary key property, if there is exactly one.
    pub fn single_primary_key(&self, id: ClassId) -> Option<&Property> {
        match self.primary_key(id).as_slice() {
            [pk] => Some(pk),
            _ => None,
        }
    }

    /// A class maps to a table when it is concrete and has a primary key.
    pub fn is_persistent(&self, id: ClassId) -> bool {
        self.class(id)
            .is_some_and(|c| !c.is_abstract && !self.primary_key(id).is_empty())
    }

    /// Property of a class (own or decorator) by its effective name.
    pub fn find_property(&self, class: ClassId, name: &str, naming: &NamingConfig) -> Option<PropertyId> {
        self.class_properties(class)
            .into_iter()
            .find(|p| naming::try_property_name(self, naming, p.id).as_deref() == Some(name))
            .map(|p| p.id)
    }

    /// Classes declared in other files that a file's entities point at.
    pub fn referenced_classes(&self, file: FileId) -> Vec<ClassId> {
        let Some(model_file) = self.file(file) else {
            return Vec::new();
        };
        let mut seen = FxHashSet::default();
        let mut referenced = Vec::new();
        let mut add = |id: Option<ClassId>| {
            let Some(id) = id else {
                return;
            };
            if id.file != file && seen.insert(id) {
                referenced.push(id);
            }
        };

        let properties = model_file
            .classes
            .iter()
            .flat_map(|c| c.properties.iter())
            .chain(model_file.decorators.iter().flat_map(|d| d.properties.iter()))
            .chain(
                model_file
                    .endpoints
                    .iter()
                    .flat_map(|e| e.params.iter().chain(e.returns.as_ref())),
            );
        for class in &model_file.classes {
            add(class.extends.as_ref().and_then(|e| e.target()));
        }
        for property in properties {
            let target = match &property.kind {
                PropertyKind::Regular(_) => None,
                PropertyKind::Association(p) => p.association.target(),
                PropertyKind::Composition(p) => p.composition.target(),
                PropertyKind::Alias(p) => p.class.target(),
            };
            add(target);
        }
        referenced
    }
}
