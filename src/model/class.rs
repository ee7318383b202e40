use crate::base::{FileId, Location, LocatedString};

use super::{
    ClassId, ClassReference, DecoratorReference, Namespace, Property, PropertyId, PropertyReference,
};

/// A decorator applied to a class, with its optional parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoratorUsage {
    pub decorator: DecoratorReference,
    pub parameters: Vec<String>,
}

/// One `field: literal` entry of a static value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueField {
    pub property: PropertyReference,
    pub value: LocatedString,
}

/// A named static instance of a reference class (`values:` block).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceValue {
    pub name: LocatedString,
    pub fields: Vec<ValueField>,
}

impl ReferenceValue {
    /// Literal for a resolved property, if the value sets it.
    pub fn get(&self, property: PropertyId) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.property.target() == Some(property))
            .map(|f| f.value.as_str())
    }

    /// Literal by the field name written in the source.
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.property.name() == name)
            .map(|f| f.value.as_str())
    }
}

/// The central entity of a model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Class {
    pub id: ClassId,
    pub name: LocatedString,
    /// Three-letter prefix for SQL names; unique across the model.
    pub trigram: Option<LocatedString>,
    /// Table name: explicit `sqlName`, or derived at end of parse.
    pub sql_name: String,
    pub plural_name: String,
    /// Explicit `label`, or the class name.
    pub label: String,
    pub comment: String,
    pub extends: Option<ClassReference>,
    pub decorators: Vec<DecoratorUsage>,
    /// Declared properties, in declaration order (column order).
    pub properties: Vec<Property>,
    pub unique_keys: Vec<Vec<PropertyReference>>,
    pub values: Vec<ReferenceValue>,
    pub reference: bool,
    pub is_abstract: bool,
    pub default_property: Option<PropertyReference>,
    pub order_property: Option<PropertyReference>,
    pub flag_property: Option<PropertyReference>,
    pub namespace: Namespace,
    pub location: Location,
}

impl Class {
    pub fn file(&self) -> FileId {
        self.id.file
    }

    pub fn name(&self) -> &str {
        &self.name.value
    }

    pub fn trigram(&self) -> Option<&str> {
        self.trigram.as_ref().map(|t| t.as_str())
    }

    pub fn qualified_name(&self) -> String {
        self.namespace.qualify(self.name())
    }

    pub fn property(&self, id: PropertyId) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    /// Declared primary key properties (not inherited).
    pub fn own_primary_key(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(|p| p.is_primary_key())
    }

    /// A reference class carrying static values (rendered as an enum).
    pub fn is_enum(&self) -> bool {
        self.reference && !self.values.is_empty()
    }
}
