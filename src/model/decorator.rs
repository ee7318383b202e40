use indexmap::IndexMap;

use crate::base::{FileId, Location, LocatedString};

use super::{DecoratorId, Namespace, Property};

/// Per-language hints a decorator adds to the classes it decorates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecoratorImplementation {
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub annotations: Vec<String>,
}

/// A named bundle of properties and annotations applied to classes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decorator {
    pub id: DecoratorId,
    pub name: LocatedString,
    pub description: String,
    /// Injected into every class using the decorator.
    pub properties: Vec<Property>,
    pub implementations: IndexMap<String, DecoratorImplementation>,
    pub namespace: Namespace,
    pub location: Location,
}

impl Decorator {
    pub fn file(&self) -> FileId {
        self.id.file
    }

    pub fn name(&self) -> &str {
        &self.name.value
    }

    /// Languages for which this decorator imposes a base class.
    pub fn extends_languages(&self) -> impl Iterator<Item = &str> {
        self.implementations
            .iter()
            .filter(|(_, imp)| imp.extends.is_some())
            .map(|(lang, _)| lang.as_str())
    }
}
