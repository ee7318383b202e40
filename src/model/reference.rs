use crate::base::{FileId, Location, LocatedString};

use super::{ClassId, DecoratorId, DomainId, EndpointId, PropertyId};

/// Resolution state of a [`Reference`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution<T> {
    Unresolved,
    Resolved(T),
}

/// A symbol written in the source, resolved after all files are loaded.
///
/// The loader only records the name and where it was written; the store
/// resolves it in its link pass. A reference is never resolved eagerly
/// during parsing, since its target may live in a file not loaded yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference<T> {
    pub name: LocatedString,
    resolution: Resolution<T>,
}

pub type ClassReference = Reference<ClassId>;
pub type DomainReference = Reference<DomainId>;
pub type DecoratorReference = Reference<DecoratorId>;
pub type EndpointReference = Reference<EndpointId>;
pub type FileReference = Reference<FileId>;
pub type PropertyReference = Reference<PropertyId>;

impl<T: Copy> Reference<T> {
    pub fn new(name: LocatedString) -> Self {
        Self {
            name,
            resolution: Resolution::Unresolved,
        }
    }

    pub fn name(&self) -> &str {
        &self.name.value
    }

    pub fn location(&self) -> Location {
        self.name.location
    }

    pub fn resolution(&self) -> Resolution<T> {
        self.resolution
    }

    /// The resolved target, or `None` before (or after a failed) link.
    pub fn target(&self) -> Option<T> {
        match self.resolution {
            Resolution::Resolved(target) => Some(target),
            Resolution::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.resolution, Resolution::Resolved(_))
    }

    pub(crate) fn resolve(&mut self, target: T) {
        debug_assert!(
            !self.is_resolved(),
            "reference '{}' resolved twice",
            self.name.value
        );
        self.resolution = Resolution::Resolved(target);
    }
}
