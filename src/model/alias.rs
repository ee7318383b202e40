use crate::base::Location;

use super::{AliasId, ClassId, ClassReference, EndpointId, EndpointReference, FileReference};

/// A file-level `alias` block re-exporting entities of another file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alias {
    pub id: AliasId,
    pub file: FileReference,
    /// `None` when the block has no `classes` key.
    pub classes: Option<Vec<ClassReference>>,
    /// `None` when the block has no `endpoints` key.
    pub endpoints: Option<Vec<EndpointReference>>,
    pub location: Location,
}

impl Alias {
    /// Neither list given: everything in the aliased file.
    pub fn is_wildcard(&self) -> bool {
        self.classes.is_none() && self.endpoints.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AliasedEntity {
    Class(ClassId),
    Endpoint(EndpointId),
}

/// An entity brought into a file by one of its aliases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAlias {
    pub alias: AliasId,
    pub entity: AliasedEntity,
    /// Where the alias was written, for diagnostics in the aliasing file.
    pub location: Location,
}
