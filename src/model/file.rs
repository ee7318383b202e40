use std::path::PathBuf;

use crate::base::{FileId, Location};

use super::{
    Alias, AliasedEntity, Class, ClassId, Decorator, Domain, Endpoint, EndpointId, FileReference,
    Namespace, ResolvedAlias,
};

/// `options.endpoints` of a file header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EndpointOptions {
    pub file_name: Option<String>,
    pub prefix: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileOptions {
    pub endpoints: EndpointOptions,
}

/// Everything declared in one model file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelFile {
    pub id: FileId,
    /// Model-relative name without extension (`Securite/Utilisateur`).
    pub name: String,
    pub path: Option<PathBuf>,
    pub namespace: Namespace,
    pub tags: Vec<String>,
    pub uses: Vec<FileReference>,
    pub options: FileOptions,
    pub domains: Vec<Domain>,
    pub decorators: Vec<Decorator>,
    pub classes: Vec<Class>,
    pub endpoints: Vec<Endpoint>,
    pub aliases: Vec<Alias>,
    /// Filled by the linker.
    pub resolved_aliases: Vec<ResolvedAlias>,
    /// `uses` entries nothing in the file needed. Filled by the linker.
    pub useless_imports: Vec<FileReference>,
    pub location: Location,
}

impl ModelFile {
    pub fn new(id: FileId, name: impl Into<String>, namespace: Namespace, location: Location) -> Self {
        Self {
            id,
            name: name.into(),
            path: None,
            namespace,
            tags: Vec::new(),
            uses: Vec::new(),
            options: FileOptions::default(),
            domains: Vec::new(),
            decorators: Vec::new(),
            classes: Vec::new(),
            endpoints: Vec::new(),
            aliases: Vec::new(),
            resolved_aliases: Vec::new(),
            useless_imports: Vec::new(),
            location,
        }
    }

    pub fn module(&self) -> &str {
        &self.namespace.module
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Classes brought in by this file's aliases.
    pub fn aliased_classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.resolved_aliases.iter().filter_map(|a| match a.entity {
            AliasedEntity::Class(id) => Some(id),
            AliasedEntity::Endpoint(_) => None,
        })
    }

    /// Endpoints brought in by this file's aliases.
    pub fn aliased_endpoints(&self) -> impl Iterator<Item = EndpointId> + '_ {
        self.resolved_aliases.iter().filter_map(|a| match a.entity {
            AliasedEntity::Endpoint(id) => Some(id),
            AliasedEntity::Class(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
            && self.decorators.is_empty()
            && self.classes.is_empty()
            && self.endpoints.is_empty()
            && self.aliases.is_empty()
    }
}
