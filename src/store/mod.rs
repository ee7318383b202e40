//! Model store: the aggregate root of a loaded model.
//!
//! The store owns every loaded [`ModelFile`], links them into one resolved
//! graph and answers the model-wide queries generators need.
//!
//! ## Lifecycle
//!
//! Files are inserted as loaded drafts, with unresolved references. Each
//! call to [`ModelStore::link`] clones the drafts and runs the full link
//! pass over the copy, so relinking after a change is always a complete,
//! repeatable pass. Link problems never abort: they are collected per file
//! and exposed by [`ModelStore::errors`].

mod alias;
mod diagnostics;
mod link;
mod queries;
mod reverse;
mod scope;
mod validate;

use std::collections::BTreeMap;

pub use diagnostics::{
    DiagnosticCollector, ErrorsByFile, LinkReport, ModelError, ModelErrorType, RelatedInfo,
    Severity,
};
pub use reverse::ReverseOptions;

use crate::base::{FileId, FileRegistry, Location};
use crate::config::{ModelConfig, NamingConfig};
use crate::error::ModelException;
use crate::model::{
    Class, ClassId, Decorator, DecoratorId, Domain, DomainId, Endpoint, EndpointId, ModelFile,
    Property, PropertyId, PropertyOwner,
};
use crate::project::file_loader;

/// All loaded model files, their links and their diagnostics.
#[derive(Clone, Debug)]
pub struct ModelStore {
    config: ModelConfig,
    registry: FileRegistry,
    /// Files as loaded, never mutated by linking.
    drafts: BTreeMap<FileId, ModelFile>,
    /// Files that failed to load in watch mode.
    load_errors: BTreeMap<FileId, ModelException>,
    /// Linked copy of `drafts`.
    files: BTreeMap<FileId, ModelFile>,
    errors: ErrorsByFile,
    dirty: bool,
}

impl ModelStore {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            registry: FileRegistry::new(),
            drafts: BTreeMap::new(),
            load_errors: BTreeMap::new(),
            files: BTreeMap::new(),
            errors: ErrorsByFile::new(),
            dirty: false,
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn naming(&self) -> NamingConfig {
        self.config.naming()
    }

    // ========================================================================
    // FILES
    // ========================================================================

    /// Id for a model file name, allocated on first use.
    pub fn file_id(&mut self, name: &str) -> FileId {
        self.registry.intern(name)
    }

    pub fn lookup_file(&self, name: &str) -> Option<FileId> {
        self.registry.get(name)
    }

    pub fn file_name(&self, id: FileId) -> Option<&str> {
        self.registry.name(id)
    }

    /// Insert (or replace) a loaded file. Takes effect at the next link.
    pub fn insert_file(&mut self, file: ModelFile) {
        let id = file.id;
        self.load_errors.remove(&id);
        self.drafts.insert(id, file);
        self.dirty = true;
    }

    /// Forget a file (deleted from disk, or now empty).
    pub fn remove_file(&mut self, id: FileId) -> bool {
        let removed = self.drafts.remove(&id).is_some() | self.load_errors.remove(&id).is_some();
        self.dirty |= removed;
        removed
    }

    /// Record a file that failed to load; it is reported as `TMD0000` and
    /// its previous content is dropped.
    pub fn set_load_error(&mut self, id: FileId, error: ModelException) {
        self.drafts.remove(&id);
        self.load_errors.insert(id, error);
        self.dirty = true;
    }

    /// Load a file from its content and insert it.
    ///
    /// An empty file removes any previous content and returns `Ok(None)`.
    pub fn load_file(&mut self, name: &str, source: &str) -> Result<Option<FileId>, ModelException> {
        let id = self.file_id(name);
        let naming = self.naming();
        match file_loader::load_model_file(id, name, source, &self.config.app, &naming)? {
            Some(file) => {
                self.insert_file(file);
                Ok(Some(id))
            }
            None => {
                self.remove_file(id);
                Ok(None)
            }
        }
    }

    pub fn has_file(&self, id: FileId) -> bool {
        self.drafts.contains_key(&id)
    }

    pub fn file_count(&self) -> usize {
        self.drafts.len()
    }

    /// Loaded files and files that failed to load, in file id order.
    pub fn loaded_file_ids(&self) -> Vec<FileId> {
        let mut ids: Vec<FileId> = self.drafts.keys().chain(self.load_errors.keys()).copied().collect();
        ids.sort();
        ids
    }

    // ========================================================================
    // LINKING
    // ========================================================================

    /// Link every file and collect diagnostics.
    pub fn link(&mut self) -> LinkReport {
        self.files = self.drafts.clone();
        let mut collector = DiagnosticCollector::new();

        for (id, error) in &self.load_errors {
            let location = error
                .location
                .unwrap_or_else(|| Location::point(*id, 0, 0));
            collector.error(ModelErrorType::InvalidFile, location, error.to_string());
        }

        link::link(self, &mut collector);

        let report = LinkReport {
            files: self.files.len(),
            classes: self.files.values().map(|f| f.classes.len()).sum(),
            errors: collector.error_count(),
            warnings: collector.warning_count(),
        };
        self.errors = collector.finish(&self.config.no_warn);
        self.dirty = false;

        tracing::info!(
            "Linked {} files ({} classes): {} errors, {} warnings",
            report.files,
            report.classes,
            report.errors,
            report.warnings
        );
        report
    }

    /// Whether files changed since the last link.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Diagnostics of the last link, by file.
    pub fn errors(&self) -> &ErrorsByFile {
        &self.errors
    }

    pub fn errors_for(&self, file: FileId) -> &[ModelError] {
        self.errors.get(&file).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_errors(&self) -> bool {
        self.errors.values().flatten().any(ModelError::is_error)
    }

    // ========================================================================
    // LINKED MODEL ACCESS
    // ========================================================================

    /// Linked files, in file id order.
    pub fn files(&self) -> impl Iterator<Item = &ModelFile> {
        self.files.values()
    }

    pub fn file(&self, id: FileId) -> Option<&ModelFile> {
        self.files.get(&id)
    }

    pub fn file_by_name(&self, name: &str) -> Option<&ModelFile> {
        self.file(self.registry.get(name)?)
    }

    pub fn class(&self, id: ClassId) -> Option<&Class> {
        self.files.get(&id.file)?.classes.get(id.index())
    }

    pub fn domain(&self, id: DomainId) -> Option<&Domain> {
        self.files.get(&id.file)?.domains.get(id.index())
    }

    pub fn decorator(&self, id: DecoratorId) -> Option<&Decorator> {
        self.files.get(&id.file)?.decorators.get(id.index())
    }

    pub fn endpoint(&self, id: EndpointId) -> Option<&Endpoint> {
        self.files.get(&id.file)?.endpoints.get(id.index())
    }

    pub fn property(&self, id: PropertyId) -> Option<&Property> {
        match id.owner {
            PropertyOwner::Class(class) => self.class(class)?.properties.get(id.index()),
            PropertyOwner::Decorator(decorator) => {
                self.decorator(decorator)?.properties.get(id.index())
            }
            PropertyOwner::EndpointParam(endpoint) => {
                self.endpoint(endpoint)?.params.get(id.index())
            }
            PropertyOwner::EndpointReturn(endpoint) => self.endpoint(endpoint)?.returns.as_ref(),
        }
    }

    /// All classes, file by file in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.files.values().flat_map(|f| f.classes.iter())
    }

    pub fn domains(&self) -> impl Iterator<Item = &Domain> {
        self.files.values().flat_map(|f| f.domains.iter())
    }

    pub fn decorators(&self) -> impl Iterator<Item = &Decorator> {
        self.files.values().flat_map(|f| f.decorators.iter())
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.files.values().flat_map(|f| f.endpoints.iter())
    }

    /// First class with this name, in store order.
    pub fn find_class(&self, name: &str) -> Option<&Class> {
        self.classes().find(|c| c.name() == name)
    }

    pub fn find_domain(&self, name: &str) -> Option<&Domain> {
        self.domains().find(|d| d.name() == name)
    }

    // ========================================================================
    // LINKER ACCESS
    // ========================================================================

    pub(crate) fn files_mut(&mut self) -> &mut BTreeMap<FileId, ModelFile> {
        &mut self.files
    }

    pub(crate) fn class_mut(&mut self, id: ClassId) -> Option<&mut Class> {
        self.files.get_mut(&id.file)?.classes.get_mut(id.index())
    }

    pub(crate) fn property_mut(&mut self, id: PropertyId) -> Option<&mut Property> {
        let file = self.files.get_mut(&id.owner.file())?;
        match id.owner {
            PropertyOwner::Class(class) => file
                .classes
                .get_mut(class.index())?
                .properties
                .get_mut(id.index()),
            PropertyOwner::Decorator(decorator) => file
                .decorators
                .get_mut(decorator.index())?
                .properties
                .get_mut(id.index()),
            PropertyOwner::EndpointParam(endpoint) => file
                .endpoints
                .get_mut(endpoint.index())?
                .params
                .get_mut(id.index()),
            PropertyOwner::EndpointReturn(endpoint) => {
                file.endpoints.get_mut(endpoint.index())?.returns.as_mut()
            }
        }
    }

    /// Properties declared by an owner, if it exists.
    pub(crate) fn owner_properties(&self, owner: PropertyOwner) -> Option<&[Property]> {
        match owner {
            PropertyOwner::Class(id) => Some(&self.class(id)?.properties),
            PropertyOwner::Decorator(id) => Some(&self.decorator(id)?.properties),
            PropertyOwner::EndpointParam(id) => Some(&self.endpoint(id)?.params),
            PropertyOwner::EndpointReturn(id) => {
                self.endpoint(id)?.returns.as_ref().map(std::slice::from_ref)
            }
        }
    }

    pub(crate) fn owner_properties_mut(&mut self, owner: PropertyOwner) -> Option<&mut Vec<Property>> {
        let file = self.files.get_mut(&owner.file())?;
        match owner {
            PropertyOwner::Class(id) => Some(&mut file.classes.get_mut(id.index())?.properties),
            PropertyOwner::Decorator(id) => {
                Some(&mut file.decorators.get_mut(id.index())?.properties)
            }
            PropertyOwner::EndpointParam(id) => Some(&mut file.endpoints.get_mut(id.index())?.params),
            PropertyOwner::EndpointReturn(_) => None,
        }
    }
}

#[cfg(test)]
mod tests;
