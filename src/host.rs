//! Orchestration of load, link and generation.
//!
//! [`ModelHost`] owns the store and the watchers. A batch [`run`](ModelHost::run)
//! stops at the first broken file and refuses to generate from a model
//! with errors. Watch mode ([`start_watch`](ModelHost::start_watch),
//! [`on_file_changed`](ModelHost::on_file_changed),
//! [`on_file_removed`](ModelHost::on_file_removed)) records broken files as
//! diagnostics instead, relinks the whole store on every change and
//! regenerates once the model is clean again.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::base::FileId;
use crate::config::ModelConfig;
use crate::error::ModelException;
use crate::generator::{GeneratorError, LockFile, LockFileError, ModelWatcher};
use crate::project::{LoadMode, WorkspaceLoader};
use crate::store::{ErrorsByFile, ModelStore};

#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Load(#[from] ModelException),

    #[error("the model has {count} errors")]
    Link { count: usize, errors: ErrorsByFile },

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    LockFile(#[from] LockFileError),
}

/// Outcome of a batch run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub warnings: usize,
    pub generated: Vec<PathBuf>,
    pub pruned: Vec<PathBuf>,
}

/// Owns the model and drives the watchers.
pub struct ModelHost {
    store: ModelStore,
    loader: WorkspaceLoader,
    watchers: Vec<Box<dyn ModelWatcher>>,
    /// Files changed since watchers were last notified.
    pending: BTreeSet<FileId>,
}

impl ModelHost {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            loader: WorkspaceLoader::new(&config),
            store: ModelStore::new(config),
            watchers: Vec::new(),
            pending: BTreeSet::new(),
        }
    }

    pub fn add_watcher(&mut self, watcher: Box<dyn ModelWatcher>) {
        self.watchers.push(watcher);
    }

    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    // ========================================================================
    // BATCH
    // ========================================================================

    /// Load every file, link, generate, then update the lock file.
    pub fn run(&mut self) -> Result<RunSummary, HostError> {
        self.loader = self.loader.clone().with_mode(LoadMode::FailFast);
        let files = self.loader.load_directory(&mut self.store)?;
        let report = self.store.link();
        self.publish_errors();
        if !report.is_ok() {
            return Err(HostError::Link {
                count: report.errors,
                errors: self.store.errors().clone(),
            });
        }

        let all: Vec<FileId> = self.store.files().map(|f| f.id).collect();
        for watcher in &mut self.watchers {
            tracing::debug!("Running {}", watcher.name());
            watcher.on_files_changed(&self.store, &all)?;
        }

        let lock_path = self.store.config().lock_file_path();
        let root = self.loader.root().to_path_buf();
        let generated: Vec<PathBuf> = self
            .watchers
            .iter()
            .flat_map(|w| w.generated_files())
            .map(Path::to_path_buf)
            .collect();
        let lock = LockFile::new(&root, generated.iter().map(PathBuf::as_path));
        let pruned = match LockFile::read(&lock_path)? {
            Some(previous) => lock.prune(&previous, &root)?,
            None => Vec::new(),
        };
        lock.write(&lock_path)?;

        Ok(RunSummary {
            files,
            warnings: report.warnings,
            generated,
            pruned,
        })
    }

    // ========================================================================
    // WATCH MODE
    // ========================================================================

    /// Initial load of a watch session.
    pub fn start_watch(&mut self) -> Result<(), HostError> {
        self.loader = self.loader.clone().with_mode(LoadMode::Collect);
        self.loader.load_directory(&mut self.store)?;
        let all = self.store.loaded_file_ids();
        self.relink(&all)
    }

    /// A model file was created or modified.
    pub fn on_file_changed(&mut self, path: &Path) -> Result<(), HostError> {
        let Some(name) = self.loader.file_name(path) else {
            return Ok(());
        };
        tracing::debug!("File changed: {name}");
        self.loader.load_path(&mut self.store, path)?;
        let id = self.store.file_id(&name);
        self.relink(&[id])
    }

    /// A model file was deleted.
    pub fn on_file_removed(&mut self, path: &Path) -> Result<(), HostError> {
        let Some(id) = self.loader.file_name(path).and_then(|n| self.store.lookup_file(&n)) else {
            return Ok(());
        };
        tracing::debug!("File removed: {}", path.display());
        // Dependents are only known from the links made before removal.
        let mut dependents = self.with_dependents(id);
        dependents.retain(|f| *f != id);
        self.pending.remove(&id);
        self.store.remove_file(id);
        self.relink(&dependents)
    }

    /// Relink everything. Once the model is clean, notify for every file
    /// changed since the last notification, with its dependents.
    fn relink(&mut self, changed: &[FileId]) -> Result<(), HostError> {
        self.pending.extend(changed.iter().copied());
        let report = self.store.link();
        self.publish_errors();
        if !report.is_ok() || self.pending.is_empty() {
            return Ok(());
        }

        let affected: BTreeSet<FileId> = self
            .pending
            .iter()
            .flat_map(|file| self.with_dependents(*file))
            .filter(|file| self.store.file(*file).is_some())
            .collect();
        let affected: Vec<FileId> = affected.into_iter().collect();
        for watcher in &mut self.watchers {
            if let Err(error) = watcher.on_files_changed(&self.store, &affected) {
                tracing::error!("{}: {error}", watcher.name());
                return Err(error.into());
            }
        }
        self.pending.clear();
        Ok(())
    }

    fn publish_errors(&mut self) {
        for watcher in &mut self.watchers {
            watcher.on_errors(self.store.errors());
        }
    }

    /// `file` and the linked files using or aliasing it, transitively.
    fn with_dependents(&self, file: FileId) -> Vec<FileId> {
        let mut result = vec![file];
        let mut seen: FxHashSet<FileId> = FxHashSet::default();
        seen.insert(file);
        let mut index = 0;
        while let Some(current) = result.get(index).copied() {
            index += 1;
            for candidate in self.store.files() {
                let depends = candidate.uses.iter().any(|u| u.target() == Some(current))
                    || candidate.aliases.iter().any(|a| a.file.target() == Some(current));
                if depends && seen.insert(candidate.id) {
                    result.push(candidate.id);
                }
            }
        }
        result
    }
}
