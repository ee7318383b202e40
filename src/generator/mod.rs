//! Generator contract.
//!
//! Emitters read the linked [`ModelStore`] and never mutate it. A
//! [`FileGenerator`] renders one output file per (model file, tag) pair;
//! [`run_generator`] picks the pairs, deduplicates them by output path and
//! renders them in parallel. [`ModelWatcher`] is the notification side used
//! by the host, and [`LockFile`] tracks outputs across runs.

mod lockfile;
mod watcher;

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rayon::prelude::*;
use thiserror::Error;

use crate::base::FileId;
use crate::model::ModelFile;
use crate::naming;
use crate::store::ModelStore;

pub use lockfile::{LockFile, LockFileError};
pub use watcher::{GeneratorWatcher, ModelWatcher};

// ============================================================================
// ERRORS
// ============================================================================

/// Errors raised while generating. Any of them aborts the current cycle.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(
        "generator '{generator}' needs a '{language}' implementation for domains: {}",
        domains.join(", ")
    )]
    MissingDomainImplementations {
        generator: String,
        language: String,
        domains: Vec<String>,
    },

    #[error("generator '{generator}' failed on {file}: {message}")]
    Render {
        generator: String,
        file: String,
        message: String,
    },

    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

// ============================================================================
// CONTRACT
// ============================================================================

/// An emitter producing one output file per model file and tag.
pub trait FileGenerator: Send + Sync {
    fn name(&self) -> &str;

    /// Tags handled; a model file is generated for each tag it shares.
    fn tags(&self) -> &[String];

    /// Target language. When set, every domain used by the generated files
    /// must implement it.
    fn language(&self) -> Option<&str> {
        None
    }

    /// Where the output for `file` and `tag` goes, or `None` to skip it.
    fn output_path(&self, store: &ModelStore, file: &ModelFile, tag: &str) -> Option<PathBuf>;

    fn generate(&self, store: &ModelStore, file: &ModelFile, tag: &str) -> Result<String, GeneratorError>;
}

/// One rendered output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
    pub file: FileId,
    pub tag: String,
}

/// Render `generator` over `files` (or every file when empty).
///
/// Each output path is rendered once, from the first (file, tag) pair that
/// produces it. Outputs come back in model file order.
pub fn run_generator(
    generator: &dyn FileGenerator,
    store: &ModelStore,
    files: &[FileId],
) -> Result<Vec<GeneratedFile>, GeneratorError> {
    let selected: Vec<&ModelFile> = if files.is_empty() {
        store.files().collect()
    } else {
        files.iter().filter_map(|id| store.file(*id)).collect()
    };
    let selected: Vec<&ModelFile> = selected
        .into_iter()
        .filter(|f| generator.tags().iter().any(|t| f.has_tag(t)))
        .collect();

    if let Some(language) = generator.language() {
        check_domain_implementations(generator.name(), language, store, &selected)?;
    }

    let mut jobs: IndexMap<PathBuf, (&ModelFile, &str)> = IndexMap::new();
    for file in selected.iter().copied() {
        for tag in generator.tags().iter().filter(|t| file.has_tag(t)) {
            if let Some(path) = generator.output_path(store, file, tag) {
                jobs.entry(path).or_insert((file, tag.as_str()));
            }
        }
    }

    tracing::debug!("Generator '{}': {} outputs", generator.name(), jobs.len());
    jobs.into_iter()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(path, (file, tag))| {
            Ok(GeneratedFile {
                content: generator.generate(store, file, tag)?,
                path,
                file: file.id,
                tag: tag.to_string(),
            })
        })
        .collect()
}

/// Fails with every domain used by `files` that lacks an implementation.
fn check_domain_implementations(
    generator: &str,
    language: &str,
    store: &ModelStore,
    files: &[&ModelFile],
) -> Result<(), GeneratorError> {
    let properties = files.iter().flat_map(|f| {
        f.classes
            .iter()
            .flat_map(|c| c.properties.iter())
            .chain(f.decorators.iter().flat_map(|d| d.properties.iter()))
            .chain(f.endpoints.iter().flat_map(|e| e.params.iter().chain(e.returns.as_ref())))
    });

    let mut missing = BTreeSet::new();
    for property in properties {
        let domains = [
            naming::effective_domain(store, property.id),
            naming::leaf_property(store, property.id).and_then(|leaf| naming::base_domain(store, leaf)),
        ];
        for domain in domains.into_iter().flatten().filter_map(|d| store.domain(d)) {
            if domain.implementation(language).is_none() {
                missing.insert(domain.name().to_string());
            }
        }
    }

    if missing.is_empty() {
        return Ok(());
    }
    Err(GeneratorError::MissingDomainImplementations {
        generator: generator.to_string(),
        language: language.to_string(),
        domains: missing.into_iter().collect(),
    })
}

/// Write outputs whose content changed. Returns the paths written.
pub fn write_generated(files: &[GeneratedFile]) -> Result<Vec<PathBuf>, GeneratorError> {
    let mut written = Vec::new();
    for file in files {
        if std::fs::read_to_string(&file.path).is_ok_and(|current| current == file.content) {
            continue;
        }
        write_file(&file.path, &file.content)?;
        tracing::info!("Wrote {}", file.path.display());
        written.push(file.path.clone());
    }
    Ok(written)
}

fn write_file(path: &Path, content: &str) -> Result<(), GeneratorError> {
    let io_error = |source: io::Error| GeneratorError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(path, content).map_err(io_error)
}
