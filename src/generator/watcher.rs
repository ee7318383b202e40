use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::base::FileId;
use crate::store::{ErrorsByFile, ModelStore};

use super::{FileGenerator, GeneratorError, run_generator, write_generated};

/// Receives the host's notifications.
pub trait ModelWatcher: Send {
    fn name(&self) -> &str;

    /// Files loaded or changed (with the files depending on them), after a
    /// link without errors.
    fn on_files_changed(&mut self, store: &ModelStore, files: &[FileId]) -> Result<(), GeneratorError>;

    /// Diagnostics of every link, empty once the model is fixed.
    fn on_errors(&mut self, _errors: &ErrorsByFile) {}

    /// Every output produced so far, for the lock file.
    fn generated_files(&self) -> Vec<&Path> {
        Vec::new()
    }
}

/// Runs a [`FileGenerator`] on each change and writes its outputs.
pub struct GeneratorWatcher<G> {
    generator: G,
    generated: BTreeSet<PathBuf>,
}

impl<G: FileGenerator> GeneratorWatcher<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            generated: BTreeSet::new(),
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}

impl<G: FileGenerator> ModelWatcher for GeneratorWatcher<G> {
    fn name(&self) -> &str {
        self.generator.name()
    }

    fn on_files_changed(&mut self, store: &ModelStore, files: &[FileId]) -> Result<(), GeneratorError> {
        let outputs = run_generator(&self.generator, store, files)?;
        let written = write_generated(&outputs)?;
        tracing::info!(
            "{}: {} files generated, {} written",
            self.generator.name(),
            outputs.len(),
            written.len()
        );
        self.generated.extend(outputs.into_iter().map(|o| o.path));
        Ok(())
    }

    fn generated_files(&self) -> Vec<&Path> {
        self.generated.iter().map(PathBuf::as_path).collect()
    }
}
