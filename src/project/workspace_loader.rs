use std::path::Path;

use rayon::prelude::*;

use crate::base::FileId;
use crate::config::ModelConfig;
use crate::error::ModelException;
use crate::store::ModelStore;

use super::collection::{ModelFilePath, collect_model_files, model_file_name};
use super::file_loader;

/// What to do when a file fails to load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// Stop at the first broken file (batch runs).
    #[default]
    FailFast,
    /// Keep going and record the failure on the store (watch mode).
    Collect,
}

/// Loads the model files of a directory into a [`ModelStore`].
#[derive(Clone, Debug)]
pub struct WorkspaceLoader {
    config: ModelConfig,
    mode: LoadMode,
}

impl WorkspaceLoader {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            config: config.clone(),
            mode: LoadMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: LoadMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn root(&self) -> &Path {
        &self.config.model_root
    }

    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    /// Model name of a path under the root, if it is a loadable model file.
    pub fn file_name(&self, path: &Path) -> Option<String> {
        let name = model_file_name(&self.config.model_root, path)?;
        (!self.config.is_ignored(&name)).then_some(name)
    }

    /// Model files under the root, in path order.
    pub fn collect(&self) -> Result<Vec<ModelFilePath>, ModelException> {
        if !self.config.model_root.is_dir() {
            return Err(ModelException::without_location(
                &self.config.model_root.display().to_string(),
                "Le répertoire du modèle est introuvable.",
            ));
        }
        collect_model_files(&self.config.model_root, &self.config.ignored_files).map_err(|e| {
            ModelException::without_location(
                &self.config.model_root.display().to_string(),
                format!("Impossible de parcourir le répertoire du modèle : {e}"),
            )
        })
    }

    /// Load every model file under the root.
    ///
    /// File ids are allocated in path order before parsing, which then runs
    /// in parallel. Returns the number of non-empty files loaded.
    pub fn load_directory(&self, store: &mut ModelStore) -> Result<usize, ModelException> {
        let paths = self.collect()?;
        let jobs: Vec<(FileId, &ModelFilePath)> =
            paths.iter().map(|p| (store.file_id(&p.name), p)).collect();

        let app = store.config().app.clone();
        let naming = store.naming();
        let results: Vec<_> = jobs
            .par_iter()
            .map(|(id, path)| {
                let result = file_loader::load_model_path(*id, &path.name, &path.path, &app, &naming);
                (*id, *path, result)
            })
            .collect();

        let mut loaded = 0;
        for (id, path, result) in results {
            match result {
                Ok(Some(file)) => {
                    tracing::debug!("Loaded {}", path.name);
                    store.insert_file(file);
                    loaded += 1;
                }
                Ok(None) => {
                    tracing::debug!("Skipped empty file {}", path.name);
                    store.remove_file(id);
                }
                Err(error) => self.fail(store, id, error)?,
            }
        }

        tracing::info!("Loaded {} model files from {}", loaded, self.config.model_root.display());
        Ok(loaded)
    }

    /// Load (or reload) a single file. `Ok(None)` when the file is empty,
    /// not a model file, or failed to load in [`LoadMode::Collect`].
    pub fn load_path(&self, store: &mut ModelStore, path: &Path) -> Result<Option<FileId>, ModelException> {
        let Some(name) = self.file_name(path) else {
            return Ok(None);
        };
        let id = store.file_id(&name);
        let naming = store.naming();
        let app = store.config().app.clone();
        match file_loader::load_model_path(id, &name, path, &app, &naming) {
            Ok(Some(file)) => {
                tracing::debug!("Loaded {name}");
                store.insert_file(file);
                Ok(Some(id))
            }
            Ok(None) => {
                store.remove_file(id);
                Ok(None)
            }
            Err(error) => {
                self.fail(store, id, error)?;
                Ok(None)
            }
        }
    }

    fn fail(&self, store: &mut ModelStore, id: FileId, error: ModelException) -> Result<(), ModelException> {
        match self.mode {
            LoadMode::FailFast => Err(error),
            LoadMode::Collect => {
                tracing::warn!("{error}");
                store.set_load_error(id, error);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn workspace(files: &[(&str, &str)]) -> (tempfile::TempDir, ModelConfig) {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let config = ModelConfig {
            model_root: dir.path().to_path_buf(),
            ..ModelConfig::default()
        };
        (dir, config)
    }

    #[test]
    fn test_load_directory() {
        let (_dir, config) = workspace(&[
            ("Commun/Domaines.tmd", "---\nmodule: Commun\n---\ndomain:\n  name: DO_ID\n"),
            ("Securite/Profil.tmd", "---\nmodule: Securite\n---\nclass:\n  name: Profil\n"),
            ("Vide.tmd", ""),
            ("notes.txt", "not a model"),
        ]);
        let mut store = ModelStore::new(config.clone());
        let loaded = WorkspaceLoader::new(&config).load_directory(&mut store).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(store.file_count(), 2);
        let profil = store.lookup_file("Securite/Profil").unwrap();
        assert!(store.lookup_file("Commun/Domaines").unwrap() < profil);
    }

    #[test]
    fn test_fail_fast_reports_first_error() {
        let (_dir, config) = workspace(&[
            ("A.tmd", "---\nmodule: A\n---\nklass: {}\n"),
            ("B.tmd", "---\ntags: []\n"),
        ]);
        let mut store = ModelStore::new(config.clone());
        let err = WorkspaceLoader::new(&config).load_directory(&mut store).unwrap_err();
        assert!(err.label.starts_with("A["));
    }

    #[test]
    fn test_collect_mode_records_errors() {
        let (_dir, config) = workspace(&[
            ("A.tmd", "---\nmodule: A\n---\nklass: {}\n"),
            ("B.tmd", "---\nmodule: B\n"),
        ]);
        let mut store = ModelStore::new(config.clone());
        let loader = WorkspaceLoader::new(&config).with_mode(LoadMode::Collect);
        assert_eq!(loader.load_directory(&mut store).unwrap(), 1);

        store.link();
        let a = store.lookup_file("A").unwrap();
        assert_eq!(
            store.errors_for(a)[0].kind,
            crate::store::ModelErrorType::InvalidFile
        );
    }

    #[test]
    fn test_ignored_files() {
        let (dir, mut config) = workspace(&[
            ("A.tmd", "---\nmodule: A\n"),
            ("B.tmd", "---\nmodule: B\n"),
        ]);
        config.ignored_files = vec!["B".to_string()];
        let loader = WorkspaceLoader::new(&config);
        assert_eq!(loader.file_name(&dir.path().join("B.tmd")), None);
        assert_eq!(loader.file_name(&dir.path().join("A.tmd")).as_deref(), Some("A"));

        let mut store = ModelStore::new(config.clone());
        assert_eq!(loader.load_directory(&mut store).unwrap(), 1);
    }

    #[test]
    fn test_missing_root() {
        let config = ModelConfig {
            model_root: PathBuf::from("/nonexistent/model/root"),
            ..ModelConfig::default()
        };
        assert!(WorkspaceLoader::new(&config).collect().is_err());
    }
}
