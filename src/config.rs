//! Model configuration (`topmodel.config`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::ModelErrorType;

/// Errors that can occur while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Settings shared by loading, linking and generation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelConfig {
    /// Application name, the first part of every namespace.
    pub app: String,
    /// Directory holding the `.tmd` files. Relative to the config file.
    pub model_root: PathBuf,
    pub lock_file_name: String,
    /// Warning codes to drop (`TMD9001`, ...).
    pub no_warn: Vec<ModelErrorType>,
    /// Derive table names from the plural class name.
    pub pluralize_table_names: bool,
    /// Derived association names put the role first (`{Role}{Pk}`).
    pub use_legacy_role_names: bool,
    /// Allow classes with more than one primary key property.
    pub allow_composite_primary_key: bool,
    /// Model file names (`Folder/File`) skipped by directory loading.
    pub ignored_files: Vec<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            app: String::new(),
            model_root: PathBuf::from("."),
            lock_file_name: "topmodel.lock".to_string(),
            no_warn: Vec::new(),
            pluralize_table_names: false,
            use_legacy_role_names: false,
            allow_composite_primary_key: false,
            ignored_files: Vec::new(),
        }
    }
}

impl ModelConfig {
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Read a config file; `modelRoot` is made relative to its directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml(&source)?;
        if config.model_root.is_relative() {
            let base = path.parent().unwrap_or(Path::new("."));
            config.model_root = base.join(&config.model_root);
        }
        tracing::debug!(
            "Loaded config {} (app '{}', root {})",
            path.display(),
            config.app,
            config.model_root.display()
        );
        Ok(config)
    }

    pub fn naming(&self) -> NamingConfig {
        NamingConfig {
            pluralize_table_names: self.pluralize_table_names,
            use_legacy_role_names: self.use_legacy_role_names,
            allow_composite_primary_key: self.allow_composite_primary_key,
        }
    }

    pub fn lock_file_path(&self) -> PathBuf {
        self.model_root.join(&self.lock_file_name)
    }

    pub fn is_ignored(&self, file_name: &str) -> bool {
        self.ignored_files.iter().any(|f| f == file_name)
    }

    pub fn is_suppressed(&self, kind: ModelErrorType) -> bool {
        self.no_warn.contains(&kind)
    }
}

/// The naming switches, passed explicitly to the loader and resolver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NamingConfig {
    pub pluralize_table_names: bool,
    pub use_legacy_role_names: bool,
    pub allow_composite_primary_key: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_to_missing_keys() {
        let config = ModelConfig::from_yaml("app: Demo\npluralizeTableNames: true\n").unwrap();
        assert_eq!(config.app, "Demo");
        assert_eq!(config.lock_file_name, "topmodel.lock");
        assert!(config.naming().pluralize_table_names);
        assert!(!config.naming().allow_composite_primary_key);
    }

    #[test]
    fn test_no_warn_codes() {
        let config = ModelConfig::from_yaml("noWarn: [TMD9001, TMD9004]\n").unwrap();
        assert!(config.is_suppressed(ModelErrorType::UnusedImport));
        assert!(config.is_suppressed(ModelErrorType::UnusedDomain));
        assert!(!config.is_suppressed(ModelErrorType::DuplicateTrigram));
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        assert!(ModelConfig::from_yaml("noWarn: [TMD4242]\n").is_err());
    }

    #[test]
    fn test_load_resolves_model_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topmodel.config");
        std::fs::write(&path, "app: Demo\nmodelRoot: model\n").unwrap();
        let config = ModelConfig::load(&path).unwrap();
        assert_eq!(config.model_root, dir.path().join("model"));
        assert_eq!(config.lock_file_path(), dir.path().join("model").join("topmodel.lock"));
    }
}
