//! The lock file: outputs of the previous run, used to prune stale ones.

use std::io;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LockFileError {
    #[error("cannot access lock file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid lock file {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Generated paths, relative to the model root and `/` separated (`..`
/// kept for outputs outside it), plus the version that generated them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockFile {
    pub version: String,
    #[serde(default)]
    pub generated_files: Vec<String>,
}

impl LockFile {
    /// Lock file for this run; paths are made relative to `root`.
    pub fn new<'a>(root: &Path, generated: impl IntoIterator<Item = &'a Path>) -> Self {
        let mut generated_files: Vec<String> = generated
            .into_iter()
            .map(|path| relative_name(root, path))
            .collect();
        generated_files.sort();
        generated_files.dedup();
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_files,
        }
    }

    /// Read a lock file; `Ok(None)` when it does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>, LockFileError> {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(LockFileError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_yaml::from_str(&source)
            .map(Some)
            .map_err(|source| LockFileError::Yaml {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn write(&self, path: &Path) -> Result<(), LockFileError> {
        let content = serde_yaml::to_string(self).map_err(|source| LockFileError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, content).map_err(|source| LockFileError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Files of `previous` no longer generated.
    pub fn stale_files<'a>(&self, previous: &'a LockFile) -> Vec<&'a str> {
        previous
            .generated_files
            .iter()
            .filter(|f| !self.generated_files.contains(*f))
            .map(String::as_str)
            .collect()
    }

    /// Delete the stale files of `previous` under `root`. Files already gone
    /// are skipped, and so are entries this lock file would not have written
    /// for the path they resolve to. Returns the paths deleted.
    pub fn prune(&self, previous: &LockFile, root: &Path) -> Result<Vec<PathBuf>, LockFileError> {
        let mut deleted = Vec::new();
        for stale in self.stale_files(previous) {
            let Some(path) = resolve_entry(root, stale) else {
                tracing::warn!("Ignoring lock file entry {stale}");
                continue;
            };
            match std::fs::remove_file(&path) {
                Ok(()) => {
                    tracing::info!("Deleted stale file {}", path.display());
                    deleted.push(path);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(LockFileError::Io { path, source }),
            }
        }
        Ok(deleted)
    }
}

// ============================================================================
// PATHS
// ============================================================================

/// `path` relative to `root`, `/` separated, with `..` where it leaves
/// `root`. Falls back to the normalized path when the two share no base.
fn relative_name(root: &Path, path: &Path) -> String {
    let root = normalize(root);
    let path = normalize(path);
    let common = root.iter().zip(&path).take_while(|(a, b)| a == b).count();

    let unrelated = root.first().map(is_anchor) != path.first().map(is_anchor)
        || (common == 0 && path.first().is_some_and(is_anchor))
        || root[common..].iter().any(|c| *c == Component::ParentDir);
    if unrelated {
        return render(&path);
    }

    let mut parts: Vec<Component<'_>> = vec![Component::ParentDir; root.len() - common];
    parts.extend_from_slice(&path[common..]);
    render(&parts)
}

/// Path a lock file entry stands for, if writing that path back gives the
/// same entry.
fn resolve_entry(root: &Path, entry: &str) -> Option<PathBuf> {
    if entry.is_empty() {
        return None;
    }
    let path = if Path::new(entry).is_absolute() {
        PathBuf::from(entry)
    } else {
        root.join(entry)
    };
    (relative_name(root, &path) == entry).then_some(path)
}

/// Lexical normalization: `.` dropped, `name/..` folded.
fn normalize(path: &Path) -> Vec<Component<'_>> {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir if matches!(components.last(), Some(Component::Normal(_))) => {
                components.pop();
            }
            Component::ParentDir if components.last().is_some_and(is_anchor) => {}
            _ => components.push(component),
        }
    }
    components
}

fn is_anchor(component: &Component<'_>) -> bool {
    matches!(component, Component::Prefix(_) | Component::RootDir)
}

fn render(components: &[Component<'_>]) -> String {
    let mut rendered = String::new();
    for component in components {
        match component {
            Component::Prefix(prefix) => rendered.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::RootDir => rendered.push('/'),
            other => {
                if !rendered.is_empty() && !rendered.ends_with('/') {
                    rendered.push('/');
                }
                rendered.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    rendered
}
