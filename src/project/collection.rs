use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extension of model files.
pub const MODEL_FILE_EXTENSION: &str = "tmd";

/// A model file found on disk, with its model-relative name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelFilePath {
    /// `Folder/File`, without extension, `/` separated on every platform.
    pub name: String,
    pub path: PathBuf,
}

/// Model name of a file under `root`, or `None` if it is not a model file.
pub fn model_file_name(root: &Path, path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some(MODEL_FILE_EXTENSION) {
        return None;
    }
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    let segments: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(segments.join("/"))
}

/// Recursively collect model files under `root`, sorted by path.
pub fn collect_model_files(root: &Path, ignored: &[String]) -> io::Result<Vec<ModelFilePath>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = model_file_name(root, entry.path()) else {
            continue;
        };
        if ignored.iter().any(|i| *i == name) {
            tracing::debug!("Ignoring model file {name}");
            continue;
        }
        files.push(ModelFilePath {
            name,
            path: entry.into_path(),
        });
    }
    Ok(files)
}
