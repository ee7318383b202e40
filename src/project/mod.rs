//! Project loading: model files on disk into a [`ModelStore`](crate::store::ModelStore).
//!
//! ```text
//! collection        → find `.tmd` files, compute their model names
//! file_loader       → one file's events into a ModelFile draft
//! workspace_loader  → a whole directory, parsed in parallel
//! ```

pub mod collection;
pub mod file_loader;
pub mod workspace_loader;

pub use collection::{MODEL_FILE_EXTENSION, ModelFilePath, collect_model_files, model_file_name};
pub use file_loader::{load_model_file, load_model_path};
pub use workspace_loader::{LoadMode, WorkspaceLoader};
