#![allow(clippy::unwrap_used, clippy::expect_used)]

use topmodel::ModelConfig;
use topmodel::project::{LoadMode, WorkspaceLoader};
use topmodel::store::ModelStore;

use crate::helpers::diagnostic_helpers::assert_no_errors;
use crate::helpers::model_fixtures::{Workspace, sample_files};

#[test]
fn test_load_sample_directory() {
    let workspace = Workspace::new(&sample_files());
    let config = workspace.config();
    let mut store = ModelStore::new(config.clone());

    let loaded = WorkspaceLoader::new(&config).load_directory(&mut store).unwrap();
    assert_eq!(loaded, 5);

    let report = store.link();
    assert_no_errors(&store);
    assert_eq!(report.files, 5);
    assert_eq!(report.classes, 5);

    let file = store.file_by_name("Securite/Utilisateur").unwrap();
    assert_eq!(file.path.as_deref(), Some(workspace.model_path("Securite/Utilisateur").as_path()));
    assert_eq!(file.namespace.app, "Demo");
}

#[test]
fn test_config_file_drives_loading() {
    let workspace = Workspace::new(&sample_files());
    std::fs::create_dir_all(workspace.root().join("config")).unwrap();
    let config_path = workspace.root().join("config/topmodel.config");
    std::fs::write(
        &config_path,
        "app: Demo\nmodelRoot: ..\nignoredFiles:\n  - Securite/Habilitation\nnoWarn:\n  - TMD9004\n",
    )
    .unwrap();

    let config = ModelConfig::load(&config_path).unwrap();
    assert!(config.is_ignored("Securite/Habilitation"));
    let mut store = ModelStore::new(config.clone());
    let loaded = WorkspaceLoader::new(&config).load_directory(&mut store).unwrap();
    assert_eq!(loaded, 4);
    assert!(store.lookup_file("Securite/Habilitation").is_none());
}

#[test]
fn test_collect_mode_keeps_loading() {
    let mut files = sample_files();
    files.push(("Securite/Casse", "---\nmodule: Securite\n---\nclasse:\n  name: X\n"));
    let workspace = Workspace::new(&files);
    let config = workspace.config();

    let mut store = ModelStore::new(config.clone());
    let err = WorkspaceLoader::new(&config).load_directory(&mut store).unwrap_err();
    assert!(err.label.starts_with("Securite/Casse"));

    let mut store = ModelStore::new(config.clone());
    let loaded = WorkspaceLoader::new(&config)
        .with_mode(LoadMode::Collect)
        .load_directory(&mut store)
        .unwrap();
    assert_eq!(loaded, 5);
    store.link();
    assert!(store.has_errors());
}
