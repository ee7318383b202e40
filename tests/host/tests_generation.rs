//! End-to-end runs of the host with a generator writing to disk.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};

use topmodel::generator::{FileGenerator, GeneratorError, GeneratorWatcher, LockFile};
use topmodel::model::ModelFile;
use topmodel::{naming, HostError, ModelHost, ModelStore};

use crate::helpers::model_fixtures::{HABILITATION, PROFIL, Workspace, sample_files};

/// Writes the column names of each class, one file per module.
struct ColumnList {
    tags: Vec<String>,
    out: PathBuf,
}

impl ColumnList {
    fn new(root: &Path) -> Self {
        Self {
            tags: vec!["back".to_string(), "front".to_string()],
            out: root.join("out"),
        }
    }
}

impl FileGenerator for ColumnList {
    fn name(&self) -> &str {
        "ColumnList"
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn output_path(&self, _store: &ModelStore, file: &ModelFile, _tag: &str) -> Option<PathBuf> {
        (!file.classes.is_empty()).then(|| self.out.join(format!("{}.txt", file.module())))
    }

    fn generate(&self, store: &ModelStore, file: &ModelFile, _tag: &str) -> Result<String, GeneratorError> {
        let config = store.naming();
        let mut content = String::new();
        for class in &file.classes {
            let columns: Vec<_> = class
                .properties
                .iter()
                .map(|p| naming::sql_name(store, &config, p.id, None))
                .collect();
            content.push_str(&format!("{}: {}\n", class.name(), columns.join(", ")));
        }
        Ok(content)
    }
}

fn host(workspace: &Workspace) -> ModelHost {
    let mut host = ModelHost::new(workspace.config());
    host.add_watcher(Box::new(GeneratorWatcher::new(ColumnList::new(workspace.root()))));
    host
}

fn output(workspace: &Workspace, module: &str) -> PathBuf {
    workspace.root().join("out").join(format!("{module}.txt"))
}

#[test]
fn test_batch_run_generates_and_locks() {
    let workspace = Workspace::new(&sample_files());
    let summary = host(&workspace).run().unwrap();

    assert_eq!(summary.files, 5);
    assert_eq!(summary.generated.len(), 3);
    assert!(summary.pruned.is_empty());

    let utilisateur = fs::read_to_string(output(&workspace, "Securite.Utilisateur")).unwrap();
    assert!(
        utilisateur.contains("Utilisateur: UTI_ID, UTI_EMAIL, PRO_ID, PRO_ID_SECONDAIRE\n"),
        "{utilisateur}"
    );
    let habilitation = fs::read_to_string(output(&workspace, "Securite.Habilitation")).unwrap();
    assert_eq!(habilitation, "Habilitation: TPR_CODE\n");

    let lock = LockFile::read(&workspace.root().join("topmodel.lock")).unwrap().unwrap();
    assert_eq!(
        lock.generated_files,
        vec![
            "out/Securite.Habilitation.txt",
            "out/Securite.Profil.txt",
            "out/Securite.Utilisateur.txt",
        ]
    );
}

#[test]
fn test_second_run_prunes_stale_outputs() {
    let workspace = Workspace::new(&sample_files());
    host(&workspace).run().unwrap();
    let stale = output(&workspace, "Securite.Habilitation");
    assert!(stale.exists());

    fs::remove_file(workspace.model_path("Securite/Habilitation")).unwrap();
    let summary = host(&workspace).run().unwrap();

    assert_eq!(summary.files, 4);
    assert_eq!(summary.pruned, vec![stale.clone()]);
    assert!(!stale.exists());
    let lock = LockFile::read(&workspace.root().join("topmodel.lock")).unwrap().unwrap();
    assert_eq!(lock.generated_files.len(), 2);
}

#[test]
fn test_batch_run_stops_on_link_errors() {
    let mut files = sample_files();
    files.retain(|(name, _)| *name != "Securite/Profil");
    let workspace = Workspace::new(&files);

    let result = host(&workspace).run();
    let Err(HostError::Link { count, errors }) = result else {
        panic!("expected link errors, got {result:?}");
    };
    assert!(count > 0);
    assert!(!errors.is_empty());
    assert!(!workspace.root().join("out").exists());
    assert!(!workspace.root().join("topmodel.lock").exists());
}

#[test]
fn test_batch_run_stops_on_invalid_file() {
    let mut files = sample_files();
    files.push(("Securite/Casse", "---\nmodule: [\n"));
    let workspace = Workspace::new(&files);

    let result = host(&workspace).run();
    assert!(matches!(result, Err(HostError::Load(_))), "{result:?}");
}

#[test]
fn test_watch_regenerates_dependents() {
    let workspace = Workspace::new(&sample_files());
    let mut host = host(&workspace);
    host.start_watch().unwrap();
    assert!(output(&workspace, "Securite.Utilisateur").exists());

    let path = workspace.write("Securite/Profil", &PROFIL.replace("trigram: PRO\n", "trigram: PRF\n"));
    host.on_file_changed(&path).unwrap();

    let profil = fs::read_to_string(output(&workspace, "Securite.Profil")).unwrap();
    assert!(profil.contains("Profil: PRF_ID, TPR_CODE\n"), "{profil}");
    let utilisateur = fs::read_to_string(output(&workspace, "Securite.Utilisateur")).unwrap();
    assert!(utilisateur.contains("PRF_ID, PRF_ID_SECONDAIRE"), "{utilisateur}");
}

#[test]
fn test_watch_keeps_outputs_while_model_is_broken() {
    let workspace = Workspace::new(&sample_files());
    let mut host = host(&workspace);
    host.start_watch().unwrap();
    let before = fs::read_to_string(output(&workspace, "Securite.Habilitation")).unwrap();

    let broken = HABILITATION.replace("association: TypeProfil", "association: TypeInconnu");
    let path = workspace.write("Securite/Habilitation", &broken);
    host.on_file_changed(&path).unwrap();

    assert!(host.store().has_errors());
    assert_eq!(fs::read_to_string(output(&workspace, "Securite.Habilitation")).unwrap(), before);

    let path = workspace.write("Securite/Habilitation", HABILITATION);
    host.on_file_changed(&path).unwrap();
    assert!(!host.store().has_errors());
}

#[test]
fn test_watch_removal_relinks_dependents() {
    let workspace = Workspace::new(&sample_files());
    let mut host = host(&workspace);
    host.start_watch().unwrap();

    let path = workspace.model_path("Securite/Profil");
    fs::remove_file(&path).unwrap();
    host.on_file_removed(&path).unwrap();

    assert!(host.store().file_by_name("Securite/Profil").is_none());
    assert!(host.store().has_errors());
}
