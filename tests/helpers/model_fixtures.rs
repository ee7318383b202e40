//! A small but complete model, spread over several files.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use topmodel::{ModelConfig, ModelStore};

pub const DOMAINES: &str = r#"---
module: Commun
tags:
  - back
---
domain:
  name: DO_ID
  autoGeneratedValue: true
  csharp:
    type: int
  ts:
    type: number
---
domain:
  name: DO_CODE
  length: 3
  csharp:
    type: string
  ts:
    type: string
  asDomains:
    list: DO_CODE_LIST
---
domain:
  name: DO_LIBELLE
  length: 100
  csharp:
    type: string
  ts:
    type: string
---
domain:
  name: DO_CODE_LIST
  csharp:
    type: "{T}[]"
  ts:
    type: "{T}[]"
"#;

pub const DECORATEURS: &str = r#"---
module: Commun
---
decorator:
  name: Audit
  description: Champs d'audit
  csharp:
    implements:
      - IAuditable
  properties:
    - name: DateCreation
      domain: DO_LIBELLE
"#;

pub const PROFIL: &str = r#"---
module: Securite.Profil
tags:
  - back
uses:
  - Commun/Decorateurs
---
class:
  name: TypeProfil
  trigram: TPR
  reference: true
  defaultProperty: Libelle
  properties:
    - name: Code
      primaryKey: true
      domain: DO_CODE
      required: true
    - name: Libelle
      domain: DO_LIBELLE
      required: true
  values:
    Admin:
      Code: ADM
      Libelle: Administrateur
    Gestionnaire:
      Code: GES
      Libelle: Gestionnaire
---
class:
  name: Profil
  trigram: PRO
  decorators:
    - Audit
  properties:
    - name: Id
      primaryKey: true
      domain: DO_ID
    - association: TypeProfil
      required: true
  unique:
    - [TypeProfilCode]
"#;

pub const UTILISATEUR: &str = r#"---
module: Securite.Utilisateur
tags:
  - back
  - front
uses:
  - Securite/Profil
---
class:
  name: Utilisateur
  trigram: UTI
  properties:
    - name: Id
      primaryKey: true
      domain: DO_ID
    - name: Email
      domain: DO_LIBELLE
      required: true
    - association: Profil
    - association: Profil
      type: manyToMany
      role: Secondaire
---
class:
  name: UtilisateurDto
  properties:
    - alias:
        class: Utilisateur
        include:
          - Email
          - ProfilId
    - alias:
        class: Profil
        property: TypeProfilCode
      as: list
---
endpoint:
  name: GetUtilisateur
  method: GET
  route: utilisateur/{utiId}
  params:
    - alias:
        class: Utilisateur
        property: Id
      name: UtiId
    - name: Filtre
      domain: DO_LIBELLE
  returns:
    composition: UtilisateurDto
    name: Utilisateur
"#;

pub const HABILITATION: &str = r#"---
module: Securite.Habilitation
tags:
  - front
---
alias:
  file: Securite/Profil
  classes:
    - TypeProfil
---
class:
  name: Habilitation
  properties:
    - association: TypeProfil
"#;

/// The sample model, by model file name.
pub fn sample_files() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Commun/Domaines", DOMAINES),
        ("Commun/Decorateurs", DECORATEURS),
        ("Securite/Profil", PROFIL),
        ("Securite/Utilisateur", UTILISATEUR),
        ("Securite/Habilitation", HABILITATION),
    ]
}

/// Load and link files into a new store.
pub fn linked_store(config: ModelConfig, files: &[(&str, &str)]) -> ModelStore {
    let mut store = ModelStore::new(config);
    for (name, source) in files {
        store
            .load_file(name, source)
            .unwrap_or_else(|e| panic!("cannot load {name}: {e}"));
    }
    store.link();
    store
}

pub fn sample_store() -> ModelStore {
    linked_store(ModelConfig::default(), &sample_files())
}

/// A model directory on disk.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new(files: &[(&str, &str)]) -> Self {
        let workspace = Self {
            dir: tempfile::tempdir().expect("temp dir"),
        };
        for (name, source) in files {
            workspace.write(name, source);
        }
        workspace
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a model file name (`Folder/File`).
    pub fn model_path(&self, name: &str) -> PathBuf {
        self.root().join(format!("{name}.tmd"))
    }

    pub fn write(&self, name: &str, source: &str) -> PathBuf {
        let path = self.model_path(name);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("create dir");
        std::fs::write(&path, source).expect("write model file");
        path
    }

    pub fn config(&self) -> ModelConfig {
        ModelConfig {
            app: "Demo".to_string(),
            model_root: self.root().to_path_buf(),
            ..ModelConfig::default()
        }
    }
}
