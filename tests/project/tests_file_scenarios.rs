#![allow(clippy::unwrap_used, clippy::expect_used)]

use topmodel::FileId;
use topmodel::config::NamingConfig;
use topmodel::model::PropertyKind;
use topmodel::project::load_model_file;

fn load(source: &str) -> Result<Option<topmodel::model::ModelFile>, topmodel::ModelException> {
    load_model_file(FileId::new(0), "Test/Foo", source, "Demo", &NamingConfig::default())
}

#[test]
fn test_minimal_class_load() {
    let source = "---\nmodule: Test\n---\nclass:\n  name: Foo\n  trigram: FOO\n  properties:\n    - name: Id\n      primaryKey: true\n      domain: DO_ID\n      required: true\n";
    let file = load(source).unwrap().unwrap();

    assert_eq!(file.classes.len(), 1);
    let class = &file.classes[0];
    assert_eq!(class.name(), "Foo");
    assert_eq!(class.sql_name, "FOO");
    assert_eq!(class.label, "Foo");
    assert_eq!(class.trigram(), Some("FOO"));
    assert_eq!(class.namespace.app, "Demo");

    let PropertyKind::Regular(id) = &class.properties[0].kind else {
        panic!("expected a regular property");
    };
    assert!(id.primary_key && id.required);
    assert_eq!(id.domain.name(), "DO_ID");
    assert!(!id.domain.is_resolved());
}

#[test]
fn test_pluralized_table_name() {
    let source = "---\nmodule: Test\n---\nclass:\n  name: TypeProfil\n";
    let naming = NamingConfig {
        pluralize_table_names: true,
        ..NamingConfig::default()
    };
    let file = load_model_file(FileId::new(0), "Test/Foo", source, "", &naming)
        .unwrap()
        .unwrap();
    assert_eq!(file.classes[0].plural_name, "TypeProfils");
    assert_eq!(file.classes[0].sql_name, "TYPE_PROFILS");
}

#[test]
fn test_missing_required_initializer() {
    let source = "---\nmodule: Test\n---\nclass:\n  name: Statut\n  properties:\n    - name: Code\n      primaryKey: true\n      domain: DO_CODE\n    - name: Libelle\n      domain: DO_LIBELLE\n      required: true\n  values:\n    Actif:\n      Code: ACT\n";
    let err = load(source).unwrap_err();
    assert!(err.message.contains("Actif"), "{err}");
    assert!(err.message.contains("Libelle"), "{err}");
    assert!(err.location.is_some());
}

#[test]
fn test_unknown_top_level_key() {
    let source = "---\nmodule: Test\n---\nclass:\n  name: Foo\n---\nenumeration:\n  name: Bar\n";
    let err = load(source).unwrap_err();
    assert!(err.message.contains("Type de document inconnu"));
    assert!(err.message.contains("enumeration"));
    assert!(err.label.starts_with("Test/Foo[7,"));
}

#[test]
fn test_invalid_yaml_is_a_load_error() {
    let err = load("---\nmodule: Test\n---\nclass:\n  name: [Foo\n").unwrap_err();
    assert!(err.label.starts_with("Test/Foo"));
}
