#![allow(clippy::unwrap_used, clippy::expect_used)]

use rstest::rstest;

use super::*;
use crate::config::ModelConfig;
use crate::model::{AssociationType, PropertyKind};

const DOMAINS: &str = r#"---
module: Commun
---
domain:
  name: DO_ID
  autoGeneratedValue: true
  csharp:
    type: int?
---
domain:
  name: DO_CODE
  csharp:
    type: string
  asDomains:
    list: DO_CODE_LIST
---
domain:
  name: DO_CODE_LIST
  csharp:
    type: "{T}[]"
---
domain:
  name: DO_TEXTE
  bodyParam: true
  csharp:
    type: string
"#;

fn linked_with(config: ModelConfig, files: &[(&str, &str)]) -> ModelStore {
    let mut store = ModelStore::new(config);
    store.load_file("Commun/Domaines", DOMAINS).unwrap();
    for (name, source) in files {
        store.load_file(name, source).unwrap();
    }
    store.link();
    store
}

fn linked(files: &[(&str, &str)]) -> ModelStore {
    linked_with(ModelConfig::default(), files)
}

fn kinds(store: &ModelStore) -> Vec<ModelErrorType> {
    store.errors().values().flatten().map(|e| e.kind).collect()
}

fn count(store: &ModelStore, kind: ModelErrorType) -> usize {
    kinds(store).into_iter().filter(|k| *k == kind).count()
}

fn class_file(module: &str, uses: &[&str], body: &str) -> String {
    let mut source = format!("---\nmodule: {module}\n");
    if !uses.is_empty() {
        source.push_str("uses:\n");
        for used in uses {
            source.push_str(&format!("  - {used}\n"));
        }
    }
    source.push_str(body);
    source
}

const PROFIL: &str = r#"---
class:
  name: Profil
  trigram: PRO
  properties:
    - name: Id
      primaryKey: true
      domain: DO_ID
    - name: Code
      domain: DO_CODE
      required: true
"#;

const UTILISATEUR: &str = r#"---
class:
  name: Utilisateur
  trigram: UTI
  properties:
    - name: Id
      primaryKey: true
      domain: DO_ID
    - association: Profil
      required: true
"#;

// ============================================================================
// CROSS-FILE RESOLUTION
// ============================================================================

#[test]
fn test_association_across_files() {
    let profil = class_file("Securite", &[], PROFIL);
    let utilisateur = class_file("Securite", &["Securite/Profil"], UTILISATEUR);
    let store = linked(&[("Securite/Profil", &profil), ("Securite/Utilisateur", &utilisateur)]);

    assert!(!store.has_errors(), "{:?}", store.errors());
    let target = store.find_class("Profil").unwrap().id;
    let utilisateur = store.find_class("Utilisateur").unwrap();
    let association = utilisateur.properties[1].as_association().unwrap();
    assert_eq!(association.association.target(), Some(target));

    let file = store.file_by_name("Securite/Utilisateur").unwrap();
    assert!(file.uses[0].is_resolved());
    assert!(file.useless_imports.is_empty());
    assert_eq!(store.referenced_classes(file.id), vec![target]);
}

#[test]
fn test_class_needs_uses() {
    let profil = class_file("Securite", &[], PROFIL);
    let utilisateur = class_file("Securite", &[], UTILISATEUR);
    let store = linked(&[("Securite/Profil", &profil), ("Securite/Utilisateur", &utilisateur)]);
    assert_eq!(count(&store, ModelErrorType::ClassNotFound), 1);

    let utilisateur = store.find_class("Utilisateur").unwrap();
    let error = &store.errors_for(utilisateur.file())[0];
    assert_eq!(error.kind, ModelErrorType::ClassNotFound);
    assert!(error.message.contains("Profil"));
}

#[test]
fn test_unknown_and_duplicate_uses() {
    let profil = class_file("Securite", &[], PROFIL);
    let utilisateur = class_file(
        "Securite",
        &["Securite/Profil", "Securite/Profil", "Securite/Inconnu"],
        UTILISATEUR,
    );
    let store = linked(&[("Securite/Profil", &profil), ("Securite/Utilisateur", &utilisateur)]);
    assert_eq!(count(&store, ModelErrorType::DuplicateUse), 1);
    assert_eq!(count(&store, ModelErrorType::FileNotFound), 1);
    assert_eq!(count(&store, ModelErrorType::ClassNotFound), 0);
}

#[test]
fn test_circular_uses() {
    let a = class_file(
        "A",
        &["B/B"],
        "---\nclass:\n  name: A\n  properties:\n    - composition: B\n      name: Bs\n",
    );
    let b = class_file(
        "B",
        &["A/A"],
        "---\nclass:\n  name: B\n  properties:\n    - composition: A\n      name: As\n",
    );
    let store = linked(&[("A/A", &a), ("B/B", &b)]);
    assert_eq!(count(&store, ModelErrorType::CircularDependency), 1);
    let error = store
        .errors()
        .values()
        .flatten()
        .find(|e| e.kind == ModelErrorType::CircularDependency)
        .unwrap();
    assert!(error.message.contains("A/A -> B/B -> A/A"));
}

#[test]
fn test_unknown_domain_and_decorator() {
    let source = class_file(
        "Test",
        &[],
        "---\nclass:\n  name: Foo\n  decorators:\n    - Inconnu\n  properties:\n    - name: Id\n      domain: DO_INCONNU\n",
    );
    let store = linked(&[("Test/Foo", &source)]);
    assert_eq!(count(&store, ModelErrorType::DomainNotFound), 1);
    assert_eq!(count(&store, ModelErrorType::DecoratorNotFound), 1);
}

// ============================================================================
// WARNINGS
// ============================================================================

#[test]
fn test_unused_import_warning() {
    let profil = class_file("Securite", &[], PROFIL);
    let other = class_file(
        "Securite",
        &["Securite/Profil"],
        "---\nclass:\n  name: Autre\n  properties:\n    - name: Code\n      domain: DO_CODE\n",
    );
    let store = linked(&[("Securite/Profil", &profil), ("Securite/Autre", &other)]);

    assert_eq!(count(&store, ModelErrorType::UnusedImport), 1);
    assert!(!store.has_errors());
    let file = store.file_by_name("Securite/Autre").unwrap();
    assert_eq!(file.useless_imports.len(), 1);
    assert_eq!(file.useless_imports[0].name(), "Securite/Profil");
}

#[test]
fn test_unused_domain_warning() {
    let store = linked(&[]);
    // Only DO_CODE_LIST is referenced (by DO_CODE's asDomains).
    assert_eq!(count(&store, ModelErrorType::UnusedDomain), 3);
    assert!(!store.has_errors());
}

#[test]
fn test_no_warn_suppresses_warnings_only() {
    let config = ModelConfig {
        no_warn: vec![ModelErrorType::UnusedDomain, ModelErrorType::DomainNotFound],
        ..ModelConfig::default()
    };
    let source = class_file(
        "Test",
        &[],
        "---\nclass:\n  name: Foo\n  properties:\n    - name: Id\n      domain: DO_INCONNU\n",
    );
    let store = linked_with(config, &[("Test/Foo", &source)]);
    assert_eq!(count(&store, ModelErrorType::UnusedDomain), 0);
    assert_eq!(count(&store, ModelErrorType::DomainNotFound), 1);
}

// ============================================================================
// VALIDATION
// ============================================================================

#[test]
fn test_duplicate_trigram_reported_once() {
    let source = class_file(
        "Test",
        &[],
        "---\nclass:\n  name: Foo\n  trigram: ABC\n  properties:\n    - name: Id\n      domain: DO_ID\n---\nclass:\n  name: Bar\n  trigram: ABC\n  properties:\n    - name: Id\n      domain: DO_ID\n",
    );
    let store = linked(&[("Test/Foo", &source)]);
    assert_eq!(count(&store, ModelErrorType::DuplicateTrigram), 1);
    let error = store
        .errors()
        .values()
        .flatten()
        .find(|e| e.kind == ModelErrorType::DuplicateTrigram)
        .unwrap();
    assert!(error.message.contains("Bar"));
    assert_eq!(error.related.len(), 1);
}

#[test]
fn test_duplicate_class_in_module() {
    let a = class_file("Test", &[], "---\nclass:\n  name: Foo\n");
    let b = class_file("Test", &[], "---\nclass:\n  name: Foo\n");
    let c = class_file("Autre", &[], "---\nclass:\n  name: Foo\n");
    let store = linked(&[("Test/A", &a), ("Test/B", &b), ("Autre/C", &c)]);
    assert_eq!(count(&store, ModelErrorType::DuplicateClass), 1);
}

#[test]
fn test_duplicate_property() {
    let source = class_file(
        "Test",
        &[],
        "---\nclass:\n  name: Foo\n  properties:\n    - name: Code\n      domain: DO_CODE\n    - name: Code\n      domain: DO_CODE\n",
    );
    let store = linked(&[("Test/Foo", &source)]);
    assert_eq!(count(&store, ModelErrorType::DuplicateProperty), 1);
}

#[rstest]
#[case(false, 1)]
#[case(true, 0)]
fn test_composite_primary_key(#[case] allowed: bool, #[case] expected: usize) {
    let config = ModelConfig {
        allow_composite_primary_key: allowed,
        ..ModelConfig::default()
    };
    let source = class_file(
        "Test",
        &[],
        "---\nclass:\n  name: Foo\n  properties:\n    - name: A\n      primaryKey: true\n      domain: DO_CODE\n    - name: B\n      primaryKey: true\n      domain: DO_CODE\n",
    );
    let store = linked_with(config, &[("Test/Foo", &source)]);
    assert_eq!(count(&store, ModelErrorType::CompositePrimaryKey), expected);
}

#[test]
fn test_association_target_needs_single_key() {
    let source = class_file(
        "Test",
        &[],
        "---\nclass:\n  name: SansCle\n  properties:\n    - name: Code\n      domain: DO_CODE\n---\nclass:\n  name: Foo\n  properties:\n    - association: SansCle\n",
    );
    let store = linked(&[("Test/Foo", &source)]);
    assert_eq!(count(&store, ModelErrorType::InvalidAssociationTarget), 1);
}

#[test]
fn test_inheritance_cycle() {
    let source = class_file(
        "Test",
        &[],
        "---\nclass:\n  name: A\n  extends: B\n---\nclass:\n  name: B\n  extends: A\n",
    );
    let store = linked(&[("Test/A", &source)]);
    assert!(count(&store, ModelErrorType::CircularInheritance) >= 1);
    // Queries stay bounded on a cyclic model.
    let a = store.find_class("A").unwrap().id;
    assert!(store.ancestors(a).len() <= 2);
}

#[test]
fn test_values_must_set_primary_key() {
    let source = class_file(
        "Test",
        &[],
        "---\nclass:\n  name: Statut\n  reference: true\n  properties:\n    - name: Code\n      primaryKey: true\n      domain: DO_CODE\n    - name: Libelle\n      domain: DO_CODE\n  values:\n    Actif:\n      Libelle: Actif\n",
    );
    let store = linked(&[("Test/Statut", &source)]);
    assert_eq!(count(&store, ModelErrorType::MissingRequiredValue), 1);
}

#[test]
fn test_unique_key_property_not_found() {
    let source = class_file(
        "Test",
        &[],
        "---\nclass:\n  name: Foo\n  properties:\n    - name: Code\n      domain: DO_CODE\n  unique:\n    - [Code]\n    - [Inconnu]\n",
    );
    let store = linked(&[("Test/Foo", &source)]);
    assert_eq!(count(&store, ModelErrorType::UniqueKeyPropertyNotFound), 1);
    let foo = store.find_class("Foo").unwrap();
    assert!(foo.unique_keys[0][0].is_resolved());
}

#[test]
fn test_decorator_extends_conflict() {
    let source = class_file(
        "Test",
        &[],
        "---\ndecorator:\n  name: Entite\n  java:\n    extends: BaseEntity\n---\nclass:\n  name: Base\n---\nclass:\n  name: Foo\n  extends: Base\n  decorators:\n    - Entite\n",
    );
    let store = linked(&[("Test/Foo", &source)]);
    assert_eq!(count(&store, ModelErrorType::DecoratorExtendsConflict), 1);
}

#[test]
fn test_decorator_properties_are_class_properties() {
    let source = class_file(
        "Test",
        &[],
        "---\ndecorator:\n  name: Audit\n  properties:\n    - name: DateCreation\n      domain: DO_CODE\n---\nclass:\n  name: Foo\n  decorators:\n    - Audit\n  properties:\n    - name: Code\n      domain: DO_CODE\n",
    );
    let store = linked(&[("Test/Foo", &source)]);
    assert!(!store.has_errors(), "{:?}", store.errors());
    let foo = store.find_class("Foo").unwrap().id;
    let names: Vec<_> = store
        .class_properties(foo)
        .iter()
        .map(|p| p.declared_name().unwrap().value.clone())
        .collect();
    assert_eq!(names, vec!["Code", "DateCreation"]);
}

#[test]
fn test_parameter_order() {
    let source = class_file(
        "Test",
        &[],
        "---\nendpoint:\n  name: Rechercher\n  method: POST\n  route: foo/{id}\n  params:\n    - name: Filtre\n      domain: DO_CODE\n    - name: Id\n      domain: DO_ID\n    - name: Contenu\n      domain: DO_TEXTE\n",
    );
    let store = linked(&[("Test/Api", &source)]);
    assert_eq!(count(&store, ModelErrorType::InvalidParameterOrder), 2);
}

#[test]
fn test_as_domain_not_found() {
    let source = class_file(
        "Test",
        &["Test/Profil"],
        "---\nclass:\n  name: Foo\n  properties:\n    - alias:\n        class: Profil\n        property: Code\n      as: list\n    - alias:\n        class: Profil\n        property: Id\n      as: list\n",
    );
    let profil = class_file("Test", &[], PROFIL);
    let store = linked(&[("Test/Profil", &profil), ("Test/Foo", &source)]);
    assert_eq!(count(&store, ModelErrorType::AsDomainNotFound), 1);
}

// ============================================================================
// ALIASES
// ============================================================================

#[test]
fn test_alias_expansion() {
    let profil = class_file("Test", &[], PROFIL);
    let source = class_file(
        "Test",
        &["Test/Profil"],
        "---\nclass:\n  name: ProfilDto\n  properties:\n    - alias:\n        class: Profil\n    - alias:\n        class: Profil\n        exclude: [Id]\n      prefix: Autre\n",
    );
    let store = linked(&[("Test/Profil", &profil), ("Test/Dto", &source)]);
    assert!(!store.has_errors(), "{:?}", store.errors());

    let dto = store.find_class("ProfilDto").unwrap();
    assert_eq!(dto.properties.len(), 3);
    let profil = store.find_class("Profil").unwrap();
    let targets: Vec<_> = dto
        .properties
        .iter()
        .map(|p| p.as_alias().unwrap().property.as_ref().unwrap().target())
        .collect();
    assert_eq!(
        targets,
        vec![
            Some(profil.properties[0].id),
            Some(profil.properties[1].id),
            Some(profil.properties[1].id)
        ]
    );
    for (index, property) in dto.properties.iter().enumerate() {
        assert_eq!(property.id.index(), index);
    }
}

#[test]
fn test_alias_of_alias() {
    let profil = class_file("Test", &[], PROFIL);
    let source = class_file(
        "Test",
        &["Test/Profil"],
        "---\nclass:\n  name: Second\n  properties:\n    - alias:\n        class: Premier\n        property: ProfilCode\n---\nclass:\n  name: Premier\n  properties:\n    - alias:\n        class: Profil\n        property: Code\n      prefix: true\n",
    );
    let store = linked(&[("Test/Profil", &profil), ("Test/Dto", &source)]);
    assert!(!store.has_errors(), "{:?}", store.errors());

    let second = store.find_class("Second").unwrap();
    let code = store.find_class("Profil").unwrap().properties[1].id;
    let id = second.properties[0].id;
    assert_eq!(crate::naming::leaf_property(&store, id), Some(code));
    let naming = store.naming();
    assert_eq!(crate::naming::property_name(&store, &naming, id), "ProfilCode");
}

#[test]
fn test_alias_cycle() {
    let source = class_file(
        "Test",
        &[],
        "---\nclass:\n  name: A\n  properties:\n    - alias:\n        class: B\n        property: Y\n      name: X\n---\nclass:\n  name: B\n  properties:\n    - alias:\n        class: A\n        property: X\n      name: Y\n",
    );
    let store = linked(&[("Test/A", &source)]);
    assert_eq!(count(&store, ModelErrorType::CircularAlias), 1);
}

#[test]
fn test_alias_property_not_found() {
    let profil = class_file("Test", &[], PROFIL);
    let source = class_file(
        "Test",
        &["Test/Profil"],
        "---\nclass:\n  name: Dto\n  properties:\n    - alias:\n        class: Profil\n        include: [Code, Inconnu]\n",
    );
    let store = linked(&[("Test/Profil", &profil), ("Test/Dto", &source)]);
    assert_eq!(count(&store, ModelErrorType::PropertyNotFound), 1);
    assert_eq!(store.find_class("Dto").unwrap().properties.len(), 1);
}

const HABILITATION: &str = r#"---
class:
  name: Habilitation
  properties:
    - name: Id
      primaryKey: true
      domain: DO_ID
    - association: Profil
      property: Code
"#;

#[test]
fn test_alias_expansion_over_association_with_target_property() {
    let profil = class_file("Test", &[], PROFIL);
    let habilitation = class_file("Test", &["Test/Profil"], HABILITATION);
    let dto = class_file(
        "Test",
        &["Test/Habilitation"],
        "---\nclass:\n  name: HabilitationDto\n  properties:\n    - alias:\n        class: Habilitation\n",
    );
    let store = linked(&[
        ("Test/Profil", &profil),
        ("Test/Habilitation", &habilitation),
        ("Test/Dto", &dto),
    ]);
    assert!(!store.has_errors(), "{:?}", store.errors());

    let naming = store.naming();
    let dto = store.find_class("HabilitationDto").unwrap();
    let names: Vec<_> = dto
        .properties
        .iter()
        .map(|p| crate::naming::property_name(&store, &naming, p.id))
        .collect();
    assert_eq!(names, vec!["Id", "ProfilCode"]);
    let code = store.find_class("Profil").unwrap().properties[1].id;
    assert_eq!(crate::naming::leaf_property(&store, dto.properties[1].id), Some(code));
}

#[rstest]
#[case::unique_key("  unique:\n    - [ProfilCode]\n")]
#[case::values("  values:\n    Admin:\n      Id: 1\n      ProfilCode: ADM\n")]
#[case::default_property("  defaultProperty: ProfilCode\n")]
fn test_class_slots_name_association_with_target_property(#[case] slot: &str) {
    let profil = class_file("Test", &[], PROFIL);
    let habilitation = class_file("Test", &["Test/Profil"], &format!("{HABILITATION}{slot}"));
    let store = linked(&[("Test/Profil", &profil), ("Test/Habilitation", &habilitation)]);
    assert!(!store.has_errors(), "{:?}", store.errors());

    let habilitation = store.find_class("Habilitation").unwrap();
    let association = habilitation.properties[1].id;
    let targets: Vec<_> = habilitation
        .unique_keys
        .iter()
        .flatten()
        .chain(habilitation.values.iter().flat_map(|v| v.fields.iter().map(|f| &f.property)))
        .chain(habilitation.default_property.as_ref())
        .filter(|r| r.name() == "ProfilCode")
        .map(|r| r.target())
        .collect();
    assert_eq!(targets, vec![Some(association)]);
}

#[test]
fn test_association_target_property_not_found() {
    let profil = class_file("Test", &[], PROFIL);
    let habilitation = class_file(
        "Test",
        &["Test/Profil"],
        &HABILITATION.replace("property: Code", "property: Inconnu"),
    );
    let store = linked(&[("Test/Profil", &profil), ("Test/Habilitation", &habilitation)]);
    assert_eq!(count(&store, ModelErrorType::PropertyNotFound), 1);
    assert_eq!(count(&store, ModelErrorType::CircularAlias), 0);
}

// ============================================================================
// REVERSE ASSOCIATIONS
// ============================================================================

#[test]
fn test_reverse_properties() {
    let profil = class_file("Securite", &[], PROFIL);
    let utilisateur = class_file("Securite", &["Securite/Profil"], UTILISATEUR);
    let store = linked(&[("Securite/Profil", &profil), ("Securite/Utilisateur", &utilisateur)]);
    let profil = store.find_class("Profil").unwrap().id;
    let utilisateur = store.find_class("Utilisateur").unwrap();

    let reverse = store.reverse_properties(profil, ReverseOptions::default());
    assert_eq!(reverse.len(), 1);
    assert_eq!(reverse[0].name, "Utilisateurs");
    assert_eq!(reverse[0].association_type, AssociationType::OneToMany);
    assert_eq!(reverse[0].association, utilisateur.id);
    assert_eq!(reverse[0].reverse_of, utilisateur.properties[1].id);

    // Computed on demand: asking again gives the same answer.
    assert_eq!(store.reverse_properties(profil, ReverseOptions::default()), reverse);
    assert_eq!(store.find_class("Profil").unwrap().properties.len(), 2);
}

#[test]
fn test_reverse_properties_of_reference_class() {
    let source = class_file(
        "Test",
        &[],
        "---\nclass:\n  name: Statut\n  reference: true\n  properties:\n    - name: Id\n      primaryKey: true\n      domain: DO_ID\n---\nclass:\n  name: Foo\n  properties:\n    - name: Id\n      primaryKey: true\n      domain: DO_ID\n    - association: Statut\n",
    );
    let store = linked(&[("Test/Foo", &source)]);
    let statut = store.find_class("Statut").unwrap().id;
    assert!(store.reverse_properties(statut, ReverseOptions::default()).is_empty());
    let options = ReverseOptions {
        include_reference_classes: true,
        ..ReverseOptions::default()
    };
    assert_eq!(store.reverse_properties(statut, options).len(), 1);
}

#[test]
fn test_reverse_properties_from_decorator_association() {
    let profil = class_file("Securite", &[], PROFIL);
    let source = class_file(
        "Securite",
        &["Securite/Profil"],
        "---\ndecorator:\n  name: AvecProfil\n  properties:\n    - association: Profil\n---\nclass:\n  name: Compte\n  decorators:\n    - AvecProfil\n  properties:\n    - name: Id\n      primaryKey: true\n      domain: DO_ID\n",
    );
    let store = linked(&[("Securite/Profil", &profil), ("Securite/Compte", &source)]);
    assert!(!store.has_errors(), "{:?}", store.errors());

    let profil = store.find_class("Profil").unwrap().id;
    let compte = store.find_class("Compte").unwrap().id;
    let decorator = store.decorators().next().unwrap();

    let reverse = store.reverse_properties(profil, ReverseOptions::default());
    assert_eq!(reverse.len(), 1);
    assert_eq!(reverse[0].name, "Comptes");
    assert_eq!(reverse[0].association, compte);
    assert_eq!(reverse[0].reverse_of, decorator.properties[0].id);
}

// ============================================================================
// LIFECYCLE
// ============================================================================

#[test]
fn test_relink_is_repeatable() {
    let profil = class_file("Securite", &[], PROFIL);
    let utilisateur = class_file("Securite", &["Securite/Profil"], UTILISATEUR);
    let mut store = linked(&[("Securite/Profil", &profil), ("Securite/Utilisateur", &utilisateur)]);
    let first = store.errors().clone();
    assert!(!store.is_dirty());

    store.link();
    assert_eq!(store.errors(), &first);

    let id = store.lookup_file("Securite/Profil").unwrap();
    assert!(store.remove_file(id));
    assert!(store.is_dirty());
    store.link();
    assert_eq!(count(&store, ModelErrorType::FileNotFound), 1);
}

#[test]
fn test_load_error_reported_as_invalid_file() {
    let mut store = ModelStore::new(ModelConfig::default());
    let err = store.load_file("Test/Casse", "---\nmodule: Test\n---\nklass: {}\n").unwrap_err();
    let id = store.file_id("Test/Casse");
    store.set_load_error(id, err);
    let report = store.link();
    assert_eq!(report.errors, 1);
    assert_eq!(store.errors_for(id)[0].kind, ModelErrorType::InvalidFile);
}

#[test]
fn test_empty_file_is_removed() {
    let mut store = ModelStore::new(ModelConfig::default());
    let id = store.load_file("Test/Foo", "---\nmodule: Test\n").unwrap();
    assert!(id.is_some());
    assert_eq!(store.file_count(), 1);
    assert_eq!(store.load_file("Test/Foo", "").unwrap(), None);
    assert_eq!(store.file_count(), 0);
}

#[test]
fn test_is_persistent() {
    let source = class_file(
        "Test",
        &[],
        "---\nclass:\n  name: Abstraite\n  abstract: true\n  properties:\n    - name: Id\n      primaryKey: true\n      domain: DO_ID\n---\nclass:\n  name: Dto\n  properties:\n    - name: Code\n      domain: DO_CODE\n",
    );
    let store = linked(&[("Test/Foo", &source)]);
    assert!(!store.is_persistent(store.find_class("Abstraite").unwrap().id));
    assert!(!store.is_persistent(store.find_class("Dto").unwrap().id));
    let dto = store.find_class("Dto").unwrap();
    assert!(matches!(dto.properties[0].kind, PropertyKind::Regular(_)));
}
