#![allow(clippy::unwrap_used, clippy::expect_used)]

use topmodel::ModelConfig;
use topmodel::model::{AliasedEntity, AssociationType, PropertyKind};
use topmodel::store::{ModelErrorType, ReverseOptions};

use crate::helpers::diagnostic_helpers::{assert_no_errors, count, diagnostics};
use crate::helpers::model_fixtures::{PROFIL, UTILISATEUR, linked_store, sample_files, sample_store};

#[test]
fn test_sample_model_links_cleanly() {
    let store = sample_store();
    assert_no_errors(&store);
    assert!(diagnostics(&store).is_empty(), "{:?}", diagnostics(&store));
}

#[test]
fn test_alias_file_brings_classes_in() {
    let store = sample_store();
    let file = store.file_by_name("Securite/Habilitation").unwrap();
    let type_profil = store.find_class("TypeProfil").unwrap().id;
    assert_eq!(file.resolved_aliases.len(), 1);
    assert_eq!(file.resolved_aliases[0].entity, AliasedEntity::Class(type_profil));

    let habilitation = store.find_class("Habilitation").unwrap();
    let association = habilitation.properties[0].as_association().unwrap();
    assert_eq!(association.association.target(), Some(type_profil));
}

#[test]
fn test_decorator_and_unique_keys() {
    let store = sample_store();
    let profil = store.find_class("Profil").unwrap();
    assert!(profil.decorators[0].decorator.is_resolved());
    assert_eq!(store.class_properties(profil.id).len(), 3);

    let unique = profil.unique_keys[0][0].target().unwrap();
    assert_eq!(unique, profil.properties[1].id);

    let type_profil = store.find_class("TypeProfil").unwrap();
    let default = type_profil.default_property.as_ref().unwrap().target();
    assert_eq!(default, Some(type_profil.properties[1].id));
}

#[test]
fn test_values_are_linked_to_properties() {
    let store = sample_store();
    let type_profil = store.find_class("TypeProfil").unwrap();
    let code = type_profil.properties[0].id;
    assert_eq!(type_profil.values[0].get(code), Some("ADM"));
    assert_eq!(type_profil.values[1].get_by_name("Libelle"), Some("Gestionnaire"));
}

#[test]
fn test_endpoint_params_and_return() {
    let store = sample_store();
    let endpoint = store.endpoints().next().unwrap();
    assert_eq!(endpoint.params.len(), 2);
    let returns = endpoint.returns.as_ref().unwrap();
    let PropertyKind::Composition(composition) = &returns.kind else {
        panic!("expected a composition");
    };
    assert_eq!(
        composition.composition.target(),
        Some(store.find_class("UtilisateurDto").unwrap().id)
    );
}

#[test]
fn test_reverse_association_mirror_law() {
    let store = sample_store();
    let profil = store.find_class("Profil").unwrap().id;
    let utilisateur = store.find_class("Utilisateur").unwrap();

    let reverse = store.reverse_properties(profil, ReverseOptions::default());
    assert_eq!(reverse.len(), 2);
    for property in &reverse {
        let forward = store.property(property.reverse_of).unwrap();
        let forward = forward.as_association().unwrap();
        assert_eq!(property.association_type, forward.association_type.mirror());
        assert_eq!(property.association, utilisateur.id);
        assert_eq!(property.owner, profil);
    }
    assert_eq!(reverse[0].name, "Utilisateurs");
    assert_eq!(reverse[1].association_type, AssociationType::ManyToMany);
    assert_eq!(reverse[1].name, "UtilisateursSecondaire");

    assert_eq!(store.reverse_properties(profil, ReverseOptions::default()), reverse);
}

#[test]
fn test_reverse_suppressed_for_reference_class() {
    let store = sample_store();
    let type_profil = store.find_class("TypeProfil").unwrap().id;
    assert!(store.reverse_properties(type_profil, ReverseOptions::default()).is_empty());

    let options = ReverseOptions {
        include_reference_classes: true,
        ..ReverseOptions::default()
    };
    let reverse = store.reverse_properties(type_profil, options);
    assert_eq!(reverse.len(), 2);

    let options = ReverseOptions {
        include_reference_classes: true,
        only_in_same_root_module: true,
    };
    assert_eq!(store.reverse_properties(type_profil, options).len(), 2);
}

#[test]
fn test_missing_file_breaks_dependents() {
    let files: Vec<_> = sample_files()
        .into_iter()
        .filter(|(name, _)| *name != "Securite/Profil")
        .collect();
    let store = linked_store(ModelConfig::default(), &files);

    assert_eq!(count(&store, ModelErrorType::FileNotFound), 2);
    assert!(count(&store, ModelErrorType::ClassNotFound) >= 2);
    let utilisateur = store.file_by_name("Securite/Utilisateur").unwrap();
    assert!(!store.errors_for(utilisateur.id).is_empty());
}

#[test]
fn test_duplicate_trigram_across_files() {
    let copy = PROFIL.replace("name: Profil\n", "name: ProfilBis\n").replace(
        "name: TypeProfil\n  trigram: TPR",
        "name: TypeProfilBis\n  trigram: TPX",
    );
    let mut files = sample_files();
    files.push(("Securite/Copie", &copy));
    let store = linked_store(ModelConfig::default(), &files);

    assert_eq!(count(&store, ModelErrorType::DuplicateTrigram), 1);
    let error = diagnostics(&store)
        .into_iter()
        .find(|e| e.kind == ModelErrorType::DuplicateTrigram)
        .unwrap();
    let first = store.find_class("Profil").unwrap();
    assert_eq!(error.related[0].location, first.trigram.as_ref().unwrap().location);
    assert_eq!(error.file(), store.lookup_file("Securite/Copie").unwrap());
}

#[test]
fn test_unused_import_can_be_silenced() {
    let unused = UTILISATEUR.replace("  - Securite/Profil\n", "  - Securite/Profil\n  - Commun/Decorateurs\n");
    let mut files = sample_files();
    files.retain(|(name, _)| *name != "Securite/Utilisateur");
    files.push(("Securite/Utilisateur", &unused));

    let store = linked_store(ModelConfig::default(), &files);
    assert_eq!(count(&store, ModelErrorType::UnusedImport), 1);
    let file = store.file_by_name("Securite/Utilisateur").unwrap();
    assert_eq!(file.useless_imports[0].name(), "Commun/Decorateurs");

    let config = ModelConfig::from_yaml("noWarn: [TMD9001]\n").unwrap();
    let store = linked_store(config, &files);
    assert_eq!(count(&store, ModelErrorType::UnusedImport), 0);
}
