//! Model-wide properties of a linked store.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use topmodel::model::{Property, PropertyKind};
use topmodel::naming;
use topmodel::store::ModelStore;

use crate::helpers::diagnostic_helpers::assert_no_errors;
use crate::helpers::model_fixtures::sample_store;

fn all_properties(store: &ModelStore) -> Vec<&Property> {
    store
        .classes()
        .flat_map(|c| c.properties.iter())
        .chain(store.decorators().flat_map(|d| d.properties.iter()))
        .chain(
            store
                .endpoints()
                .flat_map(|e| e.params.iter().chain(e.returns.as_ref())),
        )
        .collect()
}

#[test]
fn test_every_reference_is_resolved() {
    let store = sample_store();
    assert_no_errors(&store);

    for file in store.files() {
        assert!(file.uses.iter().all(|u| u.is_resolved()), "{}", file.name);
        assert!(file.aliases.iter().all(|a| a.file.is_resolved()));
        for domain in &file.domains {
            assert!(domain.as_domains.values().all(|d| d.is_resolved()));
        }
    }
    for class in store.classes() {
        assert!(class.extends.as_ref().is_none_or(|e| e.is_resolved()));
        assert!(class.decorators.iter().all(|d| d.decorator.is_resolved()));
        assert!(class.unique_keys.iter().flatten().all(|k| k.is_resolved()));
        assert!(class.values.iter().flat_map(|v| v.fields.iter()).all(|f| f.property.is_resolved()));
        for slot in [&class.default_property, &class.order_property, &class.flag_property] {
            assert!(slot.as_ref().is_none_or(|r| r.is_resolved()));
        }
    }
    for property in all_properties(&store) {
        let resolved = match &property.kind {
            PropertyKind::Regular(p) => p.domain.is_resolved(),
            PropertyKind::Association(p) => {
                p.association.is_resolved() && p.property.as_ref().is_none_or(|r| r.is_resolved())
            }
            PropertyKind::Composition(p) => {
                p.composition.is_resolved() && p.domain.as_ref().is_none_or(|d| d.is_resolved())
            }
            PropertyKind::Alias(p) => {
                p.class.is_resolved() && p.property.as_ref().is_some_and(|r| r.is_resolved())
            }
        };
        assert!(resolved, "unresolved reference in {:?}", property.id);
    }
}

#[test]
fn test_primary_key_cardinality() {
    let store = sample_store();
    for class in store.classes() {
        assert!(store.primary_key(class.id).len() <= 1, "{}", class.name());
    }
}

#[test]
fn test_alias_transparency() {
    let store = sample_store();
    let dto = store.find_class("UtilisateurDto").unwrap();
    let type_profil_code = store.find_class("TypeProfil").unwrap().properties[0].id;

    // UtilisateurDto.TypeProfilCode -> Profil.TypeProfilCode -> TypeProfil.Code
    let alias = dto.properties[2].id;
    assert_eq!(naming::leaf_property(&store, alias), Some(type_profil_code));
    assert_eq!(
        naming::base_domain(&store, alias),
        naming::base_domain(&store, type_profil_code)
    );
    assert_eq!(
        naming::effective_domain(&store, alias),
        Some(store.find_domain("DO_CODE_LIST").unwrap().id)
    );
    let naming_config = store.naming();
    assert_eq!(
        naming::type_name(&store, &naming_config, alias, "ts").as_deref(),
        Some("TypeProfilCode[]")
    );
}

#[test]
fn test_sample_names() {
    let store = sample_store();
    let config = store.naming();
    let utilisateur = store.find_class("Utilisateur").unwrap();
    let names: Vec<_> = utilisateur
        .properties
        .iter()
        .map(|p| naming::property_name(&store, &config, p.id))
        .collect();
    assert_eq!(names, vec!["Id", "Email", "ProfilId", "ProfilIdSecondaireList"]);

    let sql: Vec<_> = utilisateur
        .properties
        .iter()
        .map(|p| naming::sql_name(&store, &config, p.id, None))
        .collect();
    assert_eq!(sql, vec!["UTI_ID", "UTI_EMAIL", "PRO_ID", "PRO_ID_SECONDAIRE"]);

    let dto = store.find_class("UtilisateurDto").unwrap();
    let names: Vec<_> = dto
        .properties
        .iter()
        .map(|p| naming::property_name(&store, &config, p.id))
        .collect();
    assert_eq!(names, vec!["Email", "ProfilId", "TypeProfilCode"]);
    assert_eq!(
        naming::resource_key(&store, &config, dto.properties[0].id).as_deref(),
        Some("securite.utilisateur.utilisateur.email")
    );
}
