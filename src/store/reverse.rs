//! Reverse associations, computed on demand.
//!
//! The back side of an association is never stored on the target class:
//! each query walks the forward associations again, so the result is a
//! pure function of the linked model.

use crate::model::{AssociationType, ClassId, ReverseAssociationProperty};

use super::ModelStore;

/// Filters for [`ModelStore::reverse_properties`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReverseOptions {
    /// Only associations between classes of the same root module.
    pub only_in_same_root_module: bool,
    /// Also compute reverse properties on reference classes.
    pub include_reference_classes: bool,
}

impl ModelStore {
    /// Reverse association properties of `class`, in store order of the
    /// forward associations.
    pub fn reverse_properties(
        &self,
        class: ClassId,
        options: ReverseOptions,
    ) -> Vec<ReverseAssociationProperty> {
        let Some(target) = self.class(class) else {
            return Vec::new();
        };
        if target.reference && !options.include_reference_classes {
            return Vec::new();
        }
        if !self.is_persistent(class) {
            return Vec::new();
        }

        let mut reverse = Vec::new();
        for owner in self.classes() {
            if options.only_in_same_root_module
                && owner.namespace.root_module() != target.namespace.root_module()
            {
                continue;
            }
            for property in self.class_properties(owner.id) {
                let Some(association) = property.as_association() else {
                    continue;
                };
                if association.association.target() != Some(class)
                    || association.association_type == AssociationType::OneToOne
                {
                    continue;
                }
                if association.association_type != AssociationType::ManyToOne
                    && self.single_primary_key(owner.id).is_none()
                {
                    continue;
                }

                let association_type = association.association_type.mirror();
                let base = if association_type.is_to_many() {
                    owner.plural_name.as_str()
                } else {
                    owner.name()
                };
                reverse.push(ReverseAssociationProperty {
                    owner: class,
                    reverse_of: property.id,
                    association: owner.id,
                    association_type,
                    role: association.role.clone(),
                    name: format!("{}{}", base, association.role.as_deref().unwrap_or_default()),
                    location: property.location,
                });
            }
        }
        reverse
    }
}
