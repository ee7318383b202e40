//! Naming and typing resolver.
//!
//! Pure functions computing derived names and types from a linked
//! [`ModelStore`](crate::store::ModelStore). Every function takes the naming
//! switches explicitly as a [`NamingConfig`](crate::config::NamingConfig)
//! instead of reading them from the store, so each rule can be exercised on
//! its own.
//!
//! These functions follow alias and association chains; calling them on an
//! unlinked store yields `None`/fallback values rather than panicking.

mod keys;
mod names;
mod sql;
mod types;

pub use keys::{class_resource_key, label, resource_key, value_resource_key};
pub use names::{java_name, property_name, try_property_name, ts_name};
pub use sql::sql_name;
pub use types::{base_domain, effective_domain, enum_type_name, is_body_param, leaf_property, type_name};

use crate::model::{Namespace, PropertyId, PropertyOwner};
use crate::store::ModelStore;

/// Longest alias/association chain followed before giving up.
pub(crate) const MAX_CHAIN_DEPTH: usize = 32;

/// Name and namespace of the entity owning a property.
pub(crate) fn owner_info(store: &ModelStore, id: PropertyId) -> Option<(&str, &Namespace)> {
    match id.owner {
        PropertyOwner::Class(class) => {
            let class = store.class(class)?;
            Some((class.name(), &class.namespace))
        }
        PropertyOwner::Decorator(decorator) => {
            let decorator = store.decorator(decorator)?;
            Some((decorator.name(), &decorator.namespace))
        }
        PropertyOwner::EndpointParam(endpoint) | PropertyOwner::EndpointReturn(endpoint) => {
            let endpoint = store.endpoint(endpoint)?;
            Some((endpoint.name(), &endpoint.namespace))
        }
    }
}
