//! Entity model: the data the loader builds and the linker resolves.
//!
//! Entities live in their [`ModelFile`] and point at each other through
//! copyable ids ([`ClassId`], [`PropertyId`], ...) wrapped in lazy
//! [`Reference`]s. A reference carries the name and location written in the
//! source and is resolved once, by the store, after every file is loaded.
//!
//! ## Key Types
//!
//! - [`ModelFile`] - everything declared in one `.tmd` file
//! - [`Class`], [`Property`], [`PropertyKind`] - classes and their fields
//! - [`Domain`], [`Decorator`], [`Endpoint`], [`Alias`]
//! - [`Reference`] - a name waiting for resolution

mod alias;
mod class;
mod decorator;
mod domain;
mod endpoint;
mod file;
mod ids;
mod namespace;
mod property;
mod reference;

pub use alias::{AliasedEntity, Alias, ResolvedAlias};
pub use class::{Class, DecoratorUsage, ReferenceValue, ValueField};
pub use decorator::{Decorator, DecoratorImplementation};
pub use domain::{Domain, DomainImplementation, LANGUAGES};
pub use endpoint::{Endpoint, HttpMethod};
pub use file::{EndpointOptions, FileOptions, ModelFile};
pub use ids::{AliasId, ClassId, DecoratorId, DomainId, EndpointId, PropertyId, PropertyOwner};
pub use namespace::Namespace;
pub use property::{
    AliasAffix, AliasProperty, AssociationProperty, AssociationType, CompositionProperty,
    Property, PropertyKind, RegularProperty, ReverseAssociationProperty,
};
pub use reference::{
    ClassReference, DecoratorReference, DomainReference, EndpointReference, FileReference,
    PropertyReference, Reference, Resolution,
};
