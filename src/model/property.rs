use crate::base::{Location, LocatedString};

use super::{ClassId, ClassReference, DomainReference, PropertyId, PropertyOwner, PropertyReference};

// ============================================================================
// ASSOCIATIONS
// ============================================================================

/// Cardinality of an association.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssociationType {
    OneToOne,
    ManyToOne,
    OneToMany,
    ManyToMany,
}

impl AssociationType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "oneToOne" => Some(AssociationType::OneToOne),
            "manyToOne" => Some(AssociationType::ManyToOne),
            "oneToMany" => Some(AssociationType::OneToMany),
            "manyToMany" => Some(AssociationType::ManyToMany),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssociationType::OneToOne => "oneToOne",
            AssociationType::ManyToOne => "manyToOne",
            AssociationType::OneToMany => "oneToMany",
            AssociationType::ManyToMany => "manyToMany",
        }
    }

    /// Cardinality seen from the other side of the association.
    pub fn mirror(self) -> Self {
        match self {
            AssociationType::OneToOne => AssociationType::OneToOne,
            AssociationType::ManyToOne => AssociationType::OneToMany,
            AssociationType::OneToMany => AssociationType::ManyToOne,
            AssociationType::ManyToMany => AssociationType::ManyToMany,
        }
    }

    pub fn is_to_many(self) -> bool {
        matches!(self, AssociationType::OneToMany | AssociationType::ManyToMany)
    }
}

// ============================================================================
// PROPERTY VARIANTS
// ============================================================================

/// A plain field typed by a domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegularProperty {
    pub name: LocatedString,
    pub label: Option<String>,
    pub comment: String,
    pub primary_key: bool,
    pub required: bool,
    pub domain: DomainReference,
    pub default_value: Option<String>,
    pub readonly: bool,
}

/// A foreign key to another class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssociationProperty {
    pub association: ClassReference,
    pub association_type: AssociationType,
    /// Disambiguates several associations to the same class.
    pub role: Option<String>,
    pub name: Option<LocatedString>,
    pub label: Option<String>,
    pub comment: String,
    pub primary_key: bool,
    pub required: bool,
    pub default_value: Option<String>,
    pub readonly: bool,
    pub as_domain: Option<LocatedString>,
    /// Target property, when not the target's primary key.
    pub property: Option<PropertyReference>,
    pub trigram: Option<String>,
}

/// A whole class embedded in another (nested object).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositionProperty {
    pub name: LocatedString,
    pub composition: ClassReference,
    /// Wrapper domain (list, map...) around the composed class.
    pub domain: Option<DomainReference>,
    pub label: Option<String>,
    pub comment: String,
}

/// Prefix or suffix of an alias name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AliasAffix {
    /// `true`: the aliased property's class name.
    ClassName,
    Literal(String),
}

/// A property re-exposing another class's property.
///
/// Right after loading, an alias may select several target properties
/// (`include`/`exclude`, or none for all of them); the store expands it
/// into one alias per target before resolving `property`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasProperty {
    pub class: ClassReference,
    pub property: Option<PropertyReference>,
    pub include: Vec<LocatedString>,
    pub exclude: Vec<LocatedString>,
    pub name: Option<LocatedString>,
    pub prefix: Option<AliasAffix>,
    pub suffix: Option<AliasAffix>,
    pub label: Option<String>,
    pub comment: Option<String>,
    pub required: Option<bool>,
    pub default_value: Option<String>,
    pub readonly: bool,
    pub as_domain: Option<LocatedString>,
}

impl AliasProperty {
    /// Whether the alias still selects more than one named property.
    pub fn needs_expansion(&self) -> bool {
        self.property.is_none()
    }
}

/// The closed set of property variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    Regular(RegularProperty),
    Association(AssociationProperty),
    Composition(CompositionProperty),
    Alias(AliasProperty),
}

// ============================================================================
// PROPERTY
// ============================================================================

/// A property with its owner and source location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub id: PropertyId,
    pub location: Location,
    pub kind: PropertyKind,
}

impl Property {
    pub fn owner(&self) -> PropertyOwner {
        self.id.owner
    }

    /// Name written in the source, if any. Associations and aliases may
    /// leave it out and get a derived name (see [`crate::naming`]).
    pub fn declared_name(&self) -> Option<&LocatedString> {
        match &self.kind {
            PropertyKind::Regular(p) => Some(&p.name),
            PropertyKind::Composition(p) => Some(&p.name),
            PropertyKind::Association(p) => p.name.as_ref(),
            PropertyKind::Alias(p) => p.name.as_ref(),
        }
    }

    pub fn is_primary_key(&self) -> bool {
        match &self.kind {
            PropertyKind::Regular(p) => p.primary_key,
            PropertyKind::Association(p) => p.primary_key,
            _ => false,
        }
    }

    /// Field properties carry a value (everything but compositions).
    pub fn is_field(&self) -> bool {
        !matches!(self.kind, PropertyKind::Composition(_))
    }

    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            PropertyKind::Regular(p) => p.label.as_deref(),
            PropertyKind::Association(p) => p.label.as_deref(),
            PropertyKind::Composition(p) => p.label.as_deref(),
            PropertyKind::Alias(p) => p.label.as_deref(),
        }
    }

    pub fn comment(&self) -> Option<&str> {
        match &self.kind {
            PropertyKind::Regular(p) => Some(&p.comment),
            PropertyKind::Association(p) => Some(&p.comment),
            PropertyKind::Composition(p) => Some(&p.comment),
            PropertyKind::Alias(p) => p.comment.as_deref(),
        }
    }

    pub fn as_regular(&self) -> Option<&RegularProperty> {
        match &self.kind {
            PropertyKind::Regular(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_association(&self) -> Option<&AssociationProperty> {
        match &self.kind {
            PropertyKind::Association(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_composition(&self) -> Option<&CompositionProperty> {
        match &self.kind {
            PropertyKind::Composition(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_alias(&self) -> Option<&AliasProperty> {
        match &self.kind {
            PropertyKind::Alias(p) => Some(p),
            _ => None,
        }
    }
}

/// The navigable back side of an association, computed on demand.
///
/// Never stored on the target class; see
/// [`ModelStore::reverse_properties`](crate::store::ModelStore::reverse_properties).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReverseAssociationProperty {
    /// Class the reverse property appears on (the forward target).
    pub owner: ClassId,
    /// The forward association this mirrors.
    pub reverse_of: PropertyId,
    /// Class holding the forward association.
    pub association: ClassId,
    pub association_type: AssociationType,
    pub role: Option<String>,
    pub name: String,
    pub location: Location,
}
