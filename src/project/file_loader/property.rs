//! Property blocks, discriminated by their first key.

use crate::base::{Location, LocatedString};
use crate::error::ModelException;
use crate::model::{
    AliasAffix, AliasProperty, AssociationProperty, AssociationType, CompositionProperty,
    Property, PropertyId, PropertyKind, PropertyOwner, Reference, RegularProperty,
};
use crate::syntax::{EventKind, EventReader};

use super::unknown_key;

/// A property read from the source, not yet attached to its owner.
pub(super) struct PropertyDraft {
    location: Location,
    kind: PropertyKind,
}

impl PropertyDraft {
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            PropertyKind::Regular(p) => Some(p.name.as_str()),
            PropertyKind::Composition(p) => Some(p.name.as_str()),
            PropertyKind::Association(p) => p.name.as_ref().map(|n| n.as_str()),
            PropertyKind::Alias(p) => p.name.as_ref().map(|n| n.as_str()),
        }
    }

    /// Regular, non-key, required properties: the ones every static value
    /// must set.
    pub fn is_required_value_field(&self) -> bool {
        matches!(&self.kind, PropertyKind::Regular(p) if p.required && !p.primary_key)
    }
}

/// Attach drafts to their owner, numbering them in declaration order.
pub(super) fn finish_properties(drafts: Vec<PropertyDraft>, owner: PropertyOwner) -> Vec<Property> {
    drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| Property {
            id: PropertyId::new(owner, index as u32),
            location: draft.location,
            kind: draft.kind,
        })
        .collect()
}

pub(super) fn load_property_list(
    reader: &mut EventReader<'_>,
) -> Result<Vec<PropertyDraft>, ModelException> {
    let mut properties = Vec::new();
    reader.sequence(|reader| {
        properties.push(load_property(reader)?);
        Ok(())
    })?;
    Ok(properties)
}

pub(super) fn load_property(reader: &mut EventReader<'_>) -> Result<PropertyDraft, ModelException> {
    let start = reader.expect(EventKind::MappingStart)?;
    let location = start.location;
    let first = reader.scalar()?;

    let kind = match first.as_str() {
        "association" => {
            let mut draft = AssociationDraft::new(reader.scalar()?);
            read_remaining(reader, |reader, key| draft.set(reader, key))?;
            PropertyKind::Association(draft.finish())
        }
        "composition" => {
            let mut draft = CompositionDraft::new(reader.scalar()?);
            read_remaining(reader, |reader, key| draft.set(reader, key))?;
            PropertyKind::Composition(draft.finish(reader, location)?)
        }
        "alias" => {
            let mut draft = AliasDraft::default();
            draft.load_target(reader)?;
            read_remaining(reader, |reader, key| draft.set(reader, key))?;
            PropertyKind::Alias(draft.finish(reader, location)?)
        }
        _ => {
            let mut draft = RegularDraft::default();
            draft.set(reader, first)?;
            read_remaining(reader, |reader, key| draft.set(reader, key))?;
            PropertyKind::Regular(draft.finish(reader, location)?)
        }
    };

    Ok(PropertyDraft { location, kind })
}

/// The rest of a mapping whose first key has already been consumed.
fn read_remaining<F>(reader: &mut EventReader<'_>, mut f: F) -> Result<(), ModelException>
where
    F: FnMut(&mut EventReader<'_>, LocatedString) -> Result<(), ModelException>,
{
    while !reader.consume_if(&EventKind::MappingEnd) {
        let key = reader.scalar()?;
        f(reader, key)?;
    }
    Ok(())
}

fn text(reader: &mut EventReader<'_>) -> Result<Option<String>, ModelException> {
    Ok(reader.optional_scalar()?.map(|v| v.value))
}

// ============================================================================
// REGULAR
// ============================================================================

#[derive(Default)]
struct RegularDraft {
    name: Option<LocatedString>,
    label: Option<String>,
    comment: String,
    primary_key: bool,
    required: bool,
    domain: Option<LocatedString>,
    default_value: Option<String>,
    readonly: bool,
}

impl RegularDraft {
    fn set(&mut self, reader: &mut EventReader<'_>, key: LocatedString) -> Result<(), ModelException> {
        match key.as_str() {
            "name" => self.name = reader.optional_scalar()?,
            "label" => self.label = text(reader)?,
            "comment" => self.comment = text(reader)?.unwrap_or_default(),
            "primaryKey" => self.primary_key = reader.bool()?,
            "required" => self.required = reader.bool()?,
            "domain" => self.domain = reader.optional_scalar()?,
            "defaultValue" => self.default_value = text(reader)?,
            "readonly" => self.readonly = reader.bool()?,
            _ => return Err(unknown_key(reader, &key, "une propriété")),
        }
        Ok(())
    }

    fn finish(
        self,
        reader: &EventReader<'_>,
        location: Location,
    ) -> Result<RegularProperty, ModelException> {
        let Some(name) = self.name else {
            return Err(reader.error(location, "La propriété doit avoir un nom."));
        };
        let Some(domain) = self.domain else {
            return Err(reader.error(
                location,
                format!("La propriété '{}' doit avoir un domaine.", name.value),
            ));
        };
        Ok(RegularProperty {
            name,
            label: self.label,
            comment: self.comment,
            primary_key: self.primary_key,
            required: self.required,
            domain: Reference::new(domain),
            default_value: self.default_value,
            readonly: self.readonly,
        })
    }
}

// ============================================================================
// ASSOCIATION
// ============================================================================

struct AssociationDraft {
    association: LocatedString,
    association_type: AssociationType,
    role: Option<String>,
    name: Option<LocatedString>,
    label: Option<String>,
    comment: String,
    primary_key: bool,
    required: bool,
    default_value: Option<String>,
    readonly: bool,
    as_domain: Option<LocatedString>,
    property: Option<LocatedString>,
    trigram: Option<String>,
}

impl AssociationDraft {
    fn new(association: LocatedString) -> Self {
        Self {
            association,
            association_type: AssociationType::ManyToOne,
            role: None,
            name: None,
            label: None,
            comment: String::new(),
            primary_key: false,
            required: false,
            default_value: None,
            readonly: false,
            as_domain: None,
            property: None,
            trigram: None,
        }
    }

    fn set(&mut self, reader: &mut EventReader<'_>, key: LocatedString) -> Result<(), ModelException> {
        match key.as_str() {
            "type" => {
                let value = reader.scalar()?;
                self.association_type = AssociationType::parse(value.as_str()).ok_or_else(|| {
                    reader.error(
                        value.location,
                        format!("Type d'association inconnu : '{}'.", value.value),
                    )
                })?;
            }
            "role" => self.role = text(reader)?,
            "name" => self.name = reader.optional_scalar()?,
            "label" => self.label = text(reader)?,
            "comment" => self.comment = text(reader)?.unwrap_or_default(),
            "primaryKey" => self.primary_key = reader.bool()?,
            "required" => self.required = reader.bool()?,
            "defaultValue" => self.default_value = text(reader)?,
            "readonly" => self.readonly = reader.bool()?,
            "as" => self.as_domain = reader.optional_scalar()?,
            "property" => self.property = reader.optional_scalar()?,
            "trigram" => self.trigram = text(reader)?,
            _ => return Err(unknown_key(reader, &key, "une association")),
        }
        Ok(())
    }

    fn finish(self) -> AssociationProperty {
        AssociationProperty {
            association: Reference::new(self.association),
            association_type: self.association_type,
            role: self.role,
            name: self.name,
            label: self.label,
            comment: self.comment,
            primary_key: self.primary_key,
            required: self.required,
            default_value: self.default_value,
            readonly: self.readonly,
            as_domain: self.as_domain,
            property: self.property.map(Reference::new),
            trigram: self.trigram,
        }
    }
}

// ============================================================================
// COMPOSITION
// ============================================================================

struct CompositionDraft {
    composition: LocatedString,
    name: Option<LocatedString>,
    domain: Option<LocatedString>,
    label: Option<String>,
    comment: String,
}

impl CompositionDraft {
    fn new(composition: LocatedString) -> Self {
        Self {
            composition,
            name: None,
            domain: None,
            label: None,
            comment: String::new(),
        }
    }

    fn set(&mut self, reader: &mut EventReader<'_>, key: LocatedString) -> Result<(), ModelException> {
        match key.as_str() {
            "name" => self.name = reader.optional_scalar()?,
            "domain" => self.domain = reader.optional_scalar()?,
            "label" => self.label = text(reader)?,
            "comment" => self.comment = text(reader)?.unwrap_or_default(),
            _ => return Err(unknown_key(reader, &key, "une composition")),
        }
        Ok(())
    }

    fn finish(
        self,
        reader: &EventReader<'_>,
        location: Location,
    ) -> Result<CompositionProperty, ModelException> {
        let Some(name) = self.name else {
            return Err(reader.error(location, "La composition doit avoir un nom."));
        };
        Ok(CompositionProperty {
            name,
            composition: Reference::new(self.composition),
            domain: self.domain.map(Reference::new),
            label: self.label,
            comment: self.comment,
        })
    }
}

// ============================================================================
// ALIAS
// ============================================================================

#[derive(Default)]
struct AliasDraft {
    class: Option<LocatedString>,
    property: Option<LocatedString>,
    include: Vec<LocatedString>,
    exclude: Vec<LocatedString>,
    name: Option<LocatedString>,
    prefix: Option<AliasAffix>,
    suffix: Option<AliasAffix>,
    label: Option<String>,
    comment: Option<String>,
    required: Option<bool>,
    default_value: Option<String>,
    readonly: bool,
    as_domain: Option<LocatedString>,
}

impl AliasDraft {
    /// The `alias: { class, property | include | exclude }` block.
    fn load_target(&mut self, reader: &mut EventReader<'_>) -> Result<(), ModelException> {
        reader.mapping(|reader, key| {
            match key.as_str() {
                "class" => self.class = reader.optional_scalar()?,
                "property" => self.property = reader.optional_scalar()?,
                "include" => self.include = reader.scalar_list()?,
                "exclude" => self.exclude = reader.scalar_list()?,
                _ => return Err(unknown_key(reader, &key, "la cible d'un alias")),
            }
            Ok(())
        })
    }

    fn set(&mut self, reader: &mut EventReader<'_>, key: LocatedString) -> Result<(), ModelException> {
        match key.as_str() {
            "name" => self.name = reader.optional_scalar()?,
            "prefix" => self.prefix = affix(reader)?,
            "suffix" => self.suffix = affix(reader)?,
            "label" => self.label = text(reader)?,
            "comment" => self.comment = text(reader)?,
            "required" => self.required = Some(reader.bool()?),
            "defaultValue" => self.default_value = text(reader)?,
            "readonly" => self.readonly = reader.bool()?,
            "as" => self.as_domain = reader.optional_scalar()?,
            _ => return Err(unknown_key(reader, &key, "un alias de propriété")),
        }
        Ok(())
    }

    fn finish(
        self,
        reader: &EventReader<'_>,
        location: Location,
    ) -> Result<AliasProperty, ModelException> {
        let Some(class) = self.class else {
            return Err(reader.error(location, "L'alias doit définir une classe."));
        };
        if self.property.is_some() && !(self.include.is_empty() && self.exclude.is_empty()) {
            return Err(reader.error(
                location,
                "Un alias ne peut pas combiner 'property' avec 'include' ou 'exclude'.",
            ));
        }
        Ok(AliasProperty {
            class: Reference::new(class),
            property: self.property.map(Reference::new),
            include: self.include,
            exclude: self.exclude,
            name: self.name,
            prefix: self.prefix,
            suffix: self.suffix,
            label: self.label,
            comment: self.comment,
            required: self.required,
            default_value: self.default_value,
            readonly: self.readonly,
            as_domain: self.as_domain,
        })
    }
}

/// `true` means the target class name; `false` or nothing means no affix.
fn affix(reader: &mut EventReader<'_>) -> Result<Option<AliasAffix>, ModelException> {
    Ok(match reader.optional_scalar()? {
        None => None,
        Some(value) => match value.as_str() {
            "true" => Some(AliasAffix::ClassName),
            "false" => None,
            _ => Some(AliasAffix::Literal(value.value)),
        },
    })
}
