use crate::base::case::{pluralize, to_constant_case};
use crate::base::{Location, LocatedString};
use crate::error::ModelException;
use crate::model::{
    Class, ClassId, DecoratorUsage, PropertyOwner, Reference, ReferenceValue, ValueField,
};
use crate::syntax::{EventKind, EventReader};

use super::property::{PropertyDraft, finish_properties, load_property_list};
use super::{LoadContext, required, unknown_key};

pub(super) fn load_class(
    reader: &mut EventReader<'_>,
    ctx: &LoadContext<'_>,
    id: ClassId,
    location: Location,
) -> Result<Class, ModelException> {
    let mut name: Option<LocatedString> = None;
    let mut trigram = None;
    let mut sql_name = None;
    let mut plural_name = None;
    let mut label = None;
    let mut comment = String::new();
    let mut extends = None;
    let mut reference = false;
    let mut is_abstract = false;
    let mut decorators = Vec::new();
    let mut properties: Option<Vec<PropertyDraft>> = None;
    let mut unique_keys = Vec::new();
    let mut values = Vec::new();
    let mut default_property = None;
    let mut order_property = None;
    let mut flag_property = None;

    reader.mapping(|reader, key| {
        match key.as_str() {
            "name" => name = reader.optional_scalar()?,
            "trigram" => trigram = reader.optional_scalar()?,
            "sqlName" => sql_name = reader.optional_scalar()?.map(|v| v.value),
            "pluralName" => plural_name = reader.optional_scalar()?.map(|v| v.value),
            "label" => label = reader.optional_scalar()?.map(|v| v.value),
            "comment" => comment = reader.string()?,
            "extends" => extends = reader.optional_scalar()?.map(Reference::new),
            "reference" => reference = reader.bool()?,
            "abstract" => is_abstract = reader.bool()?,
            "decorators" => decorators = load_decorator_usages(reader)?,
            "properties" => properties = Some(load_property_list(reader)?),
            "unique" => {
                reader.sequence(|reader| {
                    let group = reader.scalar_list()?.into_iter().map(Reference::new).collect();
                    unique_keys.push(group);
                    Ok(())
                })?;
            }
            "values" => {
                if properties.is_none() {
                    return Err(reader.error(
                        key.location,
                        "Les valeurs d'une classe doivent être déclarées après ses propriétés.",
                    ));
                }
                values = load_values(reader)?;
            }
            "defaultProperty" => default_property = reader.optional_scalar()?.map(Reference::new),
            "orderProperty" => order_property = reader.optional_scalar()?.map(Reference::new),
            "flagProperty" => flag_property = reader.optional_scalar()?.map(Reference::new),
            _ => return Err(unknown_key(reader, &key, "une classe")),
        }
        Ok(())
    })?;

    let name = required(reader, name, location, "La classe doit avoir un nom.")?;
    let properties = properties.unwrap_or_default();
    check_required_values(reader, &name, &properties, &values)?;

    let plural_name = plural_name.unwrap_or_else(|| pluralize(&name.value));
    let sql_name = sql_name.unwrap_or_else(|| {
        if ctx.naming.pluralize_table_names {
            to_constant_case(&plural_name)
        } else {
            to_constant_case(&name.value)
        }
    });

    Ok(Class {
        id,
        label: label.unwrap_or_else(|| name.value.clone()),
        name,
        trigram,
        sql_name,
        plural_name,
        comment,
        extends,
        decorators,
        properties: finish_properties(properties, PropertyOwner::Class(id)),
        unique_keys,
        values,
        reference,
        is_abstract,
        default_property,
        order_property,
        flag_property,
        namespace: ctx.namespace.clone(),
        location,
    })
}

/// Either a decorator name or `{ decorator, parameters }`.
fn load_decorator_usages(
    reader: &mut EventReader<'_>,
) -> Result<Vec<DecoratorUsage>, ModelException> {
    let mut usages = Vec::new();
    reader.sequence(|reader| {
        if !reader.is_next(&EventKind::MappingStart) {
            usages.push(DecoratorUsage {
                decorator: Reference::new(reader.scalar()?),
                parameters: Vec::new(),
            });
            return Ok(());
        }

        let location = reader.location();
        let mut decorator = None;
        let mut parameters = Vec::new();
        reader.mapping(|reader, key| {
            match key.as_str() {
                "decorator" => decorator = reader.optional_scalar()?,
                "parameters" => {
                    parameters = reader.scalar_list()?.into_iter().map(|p| p.value).collect()
                }
                _ => return Err(unknown_key(reader, &key, "un décorateur de classe")),
            }
            Ok(())
        })?;
        let decorator = required(reader, decorator, location, "Le nom du décorateur est requis.")?;
        usages.push(DecoratorUsage {
            decorator: Reference::new(decorator),
            parameters,
        });
        Ok(())
    })?;
    Ok(usages)
}

fn load_values(reader: &mut EventReader<'_>) -> Result<Vec<ReferenceValue>, ModelException> {
    let mut values = Vec::new();
    reader.mapping(|reader, name| {
        let mut fields = Vec::new();
        reader.mapping(|reader, field| {
            if let Some(value) = reader.optional_scalar()? {
                fields.push(ValueField {
                    property: Reference::new(field),
                    value,
                });
            }
            Ok(())
        })?;
        values.push(ReferenceValue { name, fields });
        Ok(())
    })?;
    Ok(values)
}

/// Every value must set the class's required, non-key regular properties.
fn check_required_values(
    reader: &EventReader<'_>,
    class_name: &LocatedString,
    properties: &[PropertyDraft],
    values: &[ReferenceValue],
) -> Result<(), ModelException> {
    for value in values {
        for property in properties.iter().filter(|p| p.is_required_value_field()) {
            let Some(property_name) = property.name() else {
                continue;
            };
            if value.get_by_name(property_name).is_none() {
                return Err(reader.error(
                    value.name.location,
                    format!(
                        "La valeur '{}' de la classe '{}' doit initialiser la propriété obligatoire '{}'.",
                        value.name.value, class_name.value, property_name
                    ),
                ));
            }
        }
    }
    Ok(())
}
