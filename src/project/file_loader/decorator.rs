use indexmap::IndexMap;

use crate::base::Location;
use crate::error::ModelException;
use crate::model::{Decorator, DecoratorId, DecoratorImplementation, PropertyOwner};
use crate::syntax::EventReader;

use super::property::{finish_properties, load_property_list};
use super::{LoadContext, required, unknown_key};

const DECORATOR_LANGUAGES: &[&str] = &["csharp", "java", "ts", "php"];

pub(super) fn load_decorator(
    reader: &mut EventReader<'_>,
    ctx: &LoadContext<'_>,
    id: DecoratorId,
    location: Location,
) -> Result<Decorator, ModelException> {
    let mut name = None;
    let mut description = String::new();
    let mut properties = Vec::new();
    let mut implementations = IndexMap::new();

    reader.mapping(|reader, key| {
        match key.as_str() {
            "name" => name = reader.optional_scalar()?,
            "description" => description = reader.string()?,
            "properties" => properties = load_property_list(reader)?,
            language if DECORATOR_LANGUAGES.contains(&language) => {
                let implementation = load_implementation(reader)?;
                implementations.insert(key.value.clone(), implementation);
            }
            _ => return Err(unknown_key(reader, &key, "un décorateur")),
        }
        Ok(())
    })?;

    let name = required(reader, name, location, "Le décorateur doit avoir un nom.")?;
    Ok(Decorator {
        id,
        name,
        description,
        properties: finish_properties(properties, PropertyOwner::Decorator(id)),
        implementations,
        namespace: ctx.namespace.clone(),
        location,
    })
}

fn load_implementation(
    reader: &mut EventReader<'_>,
) -> Result<DecoratorImplementation, ModelException> {
    let mut implementation = DecoratorImplementation::default();
    reader.mapping(|reader, key| {
        match key.as_str() {
            "extends" => implementation.extends = reader.optional_scalar()?.map(|v| v.value),
            "implements" => {
                implementation.implements =
                    reader.scalar_list()?.into_iter().map(|v| v.value).collect()
            }
            "annotations" => {
                implementation.annotations =
                    reader.scalar_list()?.into_iter().map(|v| v.value).collect()
            }
            _ => return Err(unknown_key(reader, &key, "une implémentation de décorateur")),
        }
        Ok(())
    })?;
    Ok(implementation)
}
