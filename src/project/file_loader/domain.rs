use indexmap::IndexMap;

use crate::base::Location;
use crate::error::ModelException;
use crate::model::{Domain, DomainId, DomainImplementation, LANGUAGES, Reference};
use crate::syntax::EventReader;

use super::{required, unknown_key};

pub(super) fn load_domain(
    reader: &mut EventReader<'_>,
    id: DomainId,
    location: Location,
) -> Result<Domain, ModelException> {
    let mut name = None;
    let mut label = None;
    let mut length = None;
    let mut scale = None;
    let mut auto_generated_value = false;
    let mut media_type = None;
    let mut body_param = false;
    let mut as_domains = IndexMap::new();
    let mut implementations = IndexMap::new();

    reader.mapping(|reader, key| {
        match key.as_str() {
            "name" => name = reader.optional_scalar()?,
            "label" => label = reader.optional_scalar()?.map(|v| v.value),
            "length" => length = Some(reader.number()?),
            "scale" => scale = Some(reader.number()?),
            "autoGeneratedValue" => auto_generated_value = reader.bool()?,
            "mediaType" => media_type = reader.optional_scalar()?.map(|v| v.value),
            "bodyParam" => body_param = reader.bool()?,
            "asDomains" => {
                reader.mapping(|reader, as_name| {
                    let target = reader.scalar()?;
                    as_domains.insert(as_name.value, Reference::new(target));
                    Ok(())
                })?;
            }
            language if LANGUAGES.contains(&language) => {
                let implementation = load_implementation(reader)?;
                implementations.insert(key.value.clone(), implementation);
            }
            _ => return Err(unknown_key(reader, &key, "un domaine")),
        }
        Ok(())
    })?;

    let name = required(reader, name, location, "Le domaine doit avoir un nom.")?;
    Ok(Domain {
        id,
        name,
        label,
        length,
        scale,
        auto_generated_value,
        media_type,
        body_param,
        as_domains,
        implementations,
        location,
    })
}

fn load_implementation(reader: &mut EventReader<'_>) -> Result<DomainImplementation, ModelException> {
    let mut implementation = DomainImplementation::default();
    reader.mapping(|reader, key| {
        match key.as_str() {
            "type" => implementation.type_name = reader.optional_scalar()?.map(|v| v.value),
            "imports" => {
                implementation.imports = reader.scalar_list()?.into_iter().map(|v| v.value).collect()
            }
            "annotations" => {
                implementation.annotations =
                    reader.scalar_list()?.into_iter().map(|v| v.value).collect()
            }
            _ => return Err(unknown_key(reader, &key, "une implémentation de domaine")),
        }
        Ok(())
    })?;
    Ok(implementation)
}
