use crate::base::Location;
use crate::error::ModelException;
use crate::model::{Endpoint, EndpointId, HttpMethod, PropertyOwner};
use crate::syntax::EventReader;

use super::property::{finish_properties, load_property, load_property_list};
use super::{LoadContext, required, unknown_key};

pub(super) fn load_endpoint(
    reader: &mut EventReader<'_>,
    ctx: &LoadContext<'_>,
    id: EndpointId,
    location: Location,
) -> Result<Endpoint, ModelException> {
    let mut name = None;
    let mut method = None;
    let mut route = String::new();
    let mut description = String::new();
    let mut params = Vec::new();
    let mut returns = None;
    let mut preserve_property_casing = false;

    reader.mapping(|reader, key| {
        match key.as_str() {
            "name" => name = reader.optional_scalar()?,
            "method" => {
                let value = reader.scalar()?;
                method = Some(HttpMethod::parse(value.as_str()).ok_or_else(|| {
                    reader.error(
                        value.location,
                        format!("Méthode HTTP inconnue : '{}'.", value.value),
                    )
                })?);
            }
            "route" => route = reader.string()?,
            "description" => description = reader.string()?,
            "params" => params = load_property_list(reader)?,
            "returns" => returns = Some(load_property(reader)?),
            "preservePropertyCasing" => preserve_property_casing = reader.bool()?,
            _ => return Err(unknown_key(reader, &key, "un endpoint")),
        }
        Ok(())
    })?;

    let name = required(reader, name, location, "L'endpoint doit avoir un nom.")?;
    let method = required(
        reader,
        method,
        location,
        "L'endpoint doit définir une méthode HTTP.",
    )?;

    Ok(Endpoint {
        id,
        name,
        method,
        route,
        description,
        params: finish_properties(params, PropertyOwner::EndpointParam(id)),
        returns: returns
            .map(|draft| finish_properties(vec![draft], PropertyOwner::EndpointReturn(id)))
            .and_then(|mut list| list.pop()),
        preserve_property_casing,
        namespace: ctx.namespace.clone(),
        location,
    })
}
