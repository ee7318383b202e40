use crate::base::Location;
use crate::error::ModelException;
use crate::model::{Alias, AliasId, Reference};
use crate::syntax::EventReader;

use super::{required, unknown_key};

pub(super) fn load_alias(
    reader: &mut EventReader<'_>,
    id: AliasId,
    location: Location,
) -> Result<Alias, ModelException> {
    let mut file = None;
    let mut classes = None;
    let mut endpoints = None;

    reader.mapping(|reader, key| {
        match key.as_str() {
            "file" => file = reader.optional_scalar()?,
            "classes" => {
                classes = Some(reader.scalar_list()?.into_iter().map(Reference::new).collect())
            }
            "endpoints" => {
                endpoints = Some(reader.scalar_list()?.into_iter().map(Reference::new).collect())
            }
            _ => return Err(unknown_key(reader, &key, "un alias")),
        }
        Ok(())
    })?;

    let file = required(reader, file, location, "L'alias doit définir un fichier.")?;
    Ok(Alias {
        id,
        file: Reference::new(file),
        classes,
        endpoints,
        location,
    })
}
