use crate::base::{Location, LocatedString};
use crate::error::ModelException;
use crate::model::{EndpointOptions, FileOptions, ModelFile, Reference};
use crate::syntax::EventReader;

use super::{required, unknown_key};

/// The first document of a model file.
pub(super) struct Header {
    pub module: LocatedString,
    pub tags: Vec<String>,
    pub uses: Vec<LocatedString>,
    pub options: FileOptions,
}

impl Header {
    pub fn apply(self, file: &mut ModelFile) {
        file.tags = self.tags;
        file.uses = self.uses.into_iter().map(Reference::new).collect();
        file.options = self.options;
    }
}

pub(super) fn load_header(
    reader: &mut EventReader<'_>,
    location: Location,
) -> Result<Header, ModelException> {
    let mut module = None;
    let mut tags = Vec::new();
    let mut uses = Vec::new();
    let mut options = FileOptions::default();

    reader.mapping(|reader, key| {
        match key.as_str() {
            "module" => module = reader.optional_scalar()?,
            "tags" => tags = reader.scalar_list()?.into_iter().map(|t| t.value).collect(),
            "uses" => uses = reader.scalar_list()?,
            "options" => options = load_options(reader)?,
            _ => return Err(unknown_key(reader, &key, "l'en-tête du fichier")),
        }
        Ok(())
    })?;

    let module = required(reader, module, location, "Le fichier doit définir un module.")?;
    Ok(Header {
        module,
        tags,
        uses,
        options,
    })
}

fn load_options(reader: &mut EventReader<'_>) -> Result<FileOptions, ModelException> {
    let mut options = FileOptions::default();
    reader.mapping(|reader, key| {
        match key.as_str() {
            "endpoints" => options.endpoints = load_endpoint_options(reader)?,
            _ => return Err(unknown_key(reader, &key, "les options du fichier")),
        }
        Ok(())
    })?;
    Ok(options)
}

fn load_endpoint_options(reader: &mut EventReader<'_>) -> Result<EndpointOptions, ModelException> {
    let mut options = EndpointOptions::default();
    reader.mapping(|reader, key| {
        match key.as_str() {
            "fileName" => options.file_name = reader.optional_scalar()?.map(|v| v.value),
            "prefix" => options.prefix = reader.optional_scalar()?.map(|v| v.value),
            _ => return Err(unknown_key(reader, &key, "les options d'endpoints")),
        }
        Ok(())
    })?;
    Ok(options)
}
