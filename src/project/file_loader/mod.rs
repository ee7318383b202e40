//! File loader: one model file to one [`ModelFile`].
//!
//! The loader walks the file's parse events with an [`EventReader`] and
//! fills entities field by field. Every block has an explicit list of
//! known keys; anything else is a fatal [`ModelException`]. References are
//! only recorded here, never resolved: that is the store's job once every
//! file is loaded.
//!
//! A file is a header document (`module`, `tags`, `uses`, `options`)
//! followed by one document per entity (`domain`, `decorator`, `class`,
//! `endpoint` or `alias`).

mod alias;
mod class;
mod decorator;
mod domain;
mod endpoint;
mod header;
mod property;

use std::path::Path;

use crate::base::{FileId, Location, LocatedString};
use crate::config::NamingConfig;
use crate::error::ModelException;
use crate::model::{AliasId, ClassId, DecoratorId, DomainId, EndpointId, ModelFile, Namespace};
use crate::syntax::{EventKind, EventReader, tokenize};

/// What the loader needs to know about the file being read.
pub(crate) struct LoadContext<'a> {
    pub file: FileId,
    pub namespace: Namespace,
    pub naming: &'a NamingConfig,
}

/// Load a model file from its content.
///
/// `name` is the model-relative file name (`Securite/Profil`), used in
/// error labels and as the target of other files' `uses`. Returns
/// `Ok(None)` for an empty file.
pub fn load_model_file(
    file: FileId,
    name: &str,
    source: &str,
    app: &str,
    naming: &NamingConfig,
) -> Result<Option<ModelFile>, ModelException> {
    let events = tokenize(file, name, source)?;
    let mut reader = EventReader::new(name, events);

    reader.expect(EventKind::StreamStart)?;
    if reader.consume_if(&EventKind::StreamEnd) {
        tracing::debug!("Skipping empty model file {name}");
        return Ok(None);
    }

    let start = reader.expect(EventKind::DocumentStart)?;
    let header = header::load_header(&mut reader, start.location)?;
    reader.expect(EventKind::DocumentEnd)?;

    let ctx = LoadContext {
        file,
        namespace: Namespace::new(app, header.module.value.clone()),
        naming,
    };
    let mut model_file = ModelFile::new(
        file,
        name,
        ctx.namespace.clone(),
        Location::point(file, 0, 0),
    );
    header.apply(&mut model_file);

    while reader.consume_if(&EventKind::DocumentStart) {
        load_entity(&mut reader, &ctx, &mut model_file)?;
        reader.expect(EventKind::DocumentEnd)?;
    }
    reader.expect(EventKind::StreamEnd)?;

    tracing::debug!(
        "Loaded {name}: {} classes, {} domains, {} endpoints",
        model_file.classes.len(),
        model_file.domains.len(),
        model_file.endpoints.len()
    );
    Ok(Some(model_file))
}

/// Read and load a model file from disk.
pub fn load_model_path(
    file: FileId,
    name: &str,
    path: &Path,
    app: &str,
    naming: &NamingConfig,
) -> Result<Option<ModelFile>, ModelException> {
    let source = std::fs::read_to_string(path).map_err(|e| {
        ModelException::without_location(name, format!("Impossible de lire le fichier : {e}"))
    })?;
    let mut model_file = load_model_file(file, name, &source, app, naming)?;
    if let Some(model_file) = model_file.as_mut() {
        model_file.path = Some(path.to_path_buf());
    }
    Ok(model_file)
}

fn load_entity(
    reader: &mut EventReader<'_>,
    ctx: &LoadContext<'_>,
    model_file: &mut ModelFile,
) -> Result<(), ModelException> {
    reader.expect(EventKind::MappingStart)?;
    let kind = reader.scalar()?;
    let file = ctx.file;

    match kind.as_str() {
        "domain" => {
            let id = DomainId::new(file, model_file.domains.len() as u32);
            model_file.domains.push(domain::load_domain(reader, id, kind.location)?);
        }
        "decorator" => {
            let id = DecoratorId::new(file, model_file.decorators.len() as u32);
            model_file
                .decorators
                .push(decorator::load_decorator(reader, ctx, id, kind.location)?);
        }
        "class" => {
            let id = ClassId::new(file, model_file.classes.len() as u32);
            model_file.classes.push(class::load_class(reader, ctx, id, kind.location)?);
        }
        "endpoint" => {
            let id = EndpointId::new(file, model_file.endpoints.len() as u32);
            model_file
                .endpoints
                .push(endpoint::load_endpoint(reader, ctx, id, kind.location)?);
        }
        "alias" => {
            let id = AliasId::new(file, model_file.aliases.len() as u32);
            model_file.aliases.push(alias::load_alias(reader, id, kind.location)?);
        }
        other => {
            return Err(reader.error(
                kind.location,
                format!("Type de document inconnu : '{other}'."),
            ));
        }
    }

    if !reader.consume_if(&EventKind::MappingEnd) {
        let location = reader.location();
        return Err(reader.error(
            location,
            "Un document ne peut déclarer qu'une seule entité.",
        ));
    }
    Ok(())
}

// ============================================================================
// SHARED HELPERS
// ============================================================================

pub(crate) fn unknown_key(reader: &EventReader<'_>, key: &LocatedString, block: &str) -> ModelException {
    reader.error(
        key.location,
        format!("Propriété '{}' inconnue pour {block}.", key.value),
    )
}

pub(crate) fn required<T>(
    reader: &EventReader<'_>,
    value: Option<T>,
    location: Location,
    message: &str,
) -> Result<T, ModelException> {
    value.ok_or_else(|| reader.error(location, message))
}
