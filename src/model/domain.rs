use indexmap::IndexMap;

use crate::base::{FileId, Location, LocatedString};

use super::{DomainId, DomainReference};

/// Target languages a domain or decorator can carry an implementation for.
pub const LANGUAGES: &[&str] = &["csharp", "java", "ts", "php", "sql"];

/// How a domain is rendered in one target language.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DomainImplementation {
    /// Type name. May contain `{T}`, replaced by the wrapped type when the
    /// domain is used as a list or composition wrapper.
    pub type_name: Option<String>,
    pub imports: Vec<String>,
    pub annotations: Vec<String>,
}

/// A primitive type shared by many properties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domain {
    pub id: DomainId,
    pub name: LocatedString,
    pub label: Option<String>,
    pub length: Option<u32>,
    pub scale: Option<u32>,
    pub auto_generated_value: bool,
    pub media_type: Option<String>,
    /// Endpoint parameters of this domain are sent in the request body.
    pub body_param: bool,
    /// Alternate domains by "as" name (`list` → `DO_ID_LIST`).
    pub as_domains: IndexMap<String, DomainReference>,
    /// Implementations by language (see [`LANGUAGES`]).
    pub implementations: IndexMap<String, DomainImplementation>,
    pub location: Location,
}

impl Domain {
    pub fn file(&self) -> FileId {
        self.id.file
    }

    pub fn name(&self) -> &str {
        &self.name.value
    }

    pub fn implementation(&self, language: &str) -> Option<&DomainImplementation> {
        self.implementations.get(language)
    }

    /// Type name for a language, if the domain declares one.
    pub fn type_name(&self, language: &str) -> Option<&str> {
        self.implementation(language)?.type_name.as_deref()
    }

    pub fn sql_type(&self) -> Option<&str> {
        self.type_name("sql")
    }
}
