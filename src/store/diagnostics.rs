//! Diagnostics: link-time error reporting.
//!
//! Problems found while linking the store are never returned as `Err`: each
//! becomes a [`ModelError`] attached to the file it was found in, so a
//! single pass reports every problem of the model.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::base::{FileId, Location};

// ============================================================================
// ERROR TAXONOMY
// ============================================================================

/// Severity level of a [`ModelError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

macro_rules! model_error_types {
    ($($(#[$meta:meta])* $variant:ident = $code:literal,)*) => {
        /// The kind of a link-time problem, with its stable `TMDxxxx` code.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum ModelErrorType {
            $($(#[$meta])* $variant,)*
        }

        impl ModelErrorType {
            pub const ALL: &'static [ModelErrorType] = &[$(ModelErrorType::$variant,)*];

            pub fn code(self) -> &'static str {
                match self {
                    $(ModelErrorType::$variant => $code,)*
                }
            }
        }
    };
}

model_error_types! {
    /// A file failed to load; only reported in watch mode.
    InvalidFile = "TMD0000",
    /// More than one primary key property without `allowCompositePrimaryKey`.
    CompositePrimaryKey = "TMD0001",
    DuplicateUse = "TMD0002",
    /// Two endpoints with the same name in one module.
    DuplicateEndpoint = "TMD0003",
    DuplicateProperty = "TMD0004",
    DuplicateClass = "TMD0005",
    DuplicateDomain = "TMD0006",
    DuplicateDecorator = "TMD0007",
    CircularInheritance = "TMD0008",
    CircularAlias = "TMD0009",
    /// Files using each other, directly or not.
    CircularDependency = "TMD0010",
    /// A query parameter declared before a route or body parameter.
    InvalidParameterOrder = "TMD0011",
    /// A `values` entry leaves a required field unset.
    MissingRequiredValue = "TMD0012",
    /// An association whose target has no single primary key.
    InvalidAssociationTarget = "TMD1001",
    ClassNotFound = "TMD1002",
    FileNotFound = "TMD1003",
    AsDomainNotFound = "TMD1004",
    DomainNotFound = "TMD1005",
    EndpointNotFound = "TMD1006",
    DecoratorNotFound = "TMD1007",
    PropertyNotFound = "TMD1008",
    /// Several base classes imposed for one language.
    DecoratorExtendsConflict = "TMD1010",
    UniqueKeyPropertyNotFound = "TMD1011",
    UnusedImport = "TMD9001",
    DuplicateTrigram = "TMD9002",
    UnusedDomain = "TMD9004",
}

impl ModelErrorType {
    pub fn severity(self) -> Severity {
        match self {
            ModelErrorType::UnusedImport | ModelErrorType::UnusedDomain => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.code() == code)
    }
}

impl fmt::Display for ModelErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ModelErrorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s.trim()).ok_or_else(|| format!("unknown error code '{s}'"))
    }
}

impl TryFrom<String> for ModelErrorType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModelErrorType> for String {
    fn from(kind: ModelErrorType) -> Self {
        kind.code().to_string()
    }
}

// ============================================================================
// MODEL ERROR
// ============================================================================

/// Secondary location attached to a [`ModelError`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelatedInfo {
    pub location: Location,
    pub message: String,
}

/// A problem found while linking, with the location it points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelError {
    pub kind: ModelErrorType,
    pub message: String,
    pub location: Location,
    pub related: Vec<RelatedInfo>,
}

impl ModelError {
    pub fn new(kind: ModelErrorType, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location,
            related: Vec::new(),
        }
    }

    pub fn with_related(mut self, location: Location, message: impl Into<String>) -> Self {
        self.related.push(RelatedInfo {
            location,
            message: message.into(),
        });
        self
    }

    pub fn file(&self) -> FileId {
        self.location.file
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.location.start();
        write!(
            f,
            "[{},{}] {} {}",
            start.line + 1,
            start.column + 1,
            self.kind,
            self.message
        )
    }
}

/// Errors grouped by the file they were found in.
pub type ErrorsByFile = BTreeMap<FileId, Vec<ModelError>>;

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects errors during a link pass.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    errors: Vec<ModelError>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ModelError) {
        self.errors.push(error);
    }

    pub fn error(&mut self, kind: ModelErrorType, location: Location, message: impl Into<String>) {
        self.add(ModelError::new(kind, location, message));
    }

    pub fn errors(&self) -> &[ModelError] {
        &self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.iter().filter(|e| e.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.errors.len() - self.error_count()
    }

    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(ModelError::is_error)
    }

    /// Drop suppressed kinds and group by file, keeping discovery order.
    pub fn finish(self, suppressed: &[ModelErrorType]) -> ErrorsByFile {
        let mut by_file = ErrorsByFile::new();
        for error in self.errors {
            if error.severity() == Severity::Warning && suppressed.contains(&error.kind) {
                continue;
            }
            by_file.entry(error.file()).or_default().push(error);
        }
        by_file
    }
}

// ============================================================================
// LINK REPORT
// ============================================================================

/// Outcome summary of [`ModelStore::link`](super::ModelStore::link).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub files: usize,
    pub classes: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl LinkReport {
    pub fn is_ok(&self) -> bool {
        self.errors == 0
    }
}
