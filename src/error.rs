//! Fatal errors raised while loading a single model file.

use thiserror::Error;

use crate::base::Location;

/// A fatal, file-local error: the file cannot be turned into a model.
///
/// Loading stops at the first one. The label points at the offending
/// source position as `File/Name[line,column]` (1-based, for humans).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{label} - {message}")]
pub struct ModelException {
    pub message: String,
    pub label: String,
    pub location: Option<Location>,
}

impl ModelException {
    pub fn new(file_name: &str, location: Location, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            label: format!(
                "{}[{},{}]",
                file_name,
                location.span.start.line + 1,
                location.span.start.column + 1
            ),
            location: Some(location),
        }
    }

    /// An error with no usable source position (I/O, unreadable file).
    pub fn without_location(file_name: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            label: file_name.to_string(),
            location: None,
        }
    }
}
