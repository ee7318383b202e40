use std::fmt;

use crate::base::Location;

/// Kind of a parse event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    StreamStart,
    StreamEnd,
    DocumentStart,
    DocumentEnd,
    MappingStart,
    MappingEnd,
    SequenceStart,
    SequenceEnd,
    Scalar(String),
}

impl EventKind {
    /// Compare kinds ignoring scalar payloads.
    pub fn same_kind(&self, other: &EventKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn display(&self) -> &'static str {
        match self {
            EventKind::StreamStart => "début de flux",
            EventKind::StreamEnd => "fin de flux",
            EventKind::DocumentStart => "début de document",
            EventKind::DocumentEnd => "fin de document",
            EventKind::MappingStart => "objet",
            EventKind::MappingEnd => "fin d'objet",
            EventKind::SequenceStart => "liste",
            EventKind::SequenceEnd => "fin de liste",
            EventKind::Scalar(_) => "valeur",
        }
    }
}

/// A parse event with the location it was produced from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub location: Location,
}

impl Event {
    pub fn new(kind: EventKind, location: Location) -> Self {
        Self { kind, location }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match &self.kind {
            EventKind::Scalar(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            EventKind::Scalar(value) => write!(f, "'{value}'"),
            kind => f.write_str(kind.display()),
        }
    }
}
