//! Syntax layer: the structured parse-event stream consumed by the loader.
//!
//! The loader never sees raw text. A model file is first turned into a flat
//! sequence of [`Event`]s (stream, document, mapping, sequence and scalar
//! events, each with its source [`Location`](crate::base::Location)), then
//! walked with an [`EventReader`].
//!
//! ```text
//! text ──tokenize──▶ Vec<Event> ──EventReader──▶ file loader
//! ```

mod event;
mod reader;
mod yaml;

pub use event::{Event, EventKind};
pub use reader::EventReader;
pub use yaml::tokenize;
