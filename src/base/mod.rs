//! Foundation types for the model engine.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Stable identifiers for loaded model files
//! - [`Position`], [`Span`], [`Location`] - Line/column source positions
//! - [`Located`], [`LocatedString`] - Values annotated with where they were written
//! - [`case`] - Case conversion and pluralization used by naming rules
//!
//! This module has NO dependencies on other modules of the crate.

pub mod case;
mod file_id;
mod located;
mod position;

pub use file_id::{FileId, FileRegistry};
pub use located::{Located, LocatedString};
pub use position::{Location, Position, Span};
