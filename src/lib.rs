//! # topmodel-base
//!
//! Loading, linking and resolution engine for the TopModel YAML DSL.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! host      → batch runs and watch mode
//!   ↓
//! generator → emitter contract, output writer, lock file
//!   ↓
//! naming    → derived names, SQL names, resource keys, per-language types
//!   ↓
//! store     → ModelStore, link pass, validation, reverse associations
//!   ↓
//! project   → file loader, model file discovery, workspace loading
//!   ↓
//! error     → fatal per-file load errors
//! config    → ModelConfig, NamingConfig
//!   ↓
//! model     → entities, ids, lazy references
//!   ↓
//! syntax    → parse events over YAML, event reader
//!   ↓
//! base      → FileId, positions, located values, case conversion
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → model → config → error →
// project → store → naming → generator → host)
// ============================================================================

/// Foundation types: FileId, Location, Located values, case conversion
pub mod base;

/// Syntax: parse events with source positions, event reader
pub mod syntax;

/// Entity model: classes, properties, domains, decorators, endpoints
pub mod model;

/// Configuration: ModelConfig read from YAML, NamingConfig switches
pub mod config;

/// Fatal load errors
pub mod error;

/// Project loading: model files into a store
pub mod project;

/// Model store: linking, validation, queries, diagnostics
pub mod store;

/// Naming and typing resolver
pub mod naming;

/// Generator contract and lock file
pub mod generator;

/// Load/link/generate orchestration
pub mod host;

// Re-export foundation types
pub use base::{FileId, Located, LocatedString, Location, Position, Span};

pub use config::{ConfigError, ModelConfig, NamingConfig};
pub use error::ModelException;
pub use generator::{FileGenerator, GeneratedFile, GeneratorError, LockFile, ModelWatcher};
pub use host::{HostError, ModelHost};
pub use store::{LinkReport, ModelError, ModelErrorType, ModelStore, Severity};
