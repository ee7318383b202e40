//! Shared fixtures and assertions for the integration tests.

pub mod diagnostic_helpers;
pub mod model_fixtures;
