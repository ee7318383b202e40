//! Linking tests over the sample model.

pub mod tests_linking;
pub mod tests_model_properties;
