//! Loading tests: single files and whole model directories.

pub mod tests_file_scenarios;
pub mod tests_workspace;
