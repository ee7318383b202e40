//! Diagnostic assertion helpers.

#![allow(dead_code)]

use topmodel::{ModelError, ModelErrorType, ModelStore};

pub fn diagnostics(store: &ModelStore) -> Vec<&ModelError> {
    store.errors().values().flatten().collect()
}

pub fn errors(store: &ModelStore) -> Vec<&ModelError> {
    diagnostics(store).into_iter().filter(|e| e.is_error()).collect()
}

pub fn count(store: &ModelStore, kind: ModelErrorType) -> usize {
    diagnostics(store).iter().filter(|e| e.kind == kind).count()
}

/// Assert a linked store has no errors (warnings allowed).
pub fn assert_no_errors(store: &ModelStore) {
    let errors = errors(store);
    assert!(
        errors.is_empty(),
        "Expected no errors, got {} error(s):\n{}",
        errors.len(),
        errors
            .iter()
            .map(|e| format!("  {e}"))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
