//! Application state for the dataset corrector API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::CorrectionRules;

/// Shared application state.
///
/// Holds the correction rules, shared read-only across requests. Each
/// request runs its own pipeline with its own running tally.
#[derive(Clone)]
pub struct AppState {
    rules: Arc<CorrectionRules>,
}

impl AppState {
    /// Creates a new application state with the given rules.
    pub fn new(rules: CorrectionRules) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    /// Returns a reference to the correction rules.
    pub fn rules(&self) -> &CorrectionRules {
        &self.rules
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CorrectionRules::default())
    }
}
