//! Validation context.

use chrono::{Datelike, Local};

/// Context for a validation pass.
///
/// Carries the values a check needs from outside the dataset. The reference
/// year used by `max_year_current` lives here so callers (and tests) can pin
/// it instead of reading the clock inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    /// Year that `max_year_current` values may not exceed
    pub reference_year: i32,
}

impl ValidationContext {
    /// Creates a context whose reference year is the current local year.
    pub fn new() -> Self {
        Self {
            reference_year: Local::now().year(),
        }
    }

    /// Creates a context pinned to the given reference year.
    pub fn for_year(reference_year: i32) -> Self {
        Self { reference_year }
    }

    /// Sets the reference year.
    pub fn with_reference_year(mut self, reference_year: i32) -> Self {
        self.reference_year = reference_year;
        self
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new()
    }
}
