//! Error types for timeline ingestion

use thiserror::Error;

/// A recipe step list that breaks the timeline invariants.
///
/// Raised only at ingestion; a `RecipeTimeline` that exists is valid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    #[error("step {index}: {field} must be a whole number of seconds >= 0 (got {value})")]
    InvalidSeconds {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("step {index}: water amount must be a finite value >= 0 (got {value})")]
    InvalidWaterAmount { index: usize, value: f64 },

    #[error("step {index}: water temperature must be a finite value (got {value})")]
    InvalidTemperature { index: usize, value: f64 },

    #[error("step {index} starts at {start}s, before the previous step at {previous_start}s")]
    Unordered {
        index: usize,
        start: u32,
        previous_start: u32,
    },

    #[error("step {index} starts at {start}s, inside the previous step which runs until {previous_end}s")]
    Overlapping {
        index: usize,
        start: u32,
        previous_end: u32,
    },

    #[error("step {index}: water amount {amount}ml is below the previous step's {previous}ml")]
    DecreasingWater {
        index: usize,
        amount: f64,
        previous: f64,
    },

    #[error("step {index} ends beyond the supported time range")]
    OutOfRange { index: usize },
}
