//! A single validated brew step

use brewlog_types::RecipeStepInput;

use super::error::TimelineError;

/// One instruction in a validated brew plan.
///
/// `action`, `description` and `water_temp_c` are display data; the engine
/// only looks at the time window.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeStep {
    /// When the step becomes active, relative to brew start
    pub start_offset_secs: u32,
    /// Nominal length of the step
    pub duration_secs: u32,
    /// Running total of water (ml) expected in the vessel by the end of this step
    pub cumulative_water_ml: f64,
    pub action: String,
    pub description: String,
    pub water_temp_c: Option<f64>,
}

impl RecipeStep {
    pub fn new(
        start_offset_secs: u32,
        duration_secs: u32,
        cumulative_water_ml: f64,
        action: impl Into<String>,
    ) -> Self {
        Self {
            start_offset_secs,
            duration_secs,
            cumulative_water_ml,
            action: action.into(),
            description: String::new(),
            water_temp_c: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Exclusive end of the step window. Saturates; the timeline validator
    /// rejects steps that would actually overflow.
    #[inline]
    pub fn end_secs(&self) -> u32 {
        self.start_offset_secs.saturating_add(self.duration_secs)
    }

    /// True if `elapsed_secs` falls in `[start, start + duration)`.
    /// Zero-duration steps never contain anything.
    #[inline]
    pub fn contains(&self, elapsed_secs: u32) -> bool {
        elapsed_secs >= self.start_offset_secs && elapsed_secs < self.end_secs()
    }

    /// Convert one wire-format step, checking the per-step invariants.
    pub(crate) fn from_input(index: usize, input: RecipeStepInput) -> Result<Self, TimelineError> {
        let start_offset_secs = whole_seconds(index, "start offset", input.start_offset_sec)?;
        let duration_secs = whole_seconds(index, "duration", input.duration_sec)?;

        Ok(Self {
            start_offset_secs,
            duration_secs,
            cumulative_water_ml: input.cumulative_water_amount,
            action: input.action,
            description: input.description,
            water_temp_c: input.water_temp_c,
        })
    }
}

fn whole_seconds(index: usize, field: &'static str, value: f64) -> Result<u32, TimelineError> {
    let valid = value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64;
    if !valid {
        return Err(TimelineError::InvalidSeconds {
            index,
            field,
            value,
        });
    }
    Ok(value as u32)
}
