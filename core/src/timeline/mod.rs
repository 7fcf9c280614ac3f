//! Timeline model
//!
//! A `RecipeTimeline` is the immutable, validated brew plan: an ordered list
//! of `RecipeStep`s. It answers one question for the timer engine: which step
//! is current at a given elapsed second.
//!
//! # Step resolution
//!
//! Steps are scanned in order and the first match wins:
//! 1. `elapsed` falls inside `[start, start + duration)`
//! 2. the step is the last one and `elapsed >= start`
//!
//! If nothing matches (a gap between steps, or before the first step starts)
//! the most recently started non-empty step is returned, or step 0 if none
//! has started. Zero-duration steps are only ever current as the final step.
//! Resolution is therefore total on any non-empty timeline.

mod error;
mod step;


pub use error::TimelineError;
pub use step::RecipeStep;

use brewlog_types::RecipeStepInput;

/// An ordered, validated sequence of brew steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeTimeline {
    steps: Vec<RecipeStep>,
}

impl RecipeTimeline {
    /// Validate and build a timeline.
    ///
    /// Rejects unordered steps, overlapping step windows, decreasing or
    /// non-finite water amounts, non-finite temperatures, and steps that end
    /// beyond `u32::MAX` seconds.
    pub fn new(steps: Vec<RecipeStep>) -> Result<Self, TimelineError> {
        validate(&steps)?;
        Ok(Self { steps })
    }

    /// A timeline with no steps. The engine finishes on the first start.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[RecipeStep] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&RecipeStep> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Last step's start + duration, 0 if empty
    pub fn total_duration_secs(&self) -> u32 {
        self.steps.last().map(RecipeStep::end_secs).unwrap_or(0)
    }

    /// End of the window of step `index`
    pub fn step_end_secs(&self, index: usize) -> Option<u32> {
        self.steps.get(index).map(RecipeStep::end_secs)
    }

    /// Water target of the final step (0 if empty)
    pub fn final_water_amount(&self) -> f64 {
        self.steps
            .last()
            .map(|s| s.cumulative_water_ml)
            .unwrap_or(0.0)
    }

    /// Resolve the current step for `elapsed_secs`. `None` only when empty.
    ///
    /// Pure and linear in step count; the engine calls it every tick.
    pub fn resolve_step(&self, elapsed_secs: u32) -> Option<usize> {
        let last = self.steps.len().checked_sub(1)?;

        let matched = self.steps.iter().enumerate().find_map(|(index, step)| {
            let is_final_match = index == last && elapsed_secs >= step.start_offset_secs;
            (step.contains(elapsed_secs) || is_final_match).then_some(index)
        });

        matched.or_else(|| {
            Some(
                self.steps
                    .iter()
                    .rposition(|s| s.duration_secs > 0 && s.start_offset_secs <= elapsed_secs)
                    .unwrap_or(0),
            )
        })
    }
}

impl TryFrom<Vec<RecipeStepInput>> for RecipeTimeline {
    type Error = TimelineError;

    fn try_from(inputs: Vec<RecipeStepInput>) -> Result<Self, Self::Error> {
        let steps = inputs
            .into_iter()
            .enumerate()
            .map(|(index, input)| RecipeStep::from_input(index, input))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(steps)
    }
}

fn validate(steps: &[RecipeStep]) -> Result<(), TimelineError> {
    let mut previous: Option<&RecipeStep> = None;

    for (index, step) in steps.iter().enumerate() {
        if step
            .start_offset_secs
            .checked_add(step.duration_secs)
            .is_none()
        {
            return Err(TimelineError::OutOfRange { index });
        }

        let water = step.cumulative_water_ml;
        if !water.is_finite() || water < 0.0 {
            return Err(TimelineError::InvalidWaterAmount {
                index,
                value: water,
            });
        }

        if let Some(temp) = step.water_temp_c.filter(|t| !t.is_finite()) {
            return Err(TimelineError::InvalidTemperature { index, value: temp });
        }

        if let Some(prev) = previous {
            if step.start_offset_secs < prev.start_offset_secs {
                return Err(TimelineError::Unordered {
                    index,
                    start: step.start_offset_secs,
                    previous_start: prev.start_offset_secs,
                });
            }
            if step.start_offset_secs < prev.end_secs() {
                return Err(TimelineError::Overlapping {
                    index,
                    start: step.start_offset_secs,
                    previous_end: prev.end_secs(),
                });
            }
            if water < prev.cumulative_water_ml {
                return Err(TimelineError::DecreasingWater {
                    index,
                    amount: water,
                    previous: prev.cumulative_water_ml,
                });
            }
        }

        previous = Some(step);
    }

    Ok(())
}
