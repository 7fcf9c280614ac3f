//! Presentation helpers derived from a timer snapshot
//!
//! Pure functions; hosts call these when rendering the clock and step list.

use crate::timeline::RecipeTimeline;

use super::state::{RunState, TimerState};

/// Where a step sits relative to the brew's progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Past,
    Current,
    Upcoming,
}

/// Every step is `Past` once the brew has finished.
pub fn step_status(state: &TimerState, index: usize) -> StepStatus {
    if state.is_finished() {
        return StepStatus::Past;
    }
    match state.current_step {
        Some(current) if index < current => StepStatus::Past,
        Some(current) if index == current => StepStatus::Current,
        _ => StepStatus::Upcoming,
    }
}

/// Seconds until the current step's window ends
pub fn step_remaining_secs(state: &TimerState, timeline: &RecipeTimeline) -> u32 {
    state
        .current_step
        .and_then(|i| timeline.step_end_secs(i))
        .map(|end| end.saturating_sub(state.elapsed_secs))
        .unwrap_or(0)
}

/// Fraction of the current step's window that has passed, 0.0-1.0.
/// Zero-duration steps report 0.
pub fn step_progress(state: &TimerState, timeline: &RecipeTimeline) -> f32 {
    let Some(step) = state.current_step.and_then(|i| timeline.step(i)) else {
        return 0.0;
    };
    if step.duration_secs == 0 {
        return 0.0;
    }
    let remaining = step_remaining_secs(state, timeline).min(step.duration_secs);
    let done = step.duration_secs - remaining;
    (done as f32 / step.duration_secs as f32).clamp(0.0, 1.0)
}

/// Caption for the start/pause control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleLabel {
    Start,
    Pause,
    Resume,
    Done,
}

impl ToggleLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleLabel::Start => "Start",
            ToggleLabel::Pause => "Pause",
            ToggleLabel::Resume => "Resume",
            ToggleLabel::Done => "Done",
        }
    }
}

pub fn toggle_label(state: &TimerState) -> ToggleLabel {
    match state.run_state {
        RunState::Finished => ToggleLabel::Done,
        RunState::Running => ToggleLabel::Pause,
        RunState::Paused => ToggleLabel::Resume,
        RunState::Idle => ToggleLabel::Start,
    }
}

/// `MM:SS`; minutes grow past two digits for long brews
pub fn format_digital_time(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `1m 05s`, or `45s` under a minute
pub fn format_friendly_time(secs: u32) -> String {
    let (minutes, seconds) = (secs / 60, secs % 60);
    if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::RecipeStep;

    fn timeline() -> RecipeTimeline {
        RecipeTimeline::new(vec![
            RecipeStep::new(0, 40, 40.0, "Bloom"),
            RecipeStep::new(40, 0, 40.0, "Swirl"),
            RecipeStep::new(40, 40, 120.0, "Pour"),
        ])
        .unwrap()
    }

    fn state(run_state: RunState, elapsed_secs: u32, current_step: Option<usize>) -> TimerState {
        TimerState {
            run_state,
            elapsed_secs,
            current_step,
            total_secs: 80,
            sound_enabled: true,
        }
    }

    #[test]
    fn test_format_digital_time() {
        assert_eq!(format_digital_time(0), "00:00");
        assert_eq!(format_digital_time(65), "01:05");
        assert_eq!(format_digital_time(6000), "100:00");
    }

    #[test]
    fn test_format_friendly_time() {
        assert_eq!(format_friendly_time(45), "45s");
        assert_eq!(format_friendly_time(65), "1m 05s");
        assert_eq!(format_friendly_time(120), "2m 00s");
    }

    #[test]
    fn test_step_status() {
        let running = state(RunState::Running, 50, Some(2));
        assert_eq!(step_status(&running, 0), StepStatus::Past);
        assert_eq!(step_status(&running, 2), StepStatus::Current);

        let idle = state(RunState::Idle, 0, Some(0));
        assert_eq!(step_status(&idle, 1), StepStatus::Upcoming);

        let finished = state(RunState::Finished, 80, Some(2));
        assert_eq!(step_status(&finished, 2), StepStatus::Past);
    }

    #[test]
    fn test_step_remaining_and_progress() {
        let timeline = timeline();
        let s = state(RunState::Running, 10, Some(0));
        assert_eq!(step_remaining_secs(&s, &timeline), 30);
        assert!((step_progress(&s, &timeline) - 0.25).abs() < 1e-6);

        let zero = state(RunState::Running, 40, Some(1));
        assert_eq!(step_progress(&zero, &timeline), 0.0);
    }

    #[test]
    fn test_progress_without_step() {
        let empty = RecipeTimeline::empty();
        let s = state(RunState::Finished, 0, None);
        assert_eq!(step_remaining_secs(&s, &empty), 0);
        assert_eq!(step_progress(&s, &empty), 0.0);
    }

    #[test]
    fn test_toggle_labels() {
        assert_eq!(toggle_label(&state(RunState::Idle, 0, Some(0))), ToggleLabel::Start);
        assert_eq!(toggle_label(&state(RunState::Running, 3, Some(0))), ToggleLabel::Pause);
        assert_eq!(toggle_label(&state(RunState::Paused, 3, Some(0))), ToggleLabel::Resume);
        assert_eq!(toggle_label(&state(RunState::Finished, 80, Some(2))).as_str(), "Done");
    }
}
