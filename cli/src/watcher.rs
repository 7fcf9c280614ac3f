//! Prints brew progress as the session publishes snapshots

use std::sync::Arc;

use brewlog_core::timeline::RecipeTimeline;
use brewlog_core::timer::{RunState, TimerState, format_digital_time};
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const FINISHED_MESSAGE: &str = "Enjoy your coffee!";

/// What changed between two snapshots that's worth a line on the console
pub fn progress_line(
    previous: &TimerState,
    next: &TimerState,
    timeline: &RecipeTimeline,
) -> Option<String> {
    if next.run_state == RunState::Finished && previous.run_state != RunState::Finished {
        return Some(format!(
            "[{}] {}",
            format_digital_time(next.elapsed_secs),
            FINISHED_MESSAGE
        ));
    }

    if next.current_step == previous.current_step || !next.run_state.is_running() {
        return None;
    }

    let index = next.current_step?;
    let step = timeline.step(index)?;
    let mut line = format!(
        "[{}] Step {}/{}: {} (to {}ml)",
        format_digital_time(next.elapsed_secs),
        index + 1,
        timeline.len(),
        step.action,
        step.cumulative_water_ml
    );
    if !step.description.is_empty() {
        line.push_str(" - ");
        line.push_str(&step.description);
    }
    Some(line)
}

pub fn spawn_progress_printer(
    mut states: watch::Receiver<TimerState>,
    timeline: Arc<RecipeTimeline>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut previous = *states.borrow_and_update();
        while states.changed().await.is_ok() {
            let next = *states.borrow_and_update();
            if let Some(line) = progress_line(&previous, &next, &timeline) {
                println!("\n{line}");
            }
            previous = next;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewlog_core::timeline::RecipeStep;

    fn timeline() -> RecipeTimeline {
        RecipeTimeline::new(vec![
            RecipeStep::new(0, 30, 50.0, "Bloom").with_description("Wet all grounds"),
            RecipeStep::new(30, 30, 150.0, "Pour"),
        ])
        .unwrap()
    }

    fn state(run_state: RunState, elapsed_secs: u32, current_step: Option<usize>) -> TimerState {
        TimerState {
            run_state,
            elapsed_secs,
            current_step,
            total_secs: 60,
            sound_enabled: true,
        }
    }

    #[test]
    fn test_step_change_is_printed() {
        let line = progress_line(
            &state(RunState::Running, 29, Some(0)),
            &state(RunState::Running, 30, Some(1)),
            &timeline(),
        )
        .unwrap();
        assert_eq!(line, "[00:30] Step 2/2: Pour (to 150ml)");
    }

    #[test]
    fn test_start_prints_first_step() {
        let line = progress_line(
            &state(RunState::Idle, 0, None),
            &state(RunState::Running, 0, Some(0)),
            &timeline(),
        )
        .unwrap();
        assert!(line.ends_with("Bloom (to 50ml) - Wet all grounds"));
    }

    #[test]
    fn test_plain_tick_and_reset_are_quiet() {
        let tl = timeline();
        assert!(
            progress_line(
                &state(RunState::Running, 3, Some(0)),
                &state(RunState::Running, 4, Some(0)),
                &tl
            )
            .is_none()
        );
        assert!(
            progress_line(
                &state(RunState::Paused, 40, Some(1)),
                &state(RunState::Idle, 0, None),
                &tl
            )
            .is_none()
        );
    }

    #[test]
    fn test_finish_is_announced_once() {
        let tl = timeline();
        let finished = state(RunState::Finished, 60, None);
        let line = progress_line(&state(RunState::Running, 59, Some(1)), &finished, &tl).unwrap();
        assert!(line.contains(FINISHED_MESSAGE));
        assert!(progress_line(&finished, &finished, &tl).is_none());
    }
}
