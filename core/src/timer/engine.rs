//! The brew timer state machine

use std::sync::Arc;

use crate::audio::{AudioCues, CueKind};
use crate::timeline::RecipeTimeline;

use super::state::{RunState, TickOutcome, TimerState};

/// Owns the mutable timer state for one timeline.
///
/// Purely synchronous and infallible. Something else (the brew session, or a
/// test) calls `tick` once per second while the engine is running; the engine
/// never schedules anything itself.
#[derive(Debug)]
pub struct TimerEngine {
    timeline: Arc<RecipeTimeline>,
    run_state: RunState,
    elapsed_secs: u32,
    current_step: Option<usize>,
    audio: AudioCues,
}

impl TimerEngine {
    pub fn new(timeline: Arc<RecipeTimeline>, audio: AudioCues) -> Self {
        let current_step = timeline.resolve_step(0);
        Self {
            timeline,
            run_state: RunState::Idle,
            elapsed_secs: 0,
            current_step,
            audio,
        }
    }

    pub fn timeline(&self) -> &Arc<RecipeTimeline> {
        &self.timeline
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn current_step(&self) -> Option<usize> {
        self.current_step
    }

    pub fn snapshot(&self) -> TimerState {
        TimerState {
            run_state: self.run_state,
            elapsed_secs: self.elapsed_secs,
            current_step: self.current_step,
            total_secs: self.timeline.total_duration_secs(),
            sound_enabled: self.audio.is_enabled(),
        }
    }

    /// Start, pause or resume. Returns the new run state.
    ///
    /// Starting counts as a user gesture, so the audio output is acquired
    /// here. Resuming re-resolves the current step without a cue. A timeline
    /// with nothing to count finishes immediately.
    pub fn toggle(&mut self) -> RunState {
        match self.run_state {
            RunState::Finished => {}
            RunState::Running => {
                self.run_state = RunState::Paused;
                tracing::info!(elapsed = self.elapsed_secs, "Brew paused");
            }
            RunState::Idle | RunState::Paused => {
                self.audio.acquire();
                self.current_step = self.timeline.resolve_step(self.elapsed_secs);

                if self.elapsed_secs >= self.timeline.total_duration_secs() {
                    self.finish();
                } else {
                    tracing::info!(
                        elapsed = self.elapsed_secs,
                        step = ?self.current_step,
                        resumed = self.run_state == RunState::Paused,
                        "Brew running"
                    );
                    self.run_state = RunState::Running;
                }
            }
        }
        self.run_state
    }

    /// Advance one second. Does nothing unless running.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.run_state.is_running() {
            tracing::debug!(state = %self.run_state, "Ignoring tick");
            return TickOutcome::Ignored;
        }

        let total = self.timeline.total_duration_secs();
        self.elapsed_secs = self.elapsed_secs.saturating_add(1).min(total);
        tracing::debug!(elapsed = self.elapsed_secs, total, "Tick");

        if self.elapsed_secs >= total {
            self.current_step = self.timeline.resolve_step(total);
            self.finish();
            return TickOutcome::Finished;
        }

        let next = self.timeline.resolve_step(self.elapsed_secs);
        if next == self.current_step {
            return TickOutcome::Advanced;
        }

        let from = std::mem::replace(&mut self.current_step, next);
        tracing::info!(?from, to = ?next, elapsed = self.elapsed_secs, "Step changed");
        self.audio.play_cue(CueKind::StepTransition);
        TickOutcome::StepChanged { from, to: next }
    }

    /// Back to Idle at zero, from any state.
    pub fn reset(&mut self) {
        self.run_state = RunState::Idle;
        self.elapsed_secs = 0;
        self.current_step = self.timeline.resolve_step(0);
        tracing::info!("Brew reset");
    }

    /// Reset and release the audio output.
    pub fn teardown(&mut self) {
        self.reset();
        self.audio.release();
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.audio.set_enabled(enabled);
        tracing::debug!(enabled, "Sound toggled");
    }

    pub fn sound_enabled(&self) -> bool {
        self.audio.is_enabled()
    }

    fn finish(&mut self) {
        self.elapsed_secs = self.timeline.total_duration_secs();
        self.run_state = RunState::Finished;
        tracing::info!(total = self.elapsed_secs, "Brew finished");
        self.audio.play_cue(CueKind::Completion);
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        self.audio.release();
    }
}
