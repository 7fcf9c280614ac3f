//! Run state and the published timer snapshot

/// Lifecycle of one brew
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Paused,
    /// Terminal until `reset`
    Finished,
}

impl RunState {
    pub fn label(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Finished => "finished",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Read-only view of the engine, published after every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerState {
    pub run_state: RunState,
    /// Always `0..=total_secs`
    pub elapsed_secs: u32,
    /// `None` only for an empty timeline
    pub current_step: Option<usize>,
    pub total_secs: u32,
    pub sound_enabled: bool,
}

impl TimerState {
    pub fn remaining_secs(&self) -> u32 {
        self.total_secs.saturating_sub(self.elapsed_secs)
    }

    pub fn is_finished(&self) -> bool {
        self.run_state == RunState::Finished
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed
    Ignored,
    /// One second passed inside the same step
    Advanced,
    StepChanged { from: Option<usize>, to: Option<usize> },
    /// Elapsed reached the total duration
    Finished,
}
