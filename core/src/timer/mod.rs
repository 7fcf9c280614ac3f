//! Timer engine
//!
//! `TimerEngine` is the Idle/Running/Paused/Finished state machine for one
//! brew. It is driven externally: `toggle` and `reset` come from the user,
//! `tick` comes from whatever owns the once-per-second schedule (see
//! `crate::session`). Step transitions and completion fire audio cues.

mod display;
mod engine;
mod state;


pub use display::{
    StepStatus, ToggleLabel, format_digital_time, format_friendly_time, step_progress,
    step_remaining_secs, step_status, toggle_label,
};
pub use engine::TimerEngine;
pub use state::{RunState, TickOutcome, TimerState};
