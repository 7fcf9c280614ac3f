//! Brewing assistant core
//!
//! Validated recipe timelines, the brew timer state machine, audio cues,
//! the async session driver that ticks the timer, and config persistence.

pub mod audio;
pub mod context;
pub mod recipe;
pub mod session;
pub mod timeline;
pub mod timer;

// Re-exports for convenience
pub use audio::{AudioCues, AudioError, CueKind, RodioBackend, SilentBackend, Tone, ToneBackend};
pub use context::{AppConfig, AppConfigExt, ConfigError};
pub use recipe::{BrewPlan, RecipeError, load_recipe_file, parse_recipe};
pub use session::{BrewSession, SessionError, SessionHandle, SessionOptions};
pub use timeline::{RecipeStep, RecipeTimeline, TimelineError};
pub use timer::{
    RunState, StepStatus, TickOutcome, TimerEngine, TimerState, ToggleLabel, format_digital_time,
    format_friendly_time, step_progress, step_remaining_secs, step_status, toggle_label,
};
