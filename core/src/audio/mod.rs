//! Audio cue subsystem
//!
//! Plays short synthesized tones when the current step changes and when the
//! brew finishes.
//!
//! The output device is acquired lazily: `AudioCues` holds no device until
//! the host reports a user-initiated start, because many platforms refuse
//! audio output before a user gesture. Every failure (no device, lost
//! device, thread spawn) is logged and swallowed here; nothing in this module
//! returns an error to the timer engine.

mod backend;
mod cues;
mod error;
mod events;
mod rodio_backend;
mod synth;

#[cfg(test)]
pub(crate) mod test_support;

pub use backend::{SilentBackend, ToneBackend, ToneOutput};
pub use cues::{AudioCues, CUE_GAIN};
pub use error::AudioError;
pub use events::{CueKind, Tone};
pub use rodio_backend::RodioBackend;
pub use synth::{SAMPLE_RATE, ToneSource};
