//! Output backend traits
//!
//! `ToneBackend` acquires an output; `ToneOutput` is the acquired handle.
//! Dropping a `ToneOutput` releases the device.

use super::error::AudioError;
use super::events::Tone;

/// Something that can open an audio output on demand
pub trait ToneBackend: Send {
    fn open(&mut self) -> Result<Box<dyn ToneOutput>, AudioError>;
}

/// An acquired audio output
pub trait ToneOutput: Send {
    /// Queue a tone. Returns immediately.
    fn play(&mut self, tone: &Tone) -> Result<(), AudioError>;

    /// True if the output was suspended (by the platform or another owner)
    fn is_suspended(&self) -> bool {
        false
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Backend for hosts that never want sound
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentBackend;

impl ToneBackend for SilentBackend {
    fn open(&mut self) -> Result<Box<dyn ToneOutput>, AudioError> {
        Err(AudioError::Unavailable("silent backend".to_string()))
    }
}
