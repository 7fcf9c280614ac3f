//! Cue and tone types

use std::time::Duration;

use brewlog_types::{ToneSettings, Waveform};

/// Which engine event a tone announces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueKind {
    /// The current step changed while running
    StepTransition,
    /// The brew reached its total duration
    Completion,
}

/// A tone ready for synthesis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub waveform: Waveform,
    /// Linear amplitude, 0.0-1.0
    pub gain: f32,
}

impl Tone {
    pub fn new(frequency_hz: f32, duration: Duration, waveform: Waveform) -> Self {
        Self {
            frequency_hz,
            duration,
            waveform,
            gain: 1.0,
        }
    }

    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain.clamp(0.0, 1.0);
        self
    }
}

impl From<&ToneSettings> for Tone {
    fn from(settings: &ToneSettings) -> Self {
        Tone::new(
            settings.frequency_hz,
            Duration::from_millis(settings.duration_ms as u64),
            settings.waveform,
        )
    }
}
