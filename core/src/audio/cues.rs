//! Cue controller owned by the timer engine

use brewlog_types::AudioSettings;

use super::backend::{SilentBackend, ToneBackend, ToneOutput};
use super::error::AudioError;
use super::events::{CueKind, Tone};

/// Fixed amplitude of every cue before the volume setting is applied
pub const CUE_GAIN: f32 = 0.05;

/// Lazily-acquired tone output plus the cue settings.
///
/// All methods are infallible: backend errors are logged and dropped.
pub struct AudioCues {
    backend: Box<dyn ToneBackend>,
    output: Option<Box<dyn ToneOutput>>,
    enabled: bool,
    volume: f32,
    transition_tone: Tone,
    completion_tone: Tone,
}

impl AudioCues {
    pub fn new(backend: Box<dyn ToneBackend>, settings: &AudioSettings) -> Self {
        Self {
            backend,
            output: None,
            enabled: settings.enabled,
            volume: settings.volume.min(100) as f32 / 100.0,
            transition_tone: Tone::from(&settings.transition_tone),
            completion_tone: Tone::from(&settings.completion_tone),
        }
    }

    /// Cues that never make a sound
    pub fn silent() -> Self {
        Self::new(Box::new(SilentBackend), &AudioSettings::default())
    }

    /// Open the output if it is not open yet, and wake it if suspended.
    ///
    /// Call only in response to a user-initiated start. A failed open is
    /// retried on the next call.
    pub fn acquire(&mut self) {
        if self.output.is_none() {
            match self.backend.open() {
                Ok(output) => {
                    tracing::debug!("Audio output acquired");
                    self.output = Some(output);
                }
                Err(AudioError::Unavailable(reason)) => {
                    tracing::debug!(reason, "Audio output unavailable");
                    return;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to acquire audio output");
                    return;
                }
            }
        }
        self.resume_if_suspended();
    }

    pub fn is_acquired(&self) -> bool {
        self.output.is_some()
    }

    /// Toggle emission. Does not touch the output.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn play_cue(&mut self, kind: CueKind) {
        let tone = match kind {
            CueKind::StepTransition => self.transition_tone,
            CueKind::Completion => self.completion_tone,
        };
        tracing::debug!(?kind, "Audio cue");
        self.play_tone(tone);
    }

    /// Fire-and-forget. Skipped when disabled or no output is acquired.
    pub fn play_tone(&mut self, tone: Tone) {
        if !self.enabled {
            return;
        }
        self.resume_if_suspended();

        let Some(output) = self.output.as_mut() else {
            return;
        };

        let tone = tone.with_gain(CUE_GAIN * self.volume);
        match output.play(&tone) {
            Ok(()) => {}
            Err(AudioError::Disconnected) => {
                tracing::warn!("Audio output lost, will reacquire on next start");
                self.output = None;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to play tone"),
        }
    }

    /// Drop the output. The next `acquire` opens a new one.
    pub fn release(&mut self) {
        if self.output.take().is_some() {
            tracing::debug!("Audio output released");
        }
    }

    fn resume_if_suspended(&mut self) {
        let Some(output) = self.output.as_mut() else {
            return;
        };
        if !output.is_suspended() {
            return;
        }
        match output.resume() {
            Ok(()) => tracing::debug!("Audio output resumed"),
            Err(AudioError::Disconnected) => {
                tracing::warn!("Audio output lost while resuming");
                self.output = None;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to resume audio output"),
        }
    }
}

impl std::fmt::Debug for AudioCues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioCues")
            .field("acquired", &self.output.is_some())
            .field("enabled", &self.enabled)
            .field("volume", &self.volume)
            .finish()
    }
}
