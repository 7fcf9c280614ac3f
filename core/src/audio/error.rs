//! Error types for audio output

use thiserror::Error;

/// Audio output failures. Never leaves the audio module: `AudioCues` logs
/// and drops them.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),

    #[error("failed to open audio device: {0}")]
    Device(String),

    #[error("audio output disconnected")]
    Disconnected,

    #[error("failed to start audio thread")]
    ThreadSpawn(#[source] std::io::Error),
}
