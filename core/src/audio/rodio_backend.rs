//! rodio output backend
//!
//! rodio's `OutputStream` is not `Send`, so the stream and its sink live on a
//! dedicated thread. `RodioOutput` is the `Send` handle the engine holds; it
//! forwards tones over a channel.
//!
//! The device is opened on that thread, so `open` returns as soon as the
//! thread is spawned and never blocks the caller (the brew session runs on an
//! async worker). Tones sent while the device is still opening are queued. If
//! opening fails the thread exits and drops its receiver; the next `play`
//! then reports `Disconnected` and the cue layer reacquires on the next start.
//!
//! A rodio sink is never suspended behind our back (only `Sink::pause` does
//! that, and nothing calls it), so this output keeps the default
//! `is_suspended`/`resume` of `ToneOutput`.

use std::sync::mpsc;

use rodio::{OutputStream, Sink};

use super::backend::{ToneBackend, ToneOutput};
use super::error::AudioError;
use super::events::Tone;
use super::synth::ToneSource;

/// Opens the default system output device
#[derive(Debug, Default, Clone, Copy)]
pub struct RodioBackend;

impl ToneBackend for RodioBackend {
    fn open(&mut self) -> Result<Box<dyn ToneOutput>, AudioError> {
        Ok(Box::new(RodioOutput::spawn(run_output)?))
    }
}

enum AudioCommand {
    Play(Tone),
    Shutdown,
}

struct RodioOutput {
    tx: mpsc::Sender<AudioCommand>,
}

impl RodioOutput {
    /// Start `worker` on the audio thread and return without waiting for it.
    fn spawn<F>(worker: F) -> Result<Self, AudioError>
    where
        F: FnOnce(mpsc::Receiver<AudioCommand>) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        std::thread::Builder::new()
            .name("brewlog-audio".to_string())
            .spawn(move || worker(rx))
            .map_err(AudioError::ThreadSpawn)?;
        Ok(Self { tx })
    }
}

fn run_output(rx: mpsc::Receiver<AudioCommand>) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to open audio output");
            return;
        }
    };
    let sink = match Sink::try_new(&handle) {
        Ok(sink) => sink,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to create audio sink");
            return;
        }
    };
    tracing::debug!("Audio output opened");

    while let Ok(command) = rx.recv() {
        match command {
            AudioCommand::Play(tone) => sink.append(ToneSource::new(&tone)),
            AudioCommand::Shutdown => break,
        }
    }

    sink.stop();
    tracing::debug!("Audio output closed");
}

impl ToneOutput for RodioOutput {
    fn play(&mut self, tone: &Tone) -> Result<(), AudioError> {
        self.tx
            .send(AudioCommand::Play(*tone))
            .map_err(|_| AudioError::Disconnected)
    }
}

impl Drop for RodioOutput {
    fn drop(&mut self) {
        // The thread exits on its own; joining here would block the caller.
        let _ = self.tx.send(AudioCommand::Shutdown);
    }
}
