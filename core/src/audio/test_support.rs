//! Recording backend for tests

use std::sync::{Arc, Mutex};

use brewlog_types::ToneSettings;

use super::backend::{ToneBackend, ToneOutput};
use super::error::AudioError;
use super::events::Tone;

#[derive(Debug, Clone, PartialEq)]
pub enum AudioRecord {
    Opened,
    Played(Tone),
    Resumed,
    Released,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<AudioRecord>,
    fail_open: bool,
    suspended: bool,
    disconnected: bool,
}

/// Backend whose outputs log every call into a shared list
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AudioRecord> {
        self.inner.lock().unwrap().records.clone()
    }

    pub fn played(&self) -> Vec<Tone> {
        self.records()
            .into_iter()
            .filter_map(|r| match r {
                AudioRecord::Played(tone) => Some(tone),
                _ => None,
            })
            .collect()
    }

    pub fn open_count(&self) -> usize {
        self.records()
            .iter()
            .filter(|r| **r == AudioRecord::Opened)
            .count()
    }

    /// Tones matching the default step-transition frequency
    pub fn transition_count(&self) -> usize {
        let frequency = ToneSettings::step_transition().frequency_hz;
        self.played()
            .iter()
            .filter(|t| t.frequency_hz == frequency)
            .count()
    }

    /// Tones matching the default completion frequency
    pub fn completion_count(&self) -> usize {
        let frequency = ToneSettings::completion().frequency_hz;
        self.played()
            .iter()
            .filter(|t| t.frequency_hz == frequency)
            .count()
    }

    pub fn set_fail_open(&self, fail: bool) {
        self.inner.lock().unwrap().fail_open = fail;
    }

    pub fn set_suspended(&self, suspended: bool) {
        self.inner.lock().unwrap().suspended = suspended;
    }

    pub fn set_disconnected(&self, disconnected: bool) {
        self.inner.lock().unwrap().disconnected = disconnected;
    }
}

impl ToneBackend for RecordingBackend {
    fn open(&mut self) -> Result<Box<dyn ToneOutput>, AudioError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_open {
            return Err(AudioError::Device("no device".to_string()));
        }
        inner.records.push(AudioRecord::Opened);
        Ok(Box::new(RecordingOutput {
            inner: self.inner.clone(),
        }))
    }
}

struct RecordingOutput {
    inner: Arc<Mutex<Inner>>,
}

impl ToneOutput for RecordingOutput {
    fn play(&mut self, tone: &Tone) -> Result<(), AudioError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.disconnected {
            return Err(AudioError::Disconnected);
        }
        inner.records.push(AudioRecord::Played(*tone));
        Ok(())
    }

    fn is_suspended(&self) -> bool {
        self.inner.lock().unwrap().suspended
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        let mut inner = self.inner.lock().unwrap();
        inner.suspended = false;
        inner.records.push(AudioRecord::Resumed);
        Ok(())
    }
}

impl Drop for RecordingOutput {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.records.push(AudioRecord::Released);
        }
    }
}
