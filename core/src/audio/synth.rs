//! Tone synthesis as a rodio `Source`

use std::f32::consts::TAU;
use std::time::Duration;

use brewlog_types::Waveform;
use rodio::Source;

use super::events::Tone;

/// Output sample rate for synthesized tones
pub const SAMPLE_RATE: u32 = 44_100;

/// Linear fade at the end of each tone so it does not click
const RELEASE_SECS: f32 = 0.005;

/// A finite mono oscillator
#[derive(Debug, Clone)]
pub struct ToneSource {
    waveform: Waveform,
    frequency_hz: f32,
    gain: f32,
    position: u64,
    total_samples: u64,
    release_samples: u64,
}

impl ToneSource {
    pub fn new(tone: &Tone) -> Self {
        let total_samples = (tone.duration.as_secs_f64() * SAMPLE_RATE as f64).round() as u64;
        let release_samples = ((RELEASE_SECS * SAMPLE_RATE as f32) as u64).min(total_samples);

        Self {
            waveform: tone.waveform,
            frequency_hz: tone.frequency_hz.max(0.0),
            gain: tone.gain.clamp(0.0, 1.0),
            position: 0,
            total_samples,
            release_samples,
        }
    }

    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    fn envelope(&self) -> f32 {
        let remaining = self.total_samples - self.position;
        if self.release_samples == 0 || remaining >= self.release_samples {
            1.0
        } else {
            remaining as f32 / self.release_samples as f32
        }
    }
}

/// One oscillator sample in -1.0..=1.0 for a phase in 0.0..1.0
pub fn oscillator(waveform: Waveform, phase: f32) -> f32 {
    match waveform {
        Waveform::Sine => (TAU * phase).sin(),
        Waveform::Square => {
            if phase < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Triangle => 4.0 * (phase - 0.5).abs() - 1.0,
        Waveform::Sawtooth => 2.0 * phase - 1.0,
    }
}

impl Iterator for ToneSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.position >= self.total_samples {
            return None;
        }

        let cycles = self.position as f64 * self.frequency_hz as f64 / SAMPLE_RATE as f64;
        let phase = cycles.fract() as f32;
        let sample = oscillator(self.waveform, phase) * self.gain * self.envelope();

        self.position += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total_samples - self.position) as usize;
        (remaining, Some(remaining))
    }
}

impl Source for ToneSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some((self.total_samples - self.position) as usize)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f64(
            self.total_samples as f64 / SAMPLE_RATE as f64,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(waveform: Waveform, millis: u64, gain: f32) -> Tone {
        Tone::new(523.25, Duration::from_millis(millis), waveform).with_gain(gain)
    }

    #[test]
    fn test_sample_count_matches_duration() {
        let source = ToneSource::new(&tone(Waveform::Square, 200, 0.05));
        assert_eq!(source.total_samples(), 8_820);
        assert_eq!(source.count(), 8_820);
    }

    #[test]
    fn test_amplitude_bounded_by_gain() {
        let mut source = ToneSource::new(&tone(Waveform::Sine, 100, 0.05));
        assert!(source.all(|s| s.abs() <= 0.05 + f32::EPSILON));
    }

    #[test]
    fn test_square_wave_is_full_scale_before_release() {
        let samples: Vec<f32> = ToneSource::new(&tone(Waveform::Square, 100, 0.5)).collect();
        let body = &samples[..samples.len() - 300];
        assert!(body.iter().all(|s| (s.abs() - 0.5).abs() < 1e-6));
    }

    #[test]
    fn test_tail_fades_to_silence() {
        let samples: Vec<f32> = ToneSource::new(&tone(Waveform::Square, 100, 1.0)).collect();
        let last = *samples.last().unwrap();
        assert!(last.abs() < 0.01);
    }

    #[test]
    fn test_oscillator_shapes() {
        assert!((oscillator(Waveform::Sine, 0.25) - 1.0).abs() < 1e-6);
        assert_eq!(oscillator(Waveform::Square, 0.75), -1.0);
        assert_eq!(oscillator(Waveform::Triangle, 0.5), -1.0);
        assert_eq!(oscillator(Waveform::Triangle, 0.0), 1.0);
        assert_eq!(oscillator(Waveform::Sawtooth, 0.0), -1.0);
    }

    #[test]
    fn test_source_metadata() {
        let source = ToneSource::new(&tone(Waveform::Sine, 800, 0.05));
        assert_eq!(source.channels(), 1);
        assert_eq!(source.sample_rate(), SAMPLE_RATE);
        let duration = source.total_duration().unwrap();
        assert!((duration.as_secs_f64() - 0.8).abs() < 1e-6);
    }
}
