//! Clip generation.
//!
//! A [`Generator`] turns a [`GenerationRequest`] into a [`SampleBuffer`]. The
//! built-in [`MockSynth`] renders locally; [`WavFileGenerator`] stands in for an
//! upstream text-to-audio service by decoding a WAV it produced.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::buffer::{SampleBuffer, MAX_DATA_BYTES};
use crate::error::{AudioError, AudioResult};
use crate::synthesis::{Genre, Mood, Patch};
use crate::wav::decode_wav;

/// Longest clip the generator accepts, in seconds.
pub const MAX_DURATION_SECONDS: u32 = 300;
/// Default clip length.
pub const DEFAULT_DURATION_SECONDS: u32 = 30;
/// Default render sample rate.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
/// Default channel count.
pub const DEFAULT_CHANNELS: u16 = 2;

/// Everything a generator needs to produce one clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationRequest {
    pub genre: Genre,
    #[serde(default)]
    pub mood: Mood,
    /// Clip length in whole seconds.
    pub duration_seconds: u32,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    #[serde(default = "default_channels")]
    pub channels: u16,
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_channels() -> u16 {
    DEFAULT_CHANNELS
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            genre: Genre::default(),
            mood: Mood::default(),
            duration_seconds: DEFAULT_DURATION_SECONDS,
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
        }
    }
}

impl GenerationRequest {
    /// Creates a request with default mood and format.
    pub fn new(genre: Genre, duration_seconds: u32) -> Self {
        Self {
            genre,
            duration_seconds,
            ..Self::default()
        }
    }

    /// Checks ranges of every field.
    pub fn validate(&self) -> AudioResult<()> {
        if self.duration_seconds == 0 || self.duration_seconds > MAX_DURATION_SECONDS {
            return Err(AudioError::InvalidDuration {
                duration: f64::from(self.duration_seconds),
            });
        }
        if self.sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate {
                rate: self.sample_rate,
            });
        }
        if self.channels == 0 {
            return Err(AudioError::invalid_param("channels", "must be at least 1"));
        }
        let data_bytes = u64::from(self.sample_rate)
            .checked_mul(u64::from(self.duration_seconds))
            .and_then(|frames| frames.checked_mul(u64::from(self.channels)))
            .and_then(|samples| samples.checked_mul(2));
        match data_bytes {
            Some(bytes) if bytes <= MAX_DATA_BYTES => {}
            _ => {
                return Err(AudioError::invalid_param(
                    "duration_seconds",
                    format!(
                        "{} s at {} Hz x {} channels exceeds the {} byte WAV limit",
                        self.duration_seconds, self.sample_rate, self.channels, MAX_DATA_BYTES
                    ),
                ))
            }
        }
        self.mood.validate()
    }

    /// Number of frames the clip will contain.
    pub fn frames(&self) -> usize {
        self.sample_rate as usize * self.duration_seconds as usize
    }
}

/// Something that can produce audio for a request.
pub trait Generator {
    /// Produces a clip.
    ///
    /// # Errors
    /// Any failure is reported as a single [`AudioError`] describing the cause;
    /// generators do not retry.
    fn generate(&self, request: &GenerationRequest) -> AudioResult<SampleBuffer>;
}

/// Local two-oscillator synthesizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSynth;

impl MockSynth {
    /// Creates the synthesizer.
    pub fn new() -> Self {
        Self
    }
}

impl Generator for MockSynth {
    fn generate(&self, request: &GenerationRequest) -> AudioResult<SampleBuffer> {
        request.validate()?;
        info!(
            genre = %request.genre,
            duration = request.duration_seconds,
            "rendering mock clip"
        );

        let patch = Patch::new(request.genre, &request.mood);
        let rendered = patch.render(request.frames(), f64::from(request.sample_rate))?;
        let samples: Vec<f32> = rendered.into_iter().map(|s| s as f32).collect();
        SampleBuffer::duplicated(samples, request.channels, request.sample_rate)
    }
}

/// Generator that returns the contents of a WAV file, ignoring the request body.
#[derive(Debug, Clone)]
pub struct WavFileGenerator {
    path: PathBuf,
}

impl WavFileGenerator {
    /// Creates a generator reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The source file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Generator for WavFileGenerator {
    fn generate(&self, _request: &GenerationRequest) -> AudioResult<SampleBuffer> {
        info!(path = %self.path.display(), "loading clip from file");
        let bytes = std::fs::read(&self.path).map_err(|e| {
            AudioError::generation(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        decode_wav(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = GenerationRequest::default();
        assert_eq!(request.genre, Genre::Electronic);
        assert_eq!(request.duration_seconds, 30);
        assert_eq!(request.frames(), 30 * 44100);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_rejects_bad_duration() {
        assert!(GenerationRequest::new(Genre::Rock, 0).validate().is_err());
        assert!(GenerationRequest::new(Genre::Rock, 301).validate().is_err());
        assert!(GenerationRequest::new(Genre::Rock, 300).validate().is_ok());
    }

    #[test]
    fn test_request_rejects_oversized_payload() {
        let many_channels = GenerationRequest {
            channels: u16::MAX,
            ..GenerationRequest::new(Genre::Rock, 300)
        };
        let err = many_channels.validate().unwrap_err();
        assert!(matches!(err, AudioError::InvalidParameter { .. }));

        let huge_rate = GenerationRequest {
            sample_rate: u32::MAX,
            ..GenerationRequest::new(Genre::Rock, 300)
        };
        assert!(huge_rate.validate().is_err());
        assert!(MockSynth::new().generate(&huge_rate).is_err());
    }

    #[test]
    fn test_request_accepts_large_valid_payload() {
        // 300 s of 8 channels at 192 kHz is 921.6 MB
        let request = GenerationRequest {
            sample_rate: 192_000,
            channels: 8,
            ..GenerationRequest::new(Genre::Ambient, 300)
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_json_defaults() {
        let request: GenerationRequest =
            serde_json::from_str(r#"{"genre": "jazz", "duration_seconds": 5}"#).unwrap();
        assert_eq!(request.genre, Genre::Jazz);
        assert_eq!(request.mood, Mood::default());
        assert_eq!(request.sample_rate, 44100);
        assert_eq!(request.channels, 2);
    }

    #[test]
    fn test_mock_synth_shape() {
        let request = GenerationRequest {
            sample_rate: 8000,
            channels: 2,
            ..GenerationRequest::new(Genre::Ambient, 1)
        };
        let buffer = MockSynth::new().generate(&request).unwrap();
        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.frames(), 8000);
        assert_eq!(buffer.sample_rate(), 8000);
        assert_eq!(buffer.channel(0), buffer.channel(1));
    }

    #[test]
    fn test_mock_synth_genres_differ() {
        let render = |genre| {
            let request = GenerationRequest {
                sample_rate: 8000,
                channels: 1,
                ..GenerationRequest::new(genre, 1)
            };
            MockSynth::new().generate(&request).unwrap()
        };
        assert_ne!(render(Genre::Electronic), render(Genre::Ambient));
        assert_eq!(render(Genre::Jazz), render(Genre::Classical));
    }

    #[test]
    fn test_mock_synth_validates() {
        let request = GenerationRequest {
            channels: 0,
            ..GenerationRequest::default()
        };
        assert!(MockSynth::new().generate(&request).is_err());
    }

    #[test]
    fn test_wav_file_generator_missing_file() {
        let generator = WavFileGenerator::new("/nonexistent/neonbeats/clip.wav");
        let err = generator
            .generate(&GenerationRequest::default())
            .unwrap_err();
        assert!(matches!(err, AudioError::Generation { .. }));
        assert!(err.to_string().contains("clip.wav"));
    }
}
