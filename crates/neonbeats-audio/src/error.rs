//! Error types for the audio core.

use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while building, decoding or generating audio.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Sample buffer shape is not usable.
    #[error("invalid sample buffer: {message}")]
    InvalidSampleBuffer {
        /// What is wrong with the buffer.
        message: String,
    },

    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid duration.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Genre id not in the catalogue.
    #[error("unknown genre: {0}")]
    UnknownGenre(String),

    /// WAV bytes could not be decoded.
    #[error("failed to decode audio: {message}")]
    Decode {
        /// Underlying cause.
        message: String,
    },

    /// An upstream generator failed.
    #[error("generation failed: {message}")]
    Generation {
        /// Underlying cause.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Creates an invalid sample buffer error.
    pub fn invalid_buffer(message: impl Into<String>) -> Self {
        Self::InvalidSampleBuffer {
            message: message.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a generation error.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Stable error code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            AudioError::InvalidSampleBuffer { .. } => "NB_001",
            AudioError::InvalidSampleRate { .. } => "NB_002",
            AudioError::InvalidDuration { .. } => "NB_003",
            AudioError::InvalidParameter { .. } => "NB_004",
            AudioError::UnknownGenre(_) => "NB_005",
            AudioError::Decode { .. } => "NB_006",
            AudioError::Generation { .. } => "NB_007",
            AudioError::Io(_) => "NB_008",
        }
    }
}

/// hound only ever reads in-memory WAV bytes here, so a short read means the
/// data is truncated, not that a device failed.
impl From<hound::Error> for AudioError {
    fn from(err: hound::Error) -> Self {
        AudioError::decode(format!("truncated or malformed WAV: {}", err))
    }
}
