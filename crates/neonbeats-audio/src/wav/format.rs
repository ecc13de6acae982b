//! WAV file format parameters.

use crate::buffer::SampleBuffer;

/// Size of the canonical RIFF + fmt + data chunk headers.
pub const HEADER_LEN: usize = 44;

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of interleaved channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (always 16 for this implementation).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Creates a 16-bit format with the given channel count.
    pub fn new(channels: u16, sample_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Format matching the shape of a sample buffer.
    pub fn for_buffer(buffer: &SampleBuffer) -> Self {
        Self::new(buffer.channel_count(), buffer.sample_rate())
    }

    /// Calculates bytes per sample (per channel).
    pub(crate) fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Calculates block align (bytes per sample frame).
    pub fn block_align(&self) -> u16 {
        self.channels.wrapping_mul(self.bytes_per_sample())
    }

    /// Calculates byte rate (bytes per second).
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate
            .wrapping_mul(self.channels as u32)
            .wrapping_mul(self.bytes_per_sample() as u32)
    }
}
