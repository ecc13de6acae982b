//! Decoded multi-channel sample buffers.

use crate::error::{AudioError, AudioResult};

/// Largest PCM payload the 32-bit RIFF size fields can describe.
pub const MAX_DATA_BYTES: u64 = u32::MAX as u64 - 36;

/// Planar floating-point audio, one `Vec<f32>` per channel.
///
/// Every channel holds the same number of frames. The shape and sample rate are
/// fixed at construction; samples are nominally in `[-1.0, 1.0]` but are not
/// clamped here (the encoder clamps).
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Creates a buffer from planar channel data.
    ///
    /// # Errors
    /// Returns [`AudioError::InvalidSampleBuffer`] when there are no channels, too
    /// many channels, mismatched channel lengths or a payload too large for a WAV
    /// container, and [`AudioError::InvalidSampleRate`] for a zero sample rate.
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }
        if channels.is_empty() {
            return Err(AudioError::invalid_buffer("at least one channel is required"));
        }
        if channels.len() > u16::MAX as usize {
            return Err(AudioError::invalid_buffer(format!(
                "{} channels exceeds the WAV limit of {}",
                channels.len(),
                u16::MAX
            )));
        }

        let frames = channels[0].len();
        if let Some((index, channel)) = channels
            .iter()
            .enumerate()
            .find(|(_, channel)| channel.len() != frames)
        {
            return Err(AudioError::invalid_buffer(format!(
                "channel {} has {} samples, expected {}",
                index,
                channel.len(),
                frames
            )));
        }

        let data_bytes = frames as u64 * channels.len() as u64 * 2;
        if data_bytes > MAX_DATA_BYTES {
            return Err(AudioError::invalid_buffer(format!(
                "{} bytes of PCM data does not fit in a WAV file",
                data_bytes
            )));
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Creates a single-channel buffer.
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> AudioResult<Self> {
        Self::new(vec![samples], sample_rate)
    }

    /// Creates a buffer of `channels` identical copies of `samples`.
    pub fn duplicated(samples: Vec<f32>, channels: u16, sample_rate: u32) -> AudioResult<Self> {
        if channels == 0 {
            return Err(AudioError::invalid_buffer("at least one channel is required"));
        }
        let mut planar = Vec::with_capacity(channels as usize);
        for _ in 1..channels {
            planar.push(samples.clone());
        }
        planar.push(samples);
        Self::new(planar, sample_rate)
    }

    /// Creates a buffer from frame-interleaved samples.
    pub fn from_interleaved(samples: &[f32], channels: u16, sample_rate: u32) -> AudioResult<Self> {
        if channels == 0 {
            return Err(AudioError::invalid_buffer("at least one channel is required"));
        }
        let count = channels as usize;
        if samples.len() % count != 0 {
            return Err(AudioError::invalid_buffer(format!(
                "{} interleaved samples is not a whole number of {}-channel frames",
                samples.len(),
                channels
            )));
        }

        let frames = samples.len() / count;
        let mut planar = vec![Vec::with_capacity(frames); count];
        for frame in samples.chunks_exact(count) {
            for (channel, &sample) in planar.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }
        Self::new(planar, sample_rate)
    }

    /// Number of channels.
    pub fn channel_count(&self) -> u16 {
        self.channels.len() as u16
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.channels[0].len()
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples of one channel, if it exists.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// All channels in order.
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// True when the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    /// Largest absolute sample value over all channels.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flat_map(|channel| channel.iter())
            .fold(0.0f32, |peak, sample| peak.max(sample.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_equal_channels() {
        let buffer = SampleBuffer::new(vec![vec![0.0; 4], vec![0.5; 4]], 8000).unwrap();
        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.frames(), 4);
        assert_eq!(buffer.sample_rate(), 8000);
        assert_eq!(buffer.channel(1), Some(&[0.5f32; 4][..]));
        assert_eq!(buffer.channel(2), None);
    }

    #[test]
    fn test_new_rejects_mismatched_channels() {
        let err = SampleBuffer::new(vec![vec![0.0; 4], vec![0.0; 3]], 8000).unwrap_err();
        assert!(matches!(err, AudioError::InvalidSampleBuffer { .. }));
        assert!(err.to_string().contains("channel 1 has 3 samples"));
    }

    #[test]
    fn test_new_rejects_no_channels() {
        assert!(SampleBuffer::new(vec![], 44100).is_err());
    }

    #[test]
    fn test_new_rejects_zero_sample_rate() {
        let err = SampleBuffer::mono(vec![0.0], 0).unwrap_err();
        assert!(matches!(err, AudioError::InvalidSampleRate { rate: 0 }));
    }

    #[test]
    fn test_empty_buffer_is_valid() {
        let buffer = SampleBuffer::new(vec![vec![], vec![]], 44100).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.duration_seconds(), 0.0);
    }

    #[test]
    fn test_duration_seconds() {
        let buffer = SampleBuffer::mono(vec![0.0; 22050], 44100).unwrap();
        assert!((buffer.duration_seconds() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_from_interleaved_splits_frames() {
        let buffer = SampleBuffer::from_interleaved(&[0.1, -0.1, 0.2, -0.2], 2, 8000).unwrap();
        assert_eq!(buffer.channel(0), Some(&[0.1f32, 0.2][..]));
        assert_eq!(buffer.channel(1), Some(&[-0.1f32, -0.2][..]));
    }

    #[test]
    fn test_from_interleaved_rejects_partial_frame() {
        assert!(SampleBuffer::from_interleaved(&[0.0, 0.0, 0.0], 2, 8000).is_err());
    }

    #[test]
    fn test_duplicated_copies_channels() {
        let buffer = SampleBuffer::duplicated(vec![0.25, -0.25], 3, 8000).unwrap();
        assert_eq!(buffer.channel_count(), 3);
        for channel in buffer.channels() {
            assert_eq!(channel, &vec![0.25, -0.25]);
        }
    }

    #[test]
    fn test_peak() {
        let buffer = SampleBuffer::new(vec![vec![0.1, -0.7], vec![0.3, 0.2]], 8000).unwrap();
        assert!((buffer.peak() - 0.7).abs() < 1e-6);
    }
}
