//! WAV decoding into planar sample buffers.

use std::io::Cursor;

use hound::{SampleFormat, WavReader};

use crate::buffer::SampleBuffer;
use crate::error::{AudioError, AudioResult};

/// Decodes WAV bytes into a [`SampleBuffer`].
///
/// Integer PCM of 8 to 32 bits is normalised to `[-1, 1)` by dividing by
/// `2^(bits - 1)`; 32-bit float PCM is passed through unchanged.
///
/// # Errors
/// Returns [`AudioError::Decode`] for malformed or unsupported files.
pub fn decode_wav(bytes: &[u8]) -> AudioResult<SampleBuffer> {
    let reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    if spec.channels == 0 {
        return Err(AudioError::decode("file declares zero channels"));
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => {
            if spec.bits_per_sample != 32 {
                return Err(AudioError::decode(format!(
                    "unsupported float bit depth: {}",
                    spec.bits_per_sample
                )));
            }
            reader
                .into_samples::<f32>()
                .collect::<Result<Vec<_>, _>>()?
        }
        SampleFormat::Int => {
            if !(8..=32).contains(&spec.bits_per_sample) {
                return Err(AudioError::decode(format!(
                    "unsupported integer bit depth: {}",
                    spec.bits_per_sample
                )));
            }
            let scale = (1u64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|sample| sample.map(|value| (value as f64 / scale) as f32))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    SampleBuffer::from_interleaved(&interleaved, spec.channels, spec.sample_rate)
        .map_err(|err| AudioError::decode(err.to_string()))
}
