//! Core WAV writing and PCM conversion functions.

use std::io::{self, Write};

use crate::buffer::SampleBuffer;

use super::bytes::WavBytes;
use super::format::{WavFormat, HEADER_LEN};

/// Encodes a sample buffer as a 16-bit PCM WAV file.
///
/// The output is exactly `44 + frames * channels * 2` bytes. Samples are written
/// frame by frame, channel by channel within each frame.
pub fn encode(buffer: &SampleBuffer) -> WavBytes {
    debug_assert!(buffer.channel_count() >= 1);
    debug_assert!(buffer
        .channels()
        .iter()
        .all(|channel| channel.len() == buffer.frames()));

    let format = WavFormat::for_buffer(buffer);
    let pcm = interleave_to_pcm16(buffer);
    WavBytes::from_vec(write_wav_to_vec(&format, &pcm))
}

/// Writes a complete WAV file to a writer.
///
/// # Arguments
/// * `writer` - Output writer
/// * `format` - WAV format parameters
/// * `pcm_data` - Raw PCM samples as bytes
///
/// # Returns
/// Result indicating success or I/O error
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = pcm_data.len() as u32;
    let file_size = 36 + data_size; // Total file size minus 8 bytes for RIFF header

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // Chunk size (16 for PCM)
    writer.write_all(&1u16.to_le_bytes())?; // Audio format (1 = PCM)
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Writes a WAV file to a byte vector.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(HEADER_LEN + pcm_data.len());
    write_wav(&mut buffer, format, pcm_data).expect("writing to Vec should not fail");
    buffer
}

/// Converts one float sample to a signed 16-bit value.
///
/// The sample is clamped to `[-1, 1]`, then negative values are scaled by 32768
/// and non-negative values by 32767, truncating toward zero. This maps -1.0 to
/// `i16::MIN` and 1.0 to `i16::MAX`. NaN maps to 0.
pub fn sample_to_pcm16(sample: f32) -> i16 {
    let clipped = f64::from(sample).clamp(-1.0, 1.0);
    if clipped < 0.0 {
        (clipped * 32768.0) as i16
    } else {
        (clipped * 32767.0) as i16
    }
}

/// Interleaves a buffer into little-endian 16-bit PCM bytes.
pub fn interleave_to_pcm16(buffer: &SampleBuffer) -> Vec<u8> {
    let channels = buffer.channels();
    let mut pcm = Vec::with_capacity(buffer.frames() * channels.len() * 2);

    for frame in 0..buffer.frames() {
        for channel in channels {
            pcm.extend_from_slice(&sample_to_pcm16(channel[frame]).to_le_bytes());
        }
    }

    pcm
}
