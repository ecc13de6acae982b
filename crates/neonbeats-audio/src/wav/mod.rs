//! 16-bit PCM WAV encoding and decoding.
//!
//! [`encode`] turns a [`SampleBuffer`](crate::SampleBuffer) into a complete,
//! self-describing RIFF/WAVE container: a fixed 44-byte header followed by
//! frame-interleaved little-endian 16-bit samples. No timestamps or optional
//! chunks are written, so identical input always yields identical bytes.

mod bytes;
mod decode;
mod format;
mod pcm;
mod writer;


// Re-export public API
pub use bytes::WavBytes;
pub use decode::decode_wav;
pub use format::{WavFormat, HEADER_LEN};
pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use writer::{encode, interleave_to_pcm16, sample_to_pcm16, write_wav, write_wav_to_vec};
