//! Encoded WAV output.

use super::pcm::{compute_pcm_hash, extract_pcm_data};

/// A complete RIFF/WAVE file produced by [`encode`](super::encode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavBytes(Vec<u8>);

impl WavBytes {
    pub(crate) fn from_vec(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// The file contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Takes ownership of the file contents.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Total file size in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; even an empty clip carries a 44-byte header.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The interleaved PCM payload of the `data` chunk.
    pub fn pcm_data(&self) -> &[u8] {
        extract_pcm_data(&self.0).unwrap_or_default()
    }

    /// BLAKE3 hash of the PCM payload, as lowercase hex.
    pub fn pcm_hash(&self) -> String {
        compute_pcm_hash(&self.0).unwrap_or_else(|| blake3::hash(&[]).to_hex().to_string())
    }
}

impl AsRef<[u8]> for WavBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<WavBytes> for Vec<u8> {
    fn from(bytes: WavBytes) -> Self {
        bytes.0
    }
}
