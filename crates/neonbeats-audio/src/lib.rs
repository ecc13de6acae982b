//! Neon Beats audio core.
//!
//! # Overview
//!
//! This crate holds the parts of Neon Beats that do real work with audio data:
//!
//! - **WAV encoding** - [`encode`] turns planar float audio into a byte-exact
//!   16-bit PCM RIFF/WAVE file; [`decode_wav`] reads one back.
//! - **Playback transport** - [`Transport`] tracks play/pause/stop/seek against an
//!   injected [`Clock`] and notifies listeners of each transition.
//! - **Mock generation** - [`MockSynth`] renders a clip from a genre and mood.
//! - **Studio** - [`Studio`] owns one transport and the loaded clip, and fences
//!   generation requests so late responses are discarded.
//!
//! # Example
//!
//! ```
//! use neonbeats_audio::{encode, GenerationRequest, Genre, ManualClock, MockSynth, Studio};
//!
//! let mut studio = Studio::new(ManualClock::new());
//! let request = GenerationRequest {
//!     sample_rate: 8000,
//!     ..GenerationRequest::new(Genre::Ambient, 1)
//! };
//! studio.generate(&MockSynth::new(), &request)?;
//!
//! studio.transport_mut().play();
//! let wav = encode(studio.clip().unwrap());
//! assert_eq!(wav.len(), 44 + 8000 * 2 * 2);
//! # Ok::<(), neonbeats_audio::AudioError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`buffer`] - Validated planar sample buffers
//! - [`wav`] - WAV encoder, decoder and PCM helpers
//! - [`transport`] - Playback timing model, clocks and events
//! - [`synthesis`] - Genre voicings, mood mapping and the mock renderer
//! - [`generate`] - Generation requests and generator implementations
//! - [`studio`] - Session owner with request fencing

pub mod buffer;
pub mod error;
pub mod generate;
pub mod studio;
pub mod synthesis;
pub mod transport;
pub mod wav;

// Re-export main types at crate root
pub use buffer::SampleBuffer;
pub use error::{AudioError, AudioResult};
pub use generate::{GenerationRequest, Generator, MockSynth, WavFileGenerator};
pub use studio::{download_file_name, Completion, RequestFence, RequestId, Studio};
pub use synthesis::{Genre, Mood};
pub use transport::{
    Clock, ListenerId, ManualClock, PlaybackState, SystemClock, Transport, TransportEvent,
};
pub use wav::{decode_wav, encode, WavBytes};
