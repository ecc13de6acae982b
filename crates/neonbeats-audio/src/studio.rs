//! Studio session: one transport, one loaded clip, fenced generation requests.
//!
//! Generation is request/response and may complete out of order. Each request
//! takes a [`RequestId`] from the studio's fence; only a completion carrying the
//! newest id is applied, so a slow response to an older request can never replace
//! the clip loaded by a newer one.

use std::fmt;

use tracing::{info, warn};

use crate::buffer::SampleBuffer;
use crate::error::AudioResult;
use crate::generate::{GenerationRequest, Generator};
use crate::transport::{Clock, Transport};
use crate::wav::{encode, WavBytes};

/// Identifier of one generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// Numeric value, increasing with each request.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues request ids and tracks which one is current.
#[derive(Debug, Default)]
pub struct RequestFence {
    latest: u64,
}

impl RequestFence {
    /// Issues a new id, superseding every earlier one.
    pub fn begin(&mut self) -> RequestId {
        self.latest += 1;
        RequestId(self.latest)
    }

    /// True if `id` is the most recently issued id.
    pub fn is_current(&self, id: RequestId) -> bool {
        self.latest != 0 && id.0 == self.latest
    }

    /// The most recently issued id, if any.
    pub fn latest(&self) -> Option<RequestId> {
        (self.latest != 0).then_some(RequestId(self.latest))
    }
}

/// Outcome of handing a generation result to the studio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Completion {
    /// The clip was loaded and the transport reset.
    Loaded {
        /// Length of the new clip.
        duration_seconds: f64,
    },
    /// A newer request exists; the result was discarded.
    Stale,
}

/// Owner of the playback transport and the currently loaded clip.
pub struct Studio<C: Clock> {
    transport: Transport<C>,
    clip: Option<SampleBuffer>,
    fence: RequestFence,
}

impl<C: Clock> Studio<C> {
    /// Creates an empty studio driven by `clock`.
    pub fn new(clock: C) -> Self {
        Self {
            transport: Transport::new(clock),
            clip: None,
            fence: RequestFence::default(),
        }
    }

    /// Starts a generation request. Any earlier outstanding request becomes stale.
    pub fn begin_request(&mut self) -> RequestId {
        let id = self.fence.begin();
        info!(request = %id, "generation requested");
        id
    }

    /// Applies the result of request `id`.
    ///
    /// Stale results are dropped whether they succeeded or failed. A current
    /// success stops playback and loads the clip.
    ///
    /// # Errors
    /// Returns the generator's error when `id` is current and generation failed.
    pub fn complete(
        &mut self,
        id: RequestId,
        result: AudioResult<SampleBuffer>,
    ) -> AudioResult<Completion> {
        if !self.fence.is_current(id) {
            warn!(request = %id, latest = ?self.fence.latest(), "dropping stale generation result");
            return Ok(Completion::Stale);
        }

        let buffer = result?;
        self.load(buffer)?;
        Ok(Completion::Loaded {
            duration_seconds: self.transport.duration().unwrap_or_default(),
        })
    }

    /// Runs a generator synchronously and applies its result.
    pub fn generate<G: Generator + ?Sized>(
        &mut self,
        generator: &G,
        request: &GenerationRequest,
    ) -> AudioResult<Completion> {
        let id = self.begin_request();
        let result = generator.generate(request);
        self.complete(id, result)
    }

    /// Loads a clip directly, bypassing the request fence.
    pub fn load(&mut self, buffer: SampleBuffer) -> AudioResult<()> {
        self.transport.load(buffer.duration_seconds())?;
        info!(
            channels = buffer.channel_count(),
            sample_rate = buffer.sample_rate(),
            frames = buffer.frames(),
            "clip loaded into studio"
        );
        self.clip = Some(buffer);
        Ok(())
    }

    /// The loaded clip.
    pub fn clip(&self) -> Option<&SampleBuffer> {
        self.clip.as_ref()
    }

    /// Encodes the loaded clip as WAV. None when nothing is loaded.
    pub fn export_wav(&self) -> Option<WavBytes> {
        self.clip.as_ref().map(encode)
    }

    /// The playback transport.
    pub fn transport(&self) -> &Transport<C> {
        &self.transport
    }

    /// Mutable access to the playback transport.
    pub fn transport_mut(&mut self) -> &mut Transport<C> {
        &mut self.transport
    }
}

impl<C: Clock> fmt::Debug for Studio<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Studio")
            .field("transport", &self.transport)
            .field("clip_frames", &self.clip.as_ref().map(SampleBuffer::frames))
            .field("fence", &self.fence)
            .finish()
    }
}

/// Download name for an exported clip: `<prefix>-<date>.wav`.
///
/// `date` is normally an ISO `YYYY-MM-DD` string.
pub fn download_file_name(prefix: &str, date: impl fmt::Display) -> String {
    format!("{}-{}.wav", prefix, date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AudioError;
    use crate::transport::{ManualClock, PlaybackState, TransportEvent};

    fn clip(seconds: usize) -> SampleBuffer {
        SampleBuffer::mono(vec![0.1; seconds * 100], 100).unwrap()
    }

    #[test]
    fn test_fence_only_latest_is_current() {
        let mut fence = RequestFence::default();
        assert_eq!(fence.latest(), None);
        let first = fence.begin();
        assert!(fence.is_current(first));
        let second = fence.begin();
        assert!(!fence.is_current(first));
        assert!(fence.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn test_complete_loads_clip() {
        let mut studio = Studio::new(ManualClock::new());
        let id = studio.begin_request();
        let completion = studio.complete(id, Ok(clip(3))).unwrap();

        assert_eq!(
            completion,
            Completion::Loaded {
                duration_seconds: 3.0
            }
        );
        assert_eq!(studio.transport().duration(), Some(3.0));
        assert_eq!(studio.clip().map(SampleBuffer::frames), Some(300));
    }

    #[test]
    fn test_late_response_does_not_overwrite_newer() {
        let mut studio = Studio::new(ManualClock::new());
        let older = studio.begin_request();
        let newer = studio.begin_request();

        studio.complete(newer, Ok(clip(2))).unwrap();
        let late = studio.complete(older, Ok(clip(9))).unwrap();

        assert_eq!(late, Completion::Stale);
        assert_eq!(studio.transport().duration(), Some(2.0));
    }

    #[test]
    fn test_stale_failure_is_dropped() {
        let mut studio = Studio::new(ManualClock::new());
        let older = studio.begin_request();
        let _newer = studio.begin_request();
        let outcome = studio.complete(older, Err(AudioError::generation("timeout")));
        assert_eq!(outcome.unwrap(), Completion::Stale);
    }

    #[test]
    fn test_current_failure_propagates_and_keeps_clip() {
        let mut studio = Studio::new(ManualClock::new());
        studio.load(clip(4)).unwrap();
        let id = studio.begin_request();
        let err = studio
            .complete(id, Err(AudioError::generation("upstream 503")))
            .unwrap_err();
        assert!(err.to_string().contains("upstream 503"));
        assert_eq!(studio.transport().duration(), Some(4.0));
    }

    #[test]
    fn test_new_clip_stops_playback() {
        let clock = ManualClock::new();
        let mut studio = Studio::new(clock.clone());
        studio.load(clip(5)).unwrap();
        let rx = studio.transport_mut().events();
        studio.transport_mut().play();
        clock.advance(1.0);

        let id = studio.begin_request();
        studio.complete(id, Ok(clip(6))).unwrap();

        assert_eq!(studio.transport().state(), PlaybackState::Stopped);
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events, vec![TransportEvent::Started, TransportEvent::Stopped]);
    }

    #[test]
    fn test_export_wav() {
        let mut studio = Studio::new(ManualClock::new());
        assert!(studio.export_wav().is_none());
        studio.load(clip(1)).unwrap();
        let wav = studio.export_wav().unwrap();
        assert_eq!(wav.len(), 44 + 100 * 2);
    }

    #[test]
    fn test_download_file_name() {
        assert_eq!(
            download_file_name("neon-beats", "2024-03-09"),
            "neon-beats-2024-03-09.wav"
        );
    }
}
