//! Playback transport: play/pause/stop/seek bookkeeping over an injected clock.
//!
//! The transport does not render audio. It tracks where playback *would* be and
//! tells observers when the state changes; an output driver reads
//! [`Transport::current_time`], [`Transport::playback_rate`] and
//! [`Transport::volume`] to feed a device.
//!
//! Positions are reported in media time. While playing,
//! `position = (now - start_clock_time) * playback_rate`, so at rate 1.0 this is
//! plain elapsed wall-clock time. Changing the rate mid-play rebases
//! `start_clock_time` so the position stays continuous.
//!
//! Every transport call is total: requests that make no sense in the current
//! state (pausing while stopped, playing without a clip) are silently ignored.

mod clock;
mod events;


use std::fmt;
use std::sync::mpsc;

use tracing::debug;

use crate::error::{AudioError, AudioResult};

pub use clock::{Clock, ManualClock, SystemClock};
pub use events::{ListenerId, Listeners, TransportEvent};

/// Slowest allowed playback rate.
pub const MIN_PLAYBACK_RATE: f64 = 0.25;
/// Fastest allowed playback rate.
pub const MAX_PLAYBACK_RATE: f64 = 4.0;
/// Output gain applied before any `set_volume` call.
pub const DEFAULT_VOLUME: f64 = 0.8;

/// Transport state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackState {
    /// Not playing; position is zero.
    #[default]
    Stopped,
    /// Running against the clock.
    Playing,
    /// Not playing; position retained.
    Paused,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Stopped => write!(f, "stopped"),
            PlaybackState::Playing => write!(f, "playing"),
            PlaybackState::Paused => write!(f, "paused"),
        }
    }
}

/// Single playback session over a loaded clip.
pub struct Transport<C: Clock> {
    clock: C,
    state: PlaybackState,
    duration: Option<f64>,
    pause_offset: f64,
    start_clock_time: f64,
    playback_rate: f64,
    volume: f64,
    listeners: Listeners,
}

impl<C: Clock> Transport<C> {
    /// Creates a stopped transport with no clip loaded.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: PlaybackState::Stopped,
            duration: None,
            pause_offset: 0.0,
            start_clock_time: 0.0,
            playback_rate: 1.0,
            volume: DEFAULT_VOLUME,
            listeners: Listeners::default(),
        }
    }

    /// Makes a clip of the given length playable.
    ///
    /// An active session is stopped first (emitting [`TransportEvent::Stopped`]).
    ///
    /// # Errors
    /// Returns [`AudioError::InvalidDuration`] for negative or non-finite lengths.
    pub fn load(&mut self, duration_seconds: f64) -> AudioResult<()> {
        if !duration_seconds.is_finite() || duration_seconds < 0.0 {
            return Err(AudioError::InvalidDuration {
                duration: duration_seconds,
            });
        }
        if self.state != PlaybackState::Stopped {
            self.stop();
        }
        self.pause_offset = 0.0;
        self.duration = Some(duration_seconds);
        debug!(duration_seconds, "clip loaded");
        Ok(())
    }

    /// Forgets the loaded clip, stopping any active session.
    pub fn unload(&mut self) {
        if self.state != PlaybackState::Stopped {
            self.stop();
        }
        self.pause_offset = 0.0;
        self.duration = None;
    }

    /// Starts or resumes playback.
    ///
    /// Resumes from the paused position wrapped into the clip length. Ignored when
    /// no clip is loaded or playback is already running.
    pub fn play(&mut self) {
        let Some(duration) = self.duration else {
            return;
        };
        if self.state == PlaybackState::Playing {
            return;
        }

        let start_offset = if duration > 0.0 {
            self.pause_offset % duration
        } else {
            0.0
        };
        self.start_clock_time = self.clock.now() - start_offset / self.playback_rate;
        self.state = PlaybackState::Playing;
        debug!(start_offset, "transport playing");
        self.listeners.emit(TransportEvent::Started);
    }

    /// Pauses playback, keeping the position. Ignored unless playing.
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.pause_offset = self.running_position();
        self.state = PlaybackState::Paused;
        debug!(position = self.pause_offset, "transport paused");
        self.listeners.emit(TransportEvent::Paused);
    }

    /// Stops playback and rewinds to zero. Valid from any state.
    pub fn stop(&mut self) {
        self.pause_offset = 0.0;
        self.state = PlaybackState::Stopped;
        debug!("transport stopped");
        self.listeners.emit(TransportEvent::Stopped);
    }

    /// Signals that the output driver reached the end of the clip.
    ///
    /// Ignored unless playing.
    pub fn handle_ended(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.pause_offset = 0.0;
        self.state = PlaybackState::Stopped;
        debug!("transport ended");
        self.listeners.emit(TransportEvent::Ended);
    }

    /// Checks the clock against the clip length and fires the natural end.
    ///
    /// For drivers without their own end-of-buffer signal. Returns true when this
    /// call ended playback.
    pub fn poll(&mut self) -> bool {
        match (self.state, self.duration) {
            (PlaybackState::Playing, Some(duration)) if self.running_position() >= duration => {
                self.handle_ended();
                true
            }
            _ => false,
        }
    }

    /// Moves the position, clamped to the clip. Ignored when no clip is loaded.
    pub fn seek(&mut self, seconds: f64) {
        let Some(duration) = self.duration else {
            return;
        };
        if seconds.is_nan() {
            return;
        }
        let target = seconds.clamp(0.0, duration);
        match self.state {
            PlaybackState::Playing => {
                self.start_clock_time = self.clock.now() - target / self.playback_rate;
            }
            PlaybackState::Paused | PlaybackState::Stopped => {
                self.pause_offset = target;
            }
        }
        debug!(position = target, "transport seek");
    }

    /// Current position in seconds of media time.
    pub fn current_time(&self) -> f64 {
        if self.state == PlaybackState::Playing {
            self.running_position()
        } else {
            self.pause_offset
        }
    }

    /// Sets the playback rate, clamped to `[0.25, 4.0]`. NaN is ignored.
    pub fn set_playback_rate(&mut self, rate: f64) {
        if rate.is_nan() {
            return;
        }
        let rate = rate.clamp(MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE);
        if self.state == PlaybackState::Playing {
            let position = self.running_position();
            self.start_clock_time = self.clock.now() - position / rate;
        }
        self.playback_rate = rate;
    }

    /// Sets the output gain, clamped to `[0.0, 1.0]`. NaN is ignored.
    pub fn set_volume(&mut self, volume: f64) {
        if volume.is_nan() {
            return;
        }
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Registers a callback for transport events.
    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(TransportEvent) + 'static,
    {
        self.listeners.subscribe(callback)
    }

    /// Removes a callback registered with [`Transport::subscribe`].
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Returns a channel receiving all subsequent transport events.
    pub fn events(&mut self) -> mpsc::Receiver<TransportEvent> {
        self.listeners.channel()
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// True while playing.
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Length of the loaded clip, if any.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Position retained while not playing.
    pub fn pause_offset(&self) -> f64 {
        self.pause_offset
    }

    /// Current playback rate multiplier.
    pub fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    /// Current output gain.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// The clock driving this transport.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn running_position(&self) -> f64 {
        (self.clock.now() - self.start_clock_time) * self.playback_rate
    }
}

impl<C: Clock> fmt::Debug for Transport<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("state", &self.state)
            .field("duration", &self.duration)
            .field("pause_offset", &self.pause_offset)
            .field("playback_rate", &self.playback_rate)
            .field("volume", &self.volume)
            .field("listeners", &self.listeners)
            .finish()
    }
}
