//! Mock music synthesis.
//!
//! The demo generator renders two detuned oscillators through a gain stage whose
//! character is picked by genre and shaped by the mood sliders:
//! - `genre` - genre catalogue and per-genre oscillator voicing
//! - `mood` - the four 0-100 mood sliders
//! - `patch` - resolved synth parameters and the renderer
//! - `lfo` - low frequency oscillator for vibrato and tremolo
//! - `delay` - feedback delay used at high complexity

pub mod delay;
pub mod genre;
pub mod lfo;
pub mod mood;
pub mod patch;

use std::f64::consts::TAU;

pub use genre::{Genre, GenreVoice, Voice};
pub use mood::Mood;
pub use patch::Patch;

/// Basic periodic waveforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    /// Sine wave.
    Sine,
    /// 50% duty square wave.
    Square,
    /// Rising sawtooth.
    Sawtooth,
}

impl Waveform {
    /// Evaluates the waveform at a phase in radians, returning `[-1, 1]`.
    pub fn sample(&self, phase: f64) -> f64 {
        let t = (phase / TAU).rem_euclid(1.0);
        match self {
            Waveform::Sine => phase.sin(),
            Waveform::Square => {
                if t < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * t - 1.0,
        }
    }
}

/// Phase accumulator for oscillators with a per-sample frequency.
#[derive(Debug, Clone)]
pub struct PhaseAccumulator {
    phase: f64,
    sample_rate: f64,
}

impl PhaseAccumulator {
    /// Creates an accumulator starting at phase zero.
    pub fn new(sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            sample_rate,
        }
    }

    /// Returns the current phase in radians, then advances by one sample at `freq`.
    pub fn advance(&mut self, freq: f64) -> f64 {
        let current = self.phase;
        self.phase = (self.phase + TAU * freq / self.sample_rate).rem_euclid(TAU);
        current
    }
}

/// Frequency ratio for a detune in cents.
pub fn cents_to_ratio(cents: f64) -> f64 {
    2f64.powf(cents / 1200.0)
}
