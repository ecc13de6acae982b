//! LFO (Low Frequency Oscillator) implementation.

use super::{PhaseAccumulator, Waveform};

/// Sine LFO producing bipolar modulation values.
#[derive(Debug, Clone)]
pub struct Lfo {
    waveform: Waveform,
    rate: f64,
    phase_acc: PhaseAccumulator,
}

impl Lfo {
    /// Creates a sine LFO.
    ///
    /// # Arguments
    /// * `rate` - LFO rate in Hz
    /// * `sample_rate` - Audio sample rate
    pub fn sine(rate: f64, sample_rate: f64) -> Self {
        Self {
            waveform: Waveform::Sine,
            rate,
            phase_acc: PhaseAccumulator::new(sample_rate),
        }
    }

    /// Generates the next LFO sample in `[-1.0, 1.0]`.
    pub fn next_sample(&mut self) -> f64 {
        let phase = self.phase_acc.advance(self.rate);
        self.waveform.sample(phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfo_period() {
        // 1 Hz LFO at 100 Hz: a full cycle every 100 samples
        let mut lfo = Lfo::sine(1.0, 100.0);
        let samples: Vec<f64> = (0..101).map(|_| lfo.next_sample()).collect();
        assert!(samples[0].abs() < 1e-12);
        assert!((samples[25] - 1.0).abs() < 1e-9);
        assert!((samples[75] + 1.0).abs() < 1e-9);
        assert!(samples[100].abs() < 1e-9);
    }
}
