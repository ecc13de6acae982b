//! Resolved synth parameters and the mock renderer.

use crate::error::AudioResult;

use super::genre::{Genre, Voice};
use super::lfo::Lfo;
use super::mood::Mood;
use super::{cents_to_ratio, delay, PhaseAccumulator};

/// Danceability above which vibrato and tremolo are enabled.
const DANCE_THRESHOLD: u8 = 50;
/// Complexity above which the feedback delay is enabled.
const COMPLEXITY_THRESHOLD: u8 = 60;
/// Delay time used at high complexity.
const DELAY_SECONDS: f64 = 0.3;

/// Frequency modulation applied to the first oscillator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vibrato {
    /// LFO rate in Hz.
    pub rate: f64,
    /// Peak deviation in Hz.
    pub depth_hz: f64,
}

/// Amplitude modulation applied to the output gain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tremolo {
    /// LFO rate in Hz.
    pub rate: f64,
    /// Fractional gain swing.
    pub depth: f64,
}

/// Fully resolved parameters for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub osc1: Voice,
    pub osc2: Voice,
    /// Output gain after the energy slider.
    pub gain: f64,
    /// Detune in cents, applied upward to osc1 and downward to osc2.
    pub detune_cents: f64,
    pub vibrato: Option<Vibrato>,
    pub tremolo: Option<Tremolo>,
    /// Feedback amount of the 0.3 s delay, when enabled.
    pub delay_feedback: Option<f64>,
}

impl Patch {
    /// Resolves a genre voicing and mood into render parameters.
    pub fn new(genre: Genre, mood: &Mood) -> Self {
        let voice = genre.voice();

        let energy = f64::from(mood.energy) / 100.0;
        let happiness = f64::from(mood.happiness) / 100.0;
        let dance = f64::from(mood.danceability);

        let (vibrato, tremolo) = if mood.danceability > DANCE_THRESHOLD {
            (
                Some(Vibrato {
                    rate: dance / 20.0,
                    depth_hz: dance * 2.0,
                }),
                Some(Tremolo {
                    rate: dance / 25.0,
                    depth: dance / 200.0,
                }),
            )
        } else {
            (None, None)
        };

        let delay_feedback = (mood.complexity > COMPLEXITY_THRESHOLD)
            .then(|| f64::from(mood.complexity) / 200.0);

        Self {
            osc1: voice.osc1,
            osc2: voice.osc2,
            gain: voice.gain * energy * 1.5,
            detune_cents: (happiness - 0.5) * 100.0,
            vibrato,
            tremolo,
            delay_feedback,
        }
    }

    /// Renders `num_samples` of mono audio.
    ///
    /// Output is not clamped; loud patches can exceed `[-1, 1]` and are clipped by
    /// the WAV encoder.
    pub fn render(&self, num_samples: usize, sample_rate: f64) -> AudioResult<Vec<f64>> {
        let freq1 = self.osc1.frequency * cents_to_ratio(self.detune_cents);
        let freq2 = self.osc2.frequency * cents_to_ratio(-self.detune_cents);

        let mut phase1 = PhaseAccumulator::new(sample_rate);
        let mut phase2 = PhaseAccumulator::new(sample_rate);
        let mut vibrato = self
            .vibrato
            .map(|v| (Lfo::sine(v.rate, sample_rate), v.depth_hz));
        let mut tremolo = self
            .tremolo
            .map(|t| (Lfo::sine(t.rate, sample_rate), t.depth));

        let mut output = Vec::with_capacity(num_samples);
        for _ in 0..num_samples {
            let f1 = match vibrato.as_mut() {
                Some((lfo, depth)) => (freq1 + *depth * lfo.next_sample()).max(0.0),
                None => freq1,
            };
            let gain = match tremolo.as_mut() {
                Some((lfo, depth)) => self.gain * (1.0 + *depth * lfo.next_sample()),
                None => self.gain,
            };

            let s1 = self.osc1.waveform.sample(phase1.advance(f1));
            let s2 = self.osc2.waveform.sample(phase2.advance(freq2));
            output.push((s1 + s2) * gain);
        }

        if let Some(feedback) = self.delay_feedback {
            delay::apply(&mut output, DELAY_SECONDS, feedback, sample_rate)?;
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::Waveform;

    #[test]
    fn test_default_mood_patch() {
        let patch = Patch::new(Genre::Electronic, &Mood::default());
        // 0.3 * 0.5 * 1.5
        assert!((patch.gain - 0.225).abs() < 1e-12);
        assert_eq!(patch.detune_cents, 0.0);
        assert_eq!(patch.vibrato, None);
        assert_eq!(patch.tremolo, None);
        assert_eq!(patch.delay_feedback, None);
        assert_eq!(patch.osc1.waveform, Waveform::Sawtooth);
    }

    #[test]
    fn test_mood_mapping() {
        let mood = Mood {
            energy: 100,
            happiness: 100,
            danceability: 80,
            complexity: 90,
        };
        let patch = Patch::new(Genre::Rock, &mood);
        assert!((patch.gain - 0.6).abs() < 1e-12);
        assert_eq!(patch.detune_cents, 50.0);
        assert_eq!(
            patch.vibrato,
            Some(Vibrato {
                rate: 4.0,
                depth_hz: 160.0
            })
        );
        assert_eq!(
            patch.tremolo,
            Some(Tremolo {
                rate: 3.2,
                depth: 0.4
            })
        );
        assert_eq!(patch.delay_feedback, Some(0.45));
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let mood = Mood {
            danceability: 50,
            complexity: 60,
            ..Mood::default()
        };
        let patch = Patch::new(Genre::Jazz, &mood);
        assert!(patch.vibrato.is_none());
        assert!(patch.delay_feedback.is_none());
    }

    #[test]
    fn test_silent_at_zero_energy() {
        let mood = Mood {
            energy: 0,
            ..Mood::default()
        };
        let samples = Patch::new(Genre::Ambient, &mood).render(512, 8000.0).unwrap();
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_render_length_and_bounds() {
        let patch = Patch::new(Genre::Synthwave, &Mood::default());
        let samples = patch.render(1000, 22050.0).unwrap();
        assert_eq!(samples.len(), 1000);
        // Two unit oscillators times the gain
        let bound = 2.0 * patch.gain + 1e-9;
        assert!(samples.iter().all(|s| s.abs() <= bound));
        assert!(samples.iter().any(|s| s.abs() > 0.01));
    }

    #[test]
    fn test_render_is_deterministic() {
        let mood = Mood {
            danceability: 90,
            complexity: 95,
            ..Mood::default()
        };
        let patch = Patch::new(Genre::Electronic, &mood);
        assert_eq!(
            patch.render(4096, 44100.0).unwrap(),
            patch.render(4096, 44100.0).unwrap()
        );
    }
}
