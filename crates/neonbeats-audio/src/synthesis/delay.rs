//! Feedback delay.
//!
//! The dry signal passes through unchanged. A copy enters a delay line whose
//! output is scaled by `feedback`, fed back into the line and mixed onto the
//! output, producing repeats that decay by `feedback` each time.

use crate::error::{AudioError, AudioResult};

/// Applies a feedback delay in place.
///
/// # Arguments
/// * `samples` - Mono audio to process
/// * `time_seconds` - Delay time
/// * `feedback` - Repeat gain, 0.0 to 0.95
/// * `sample_rate` - Audio sample rate in Hz
pub fn apply(
    samples: &mut [f64],
    time_seconds: f64,
    feedback: f64,
    sample_rate: f64,
) -> AudioResult<()> {
    if !(time_seconds > 0.0 && time_seconds <= 2.0) {
        return Err(AudioError::invalid_param(
            "delay.time_seconds",
            format!("must be in (0, 2], got {}", time_seconds),
        ));
    }
    if !(0.0..=0.95).contains(&feedback) {
        return Err(AudioError::invalid_param(
            "delay.feedback",
            format!("must be 0.0-0.95, got {}", feedback),
        ));
    }

    let delay_samples = ((time_seconds * sample_rate).round() as usize).max(1);
    let mut line = vec![0.0; delay_samples];
    let mut pos = 0;

    for sample in samples.iter_mut() {
        let repeat = feedback * line[pos];
        line[pos] = *sample + repeat;
        *sample += repeat;
        pos = (pos + 1) % delay_samples;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_repeats_decay() {
        let mut samples = vec![0.0; 10];
        samples[0] = 1.0;
        apply(&mut samples, 0.3, 0.5, 10.0).unwrap();

        assert_eq!(samples[0], 1.0);
        assert_eq!(samples[3], 0.5);
        assert_eq!(samples[6], 0.25);
        assert_eq!(samples[9], 0.125);
        assert_eq!(samples[1], 0.0);
    }

    #[test]
    fn test_rejects_runaway_feedback() {
        let mut samples = vec![0.0; 4];
        assert!(apply(&mut samples, 0.3, 1.0, 44100.0).is_err());
        assert!(apply(&mut samples, 0.0, 0.5, 44100.0).is_err());
    }
}
