//! Mood sliders.

use serde::{Deserialize, Serialize};

use crate::error::{AudioError, AudioResult};

/// Upper bound of every mood slider.
pub const MOOD_MAX: u8 = 100;

/// The four mood sliders, each 0 to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Mood {
    /// Loudness; scales the output gain.
    pub energy: u8,
    /// Brightness; detunes the oscillators apart.
    pub happiness: u8,
    /// Movement; above 50 adds vibrato and tremolo.
    pub danceability: u8,
    /// Density; above 60 adds a feedback delay.
    pub complexity: u8,
}

impl Default for Mood {
    fn default() -> Self {
        Self {
            energy: 50,
            happiness: 50,
            danceability: 50,
            complexity: 50,
        }
    }
}

impl Mood {
    /// Checks every slider is within 0-100.
    pub fn validate(&self) -> AudioResult<()> {
        for (name, value) in [
            ("energy", self.energy),
            ("happiness", self.happiness),
            ("danceability", self.danceability),
            ("complexity", self.complexity),
        ] {
            if value > MOOD_MAX {
                return Err(AudioError::invalid_param(
                    name,
                    format!("must be 0-{}, got {}", MOOD_MAX, value),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_centered() {
        let mood = Mood::default();
        assert_eq!(mood.energy, 50);
        assert_eq!(mood.complexity, 50);
        assert!(mood.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mood = Mood {
            danceability: 101,
            ..Mood::default()
        };
        let err = mood.validate().unwrap_err();
        assert!(err.to_string().contains("danceability"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let mood: Mood = serde_json::from_str(r#"{"energy": 90}"#).unwrap();
        assert_eq!(mood.energy, 90);
        assert_eq!(mood.happiness, 50);
    }
}
