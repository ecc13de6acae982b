//! Genre catalogue and oscillator voicing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AudioError;

use super::Waveform;

/// Music genres offered by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    #[default]
    Electronic,
    Ambient,
    Rock,
    HipHop,
    Classical,
    Jazz,
    LoFi,
    Synthwave,
}

/// One oscillator of a genre voicing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    /// Oscillator shape.
    pub waveform: Waveform,
    /// Base frequency in Hz.
    pub frequency: f64,
}

/// Two-oscillator voicing plus output gain for a genre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenreVoice {
    pub osc1: Voice,
    pub osc2: Voice,
    pub gain: f64,
}

impl Genre {
    /// Every genre in display order.
    pub const ALL: [Genre; 8] = [
        Genre::Electronic,
        Genre::Ambient,
        Genre::Rock,
        Genre::HipHop,
        Genre::Classical,
        Genre::Jazz,
        Genre::LoFi,
        Genre::Synthwave,
    ];

    /// Stable identifier, as used on the command line and in history files.
    pub fn id(&self) -> &'static str {
        match self {
            Genre::Electronic => "electronic",
            Genre::Ambient => "ambient",
            Genre::Rock => "rock",
            Genre::HipHop => "hiphop",
            Genre::Classical => "classical",
            Genre::Jazz => "jazz",
            Genre::LoFi => "lofi",
            Genre::Synthwave => "synthwave",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Genre::Electronic => "Electronic",
            Genre::Ambient => "Ambient",
            Genre::Rock => "Rock",
            Genre::HipHop => "Hip Hop",
            Genre::Classical => "Classical",
            Genre::Jazz => "Jazz",
            Genre::LoFi => "Lo-Fi",
            Genre::Synthwave => "Synthwave",
        }
    }

    /// Display icon.
    pub fn icon(&self) -> &'static str {
        match self {
            Genre::Electronic => "🎛️",
            Genre::Ambient => "🌌",
            Genre::Rock => "🎸",
            Genre::HipHop => "🎤",
            Genre::Classical => "🎻",
            Genre::Jazz => "🎷",
            Genre::LoFi => "☕",
            Genre::Synthwave => "🌃",
        }
    }

    /// Oscillator voicing for this genre.
    ///
    /// Genres without a dedicated voicing share a plain sine octave at A3/A4.
    pub fn voice(&self) -> GenreVoice {
        match self {
            Genre::Electronic => GenreVoice {
                osc1: Voice {
                    waveform: Waveform::Sawtooth,
                    frequency: 110.0,
                },
                osc2: Voice {
                    waveform: Waveform::Square,
                    frequency: 220.0,
                },
                gain: 0.3,
            },
            Genre::Ambient => GenreVoice {
                osc1: Voice {
                    waveform: Waveform::Sine,
                    frequency: 55.0,
                },
                osc2: Voice {
                    waveform: Waveform::Sine,
                    frequency: 110.0,
                },
                gain: 0.2,
            },
            // E2 + A2 power fifth
            Genre::Rock => GenreVoice {
                osc1: Voice {
                    waveform: Waveform::Square,
                    frequency: 82.41,
                },
                osc2: Voice {
                    waveform: Waveform::Square,
                    frequency: 110.0,
                },
                gain: 0.4,
            },
            _ => GenreVoice {
                osc1: Voice {
                    waveform: Waveform::Sine,
                    frequency: 220.0,
                },
                osc2: Voice {
                    waveform: Waveform::Sine,
                    frequency: 440.0,
                },
                gain: 0.3,
            },
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Genre {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Genre::ALL
            .iter()
            .copied()
            .find(|genre| genre.id() == wanted)
            .ok_or_else(|| AudioError::UnknownGenre(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for genre in Genre::ALL {
            assert_eq!(genre.id().parse::<Genre>().unwrap(), genre);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("LoFi".parse::<Genre>().unwrap(), Genre::LoFi);
        assert_eq!(" ROCK ".parse::<Genre>().unwrap(), Genre::Rock);
    }

    #[test]
    fn test_unknown_genre() {
        let err = "polka".parse::<Genre>().unwrap_err();
        assert!(matches!(err, AudioError::UnknownGenre(ref g) if g == "polka"));
    }

    #[test]
    fn test_serde_uses_ids() {
        let json = serde_json::to_string(&Genre::HipHop).unwrap();
        assert_eq!(json, "\"hiphop\"");
        let genre: Genre = serde_json::from_str("\"synthwave\"").unwrap();
        assert_eq!(genre, Genre::Synthwave);
    }

    #[test]
    fn test_dedicated_voicings() {
        assert_eq!(Genre::Electronic.voice().osc1.waveform, Waveform::Sawtooth);
        assert_eq!(Genre::Ambient.voice().gain, 0.2);
        assert_eq!(Genre::Rock.voice().osc1.frequency, 82.41);
        assert_eq!(Genre::Jazz.voice(), Genre::Classical.voice());
        assert_eq!(Genre::Jazz.voice().osc2.frequency, 440.0);
    }
}
