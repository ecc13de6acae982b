//! CLI command implementations

pub mod generate;
pub mod genres;
pub mod history;
pub mod inspect;
pub mod play;

mod output;

/// Exit code for bad arguments or unreadable input.
pub const EXIT_INPUT_ERROR: u8 = 1;
/// Exit code for a generator failure.
pub const EXIT_GENERATION_ERROR: u8 = 2;
