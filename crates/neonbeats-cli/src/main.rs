//! Neon Beats CLI - mood-driven clip generation from the command line
//!
//! This binary renders clips, plays them through the simulated transport,
//! inspects WAV files and manages the generation history.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use neonbeats_cli::commands;
use neonbeats_cli::commands::generate::GenerateOptions;
use neonbeats_cli::commands::play::PlayOptions;
use neonbeats_cli::config::NeonConfig;
use neonbeats_cli::logging;

/// Neon Beats - mood-driven music clip generator
#[derive(Parser)]
#[command(name = "neonbeats")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a config file (default: <config_dir>/neonbeats/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a clip and save it as WAV
    Generate {
        /// Genre id (see `neonbeats genres`)
        #[arg(short, long, default_value = "electronic")]
        genre: String,

        /// Energy, 0-100
        #[arg(long)]
        energy: Option<u8>,

        /// Happiness, 0-100
        #[arg(long)]
        happiness: Option<u8>,

        /// Danceability, 0-100
        #[arg(long)]
        danceability: Option<u8>,

        /// Complexity, 0-100
        #[arg(long)]
        complexity: Option<u8>,

        /// Clip length in seconds (1-300)
        #[arg(short, long)]
        duration: Option<u32>,

        /// Sample rate in Hz
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Channel count
        #[arg(long)]
        channels: Option<u16>,

        /// Output directory (default: from config, else current directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// File name prefix (default: neon-beats)
        #[arg(long)]
        prefix: Option<String>,

        /// Use this WAV as the generated clip instead of the built-in synth
        #[arg(long)]
        from_wav: Option<PathBuf>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Play a WAV file through the transport (simulated output)
    Play {
        /// Path to the WAV file
        #[arg(short, long)]
        input: PathBuf,

        /// Playback rate (0.25-4.0)
        #[arg(long, default_value_t = 1.0)]
        rate: f64,

        /// Output volume (0.0-1.0)
        #[arg(long)]
        volume: Option<f64>,

        /// Start position in seconds
        #[arg(long)]
        start: Option<f64>,
    },

    /// Show header fields, length and PCM hash of a WAV file
    Inspect {
        /// Path to the WAV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List available genres
    Genres {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Manage the generation history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// List recent generations, newest first
    List {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
    /// Show one entry
    Show {
        /// Entry id
        id: i64,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
    /// Remove every entry
    Clear,
    /// Regenerate an entry with the built-in synth
    Replay {
        /// Entry id
        id: i64,

        /// Output directory (default: from config, else current directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match NeonConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            return ExitCode::from(commands::EXIT_INPUT_ERROR);
        }
    };

    let result = match cli.command {
        Commands::Generate {
            genre,
            energy,
            happiness,
            danceability,
            complexity,
            duration,
            sample_rate,
            channels,
            out_dir,
            prefix,
            from_wav,
            json,
        } => commands::generate::run(
            &GenerateOptions {
                genre,
                energy,
                happiness,
                danceability,
                complexity,
                duration,
                sample_rate,
                channels,
                out_dir,
                prefix,
                from_wav,
                json,
            },
            &config,
        ),
        Commands::Play {
            input,
            rate,
            volume,
            start,
        } => commands::play::run(&PlayOptions {
            input,
            rate,
            volume,
            start,
        }),
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
        Commands::Genres { json } => commands::genres::run(json),
        Commands::History { command } => match command {
            HistoryCommands::List { json } => commands::history::list(&config, json),
            HistoryCommands::Show { id, json } => commands::history::show(&config, id, json),
            HistoryCommands::Clear => commands::history::clear(&config),
            HistoryCommands::Replay { id, out_dir, json } => {
                commands::history::replay(&config, id, out_dir, json)
            }
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(commands::EXIT_INPUT_ERROR)
        }
    }
}
