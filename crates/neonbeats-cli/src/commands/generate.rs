//! Generate command implementation
//!
//! Renders a clip, writes it as `<prefix>-<date>.wav` and records it in the
//! history.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use neonbeats_audio::{
    download_file_name, AudioError, AudioResult, Completion, GenerationRequest, Genre, Mood,
    MockSynth, Studio, SystemClock, WavFileGenerator,
};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use super::output::{print_json, report_failure};
use super::{EXIT_GENERATION_ERROR, EXIT_INPUT_ERROR};
use crate::config::NeonConfig;
use crate::history::History;

/// Flags of the generate command. Unset values fall back to the config.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub genre: String,
    pub energy: Option<u8>,
    pub happiness: Option<u8>,
    pub danceability: Option<u8>,
    pub complexity: Option<u8>,
    pub duration: Option<u32>,
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
    pub out_dir: Option<PathBuf>,
    pub prefix: Option<String>,
    /// Take the clip from this WAV instead of the mock synth.
    pub from_wav: Option<PathBuf>,
    pub json: bool,
}

impl GenerateOptions {
    /// Builds and validates the generation request.
    pub fn to_request(&self, config: &NeonConfig) -> AudioResult<GenerationRequest> {
        let genre: Genre = self.genre.parse()?;
        let centered = Mood::default();
        let request = GenerationRequest {
            genre,
            mood: Mood {
                energy: self.energy.unwrap_or(centered.energy),
                happiness: self.happiness.unwrap_or(centered.happiness),
                danceability: self.danceability.unwrap_or(centered.danceability),
                complexity: self.complexity.unwrap_or(centered.complexity),
            },
            duration_seconds: self.duration.unwrap_or(config.default_duration_seconds),
            sample_rate: self.sample_rate.unwrap_or(config.sample_rate),
            channels: self.channels.unwrap_or(config.channels),
        };
        request.validate()?;
        Ok(request)
    }
}

#[derive(Debug, Serialize)]
struct GenerateOutput {
    success: bool,
    file: PathBuf,
    history_id: i64,
    request: GenerationRequest,
    duration_seconds: f64,
    bytes: usize,
    pcm_hash: String,
}

/// Run the generate command
///
/// # Returns
/// Exit code: 0 on success, 1 for invalid input, 2 if generation failed
pub fn run(options: &GenerateOptions, config: &NeonConfig) -> Result<ExitCode> {
    let mut history = History::open(config.resolved_history_path()?, config.history_limit)?;
    let date = Local::now().format("%Y-%m-%d").to_string();
    run_with_history(options, config, &mut history, &date, Utc::now())
}

/// Runs generation against an explicit history, date and record time.
pub fn run_with_history(
    options: &GenerateOptions,
    config: &NeonConfig,
    history: &mut History,
    date: &str,
    now: DateTime<Utc>,
) -> Result<ExitCode> {
    let request = match options.to_request(config) {
        Ok(request) => request,
        Err(e) => return report_failure(options.json, &e, EXIT_INPUT_ERROR),
    };

    if !options.json {
        println!(
            "{} {} {} ({}s @ {} Hz)",
            "Generating:".cyan().bold(),
            request.genre.icon(),
            request.genre.name(),
            request.duration_seconds,
            request.sample_rate
        );
    }

    let mut studio = Studio::new(SystemClock::new());
    let completion = match &options.from_wav {
        Some(path) => studio.generate(&WavFileGenerator::new(path), &request),
        None => studio.generate(&MockSynth::new(), &request),
    };
    let duration_seconds = match completion {
        Ok(Completion::Loaded { duration_seconds }) => duration_seconds,
        Ok(Completion::Stale) => {
            let err = AudioError::generation("request was superseded");
            return report_failure(options.json, &err, EXIT_GENERATION_ERROR);
        }
        Err(e) => return report_failure(options.json, &e, EXIT_GENERATION_ERROR),
    };

    let wav = studio
        .export_wav()
        .context("Generator finished without a clip")?;

    let out_dir = options.out_dir.as_ref().unwrap_or(&config.output_dir);
    let prefix = options.prefix.as_deref().unwrap_or(&config.file_prefix);
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;
    let path = out_dir.join(download_file_name(prefix, date));
    fs::write(&path, wav.as_bytes())
        .with_context(|| format!("Failed to write clip: {}", path.display()))?;
    debug!(path = %path.display(), bytes = wav.len(), "clip written");

    let pcm_hash = wav.pcm_hash();
    let history_id = history
        .record(request.clone(), Some(path.clone()), Some(pcm_hash.clone()), now)
        .id;
    history.save()?;

    if options.json {
        print_json(&GenerateOutput {
            success: true,
            file: path,
            history_id,
            request,
            duration_seconds,
            bytes: wav.len(),
            pcm_hash,
        })?;
    } else {
        println!(
            "  {} {} ({:.1}s, {} bytes)",
            "SUCCESS".green().bold(),
            path.display(),
            duration_seconds,
            wav.len()
        );
        println!("  {}: {}", "PCM hash".dimmed(), &pcm_hash[..16]);
        println!("  {}: {}", "History id".dimmed(), history_id);
    }

    Ok(ExitCode::SUCCESS)
}
