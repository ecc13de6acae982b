//! Inspect command implementation
//!
//! Prints the header fields, length, peak and PCM hash of a WAV file.

use anyhow::{Context, Result};
use colored::Colorize;
use neonbeats_audio::wav::compute_pcm_hash;
use neonbeats_audio::{decode_wav, AudioError};
use serde::Serialize;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::process::ExitCode;

use super::output::{print_json, report_failure};
use super::EXIT_INPUT_ERROR;

/// Facts about one WAV file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WavInfo {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub sample_format: String,
    pub frames: usize,
    pub duration_seconds: f64,
    pub peak: f32,
    pub file_size: usize,
    pub pcm_hash: String,
}

/// Reads header and content facts from WAV bytes.
pub fn inspect_bytes(bytes: &[u8]) -> Result<WavInfo, AudioError> {
    let reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    let buffer = decode_wav(bytes)?;
    let pcm_hash =
        compute_pcm_hash(bytes).ok_or_else(|| AudioError::decode("missing data chunk"))?;

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        sample_format: match spec.sample_format {
            hound::SampleFormat::Int => "int".to_string(),
            hound::SampleFormat::Float => "float".to_string(),
        },
        frames: buffer.frames(),
        duration_seconds: buffer.duration_seconds(),
        peak: buffer.peak(),
        file_size: bytes.len(),
        pcm_hash,
    })
}

/// Run the inspect command
///
/// # Returns
/// Exit code: 0 on success, 1 if the file is not a readable WAV
pub fn run(input: &Path, json: bool) -> Result<ExitCode> {
    let bytes =
        fs::read(input).with_context(|| format!("Failed to read file: {}", input.display()))?;

    let info = match inspect_bytes(&bytes) {
        Ok(info) => info,
        Err(e) => return report_failure(json, &e, EXIT_INPUT_ERROR),
    };

    if json {
        print_json(&info)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Inspecting:".cyan().bold(), input.display());
    println!("  {}: {}", "Channels".dimmed(), info.channels);
    println!("  {}: {} Hz", "Sample rate".dimmed(), info.sample_rate);
    println!(
        "  {}: {}-bit {}",
        "Format".dimmed(),
        info.bits_per_sample,
        info.sample_format
    );
    println!(
        "  {}: {:.3}s ({} frames)",
        "Duration".dimmed(),
        info.duration_seconds,
        info.frames
    );
    println!("  {}: {:.4}", "Peak".dimmed(), info.peak);
    println!("  {}: {} bytes", "File size".dimmed(), info.file_size);
    println!("  {}: {}", "PCM hash".dimmed(), info.pcm_hash);

    Ok(ExitCode::SUCCESS)
}
