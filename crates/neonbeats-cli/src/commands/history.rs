//! History management commands

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use super::generate::{self, GenerateOptions};
use super::output::{error_codes, print_json, report_error, JsonError};
use super::EXIT_INPUT_ERROR;
use crate::config::NeonConfig;
use crate::history::{History, HistoryEntry};

fn open(config: &NeonConfig) -> Result<History> {
    History::open(config.resolved_history_path()?, config.history_limit)
}

fn not_found(json: bool, id: i64) -> Result<ExitCode> {
    report_error(
        json,
        JsonError {
            code: error_codes::HISTORY_NOT_FOUND.to_string(),
            message: format!("no history entry with id {}", id),
        },
        EXIT_INPUT_ERROR,
    )
}

fn summary_line(entry: &HistoryEntry) -> String {
    let request = &entry.request;
    format!(
        "{} {:<10} {:>3}s  E{} H{} D{} C{}",
        request.genre.icon(),
        request.genre.id(),
        request.duration_seconds,
        request.mood.energy,
        request.mood.happiness,
        request.mood.danceability,
        request.mood.complexity
    )
}

/// List recorded generations, newest first
pub fn list(config: &NeonConfig, json: bool) -> Result<ExitCode> {
    list_entries(&open(config)?, json)
}

/// Lists the entries of an opened history.
pub fn list_entries(history: &History, json: bool) -> Result<ExitCode> {
    if json {
        print_json(&history.entries())?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Generation History".cyan().bold());
    if history.is_empty() {
        println!("  {}", "No generations yet".dimmed());
        return Ok(ExitCode::SUCCESS);
    }
    for entry in history.entries() {
        println!(
            "  {}  {}  {}",
            entry.id.to_string().bold(),
            summary_line(entry),
            entry.timestamp.dimmed()
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Show one history entry
pub fn show(config: &NeonConfig, id: i64, json: bool) -> Result<ExitCode> {
    show_entry(&open(config)?, id, json)
}

/// Shows one entry of an opened history.
pub fn show_entry(history: &History, id: i64, json: bool) -> Result<ExitCode> {
    let Some(entry) = history.get(id) else {
        return not_found(json, id);
    };

    if json {
        print_json(entry)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "History entry".cyan().bold(), entry.id);
    println!("  {}", summary_line(entry));
    println!("  {}: {}", "Recorded".dimmed(), entry.timestamp);
    println!(
        "  {}: {} Hz, {} ch",
        "Format".dimmed(),
        entry.request.sample_rate,
        entry.request.channels
    );
    if let Some(file) = &entry.file {
        println!("  {}: {}", "File".dimmed(), file.display());
    }
    if let Some(hash) = &entry.pcm_hash {
        println!("  {}: {}", "PCM hash".dimmed(), hash);
    }

    Ok(ExitCode::SUCCESS)
}

/// Remove every history entry
pub fn clear(config: &NeonConfig) -> Result<ExitCode> {
    let mut history = open(config)?;

    println!("{}", "Clearing generation history...".cyan().bold());

    let count = history.clear();
    history.save()?;

    if count == 0 {
        println!("  {}", "History is already empty".dimmed());
    } else {
        println!(
            "  {} Removed {} history {}",
            "SUCCESS".green().bold(),
            count,
            if count == 1 { "entry" } else { "entries" }
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Regenerate a history entry with the mock synth
pub fn replay(
    config: &NeonConfig,
    id: i64,
    out_dir: Option<PathBuf>,
    json: bool,
) -> Result<ExitCode> {
    let mut history = open(config)?;
    let date = Local::now().format("%Y-%m-%d").to_string();
    replay_entry(config, &mut history, id, out_dir, json, &date, Utc::now())
}

/// Regenerates `id` from an opened history. The replay is itself recorded.
pub fn replay_entry(
    config: &NeonConfig,
    history: &mut History,
    id: i64,
    out_dir: Option<PathBuf>,
    json: bool,
    date: &str,
    now: DateTime<Utc>,
) -> Result<ExitCode> {
    let Some(entry) = history.get(id) else {
        return not_found(json, id);
    };

    let request = &entry.request;
    let options = GenerateOptions {
        genre: request.genre.id().to_string(),
        energy: Some(request.mood.energy),
        happiness: Some(request.mood.happiness),
        danceability: Some(request.mood.danceability),
        complexity: Some(request.mood.complexity),
        duration: Some(request.duration_seconds),
        sample_rate: Some(request.sample_rate),
        channels: Some(request.channels),
        out_dir,
        prefix: None,
        from_wav: None,
        json,
    };

    generate::run_with_history(&options, config, history, date, now)
}
