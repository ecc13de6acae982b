//! Genres command implementation

use anyhow::Result;
use colored::Colorize;
use neonbeats_audio::Genre;
use serde::Serialize;
use std::process::ExitCode;

use super::output::print_json;

#[derive(Debug, Serialize)]
struct GenreOutput {
    id: &'static str,
    name: &'static str,
    icon: &'static str,
}

fn catalogue() -> Vec<GenreOutput> {
    Genre::ALL
        .iter()
        .map(|genre| GenreOutput {
            id: genre.id(),
            name: genre.name(),
            icon: genre.icon(),
        })
        .collect()
}

/// List the genre catalogue
pub fn run(json: bool) -> Result<ExitCode> {
    if json {
        print_json(&catalogue())?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Genres".cyan().bold());
    for genre in catalogue() {
        println!("  {} {:<12} {}", genre.icon, genre.id, genre.name.dimmed());
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_lists_every_genre() {
        let ids: Vec<&str> = catalogue().iter().map(|g| g.id).collect();
        assert_eq!(ids.len(), 8);
        assert_eq!(ids[0], "electronic");
        assert!(ids.contains(&"synthwave"));
    }

    #[test]
    fn test_run() {
        assert_eq!(run(false).unwrap(), ExitCode::SUCCESS);
        assert_eq!(run(true).unwrap(), ExitCode::SUCCESS);
    }
}
