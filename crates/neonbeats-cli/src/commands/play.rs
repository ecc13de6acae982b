//! Play command implementation
//!
//! Loads a WAV into a studio and drives its transport in real time, printing
//! events and the playhead. Nothing is sent to an audio device; the loop stands
//! in for an output driver by polling the transport for the natural end.

use anyhow::{Context, Result};
use colored::Colorize;
use neonbeats_audio::{decode_wav, Clock, SampleBuffer, Studio, SystemClock, TransportEvent};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use super::output::report_failure;
use super::EXIT_INPUT_ERROR;

/// Interval between playhead updates.
pub const TICK: Duration = Duration::from_millis(250);

/// Flags of the play command.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub input: PathBuf,
    pub rate: f64,
    pub volume: Option<f64>,
    pub start: Option<f64>,
}

/// What happened during a session.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaySummary {
    pub events: Vec<TransportEvent>,
    pub ticks: usize,
    pub duration_seconds: f64,
}

/// Run the play command
pub fn run(options: &PlayOptions) -> Result<ExitCode> {
    let bytes = fs::read(&options.input)
        .with_context(|| format!("Failed to read clip: {}", options.input.display()))?;
    let buffer = match decode_wav(&bytes) {
        Ok(buffer) => buffer,
        Err(e) => return report_failure(false, &e, EXIT_INPUT_ERROR),
    };

    println!(
        "{} {}",
        "Playing:".cyan().bold(),
        options.input.display()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_session(
        SystemClock::new(),
        buffer,
        options,
        std::thread::sleep,
        &mut out,
    )?;

    Ok(ExitCode::SUCCESS)
}

/// Plays `buffer` to its end against `clock`, calling `sleep` between ticks.
pub fn run_session<C, S, W>(
    clock: C,
    buffer: SampleBuffer,
    options: &PlayOptions,
    mut sleep: S,
    out: &mut W,
) -> Result<PlaySummary>
where
    C: Clock,
    S: FnMut(Duration),
    W: Write,
{
    let mut studio = Studio::new(clock);
    studio.load(buffer)?;

    let transport = studio.transport_mut();
    let events = transport.events();
    transport.set_playback_rate(options.rate);
    if let Some(volume) = options.volume {
        transport.set_volume(volume);
    }
    if let Some(start) = options.start {
        transport.seek(start);
    }

    let duration = transport.duration().unwrap_or_default();
    writeln!(
        out,
        "  {}: {:.2}s  {}: {}x  {}: {:.0}%",
        "Length".dimmed(),
        duration,
        "Rate".dimmed(),
        transport.playback_rate(),
        "Volume".dimmed(),
        transport.volume() * 100.0
    )?;

    transport.play();

    let mut seen = Vec::new();
    let mut ticks = 0;
    loop {
        let ended = transport.poll();
        for event in events.try_iter() {
            writeln!(out, "  {} {}", "event".magenta(), event)?;
            seen.push(event);
        }
        if ended || !transport.is_playing() {
            break;
        }

        writeln!(
            out,
            "  {:>8.2}s / {:.2}s",
            transport.current_time(),
            duration
        )?;
        sleep(TICK);
        ticks += 1;
    }

    writeln!(out, "  {}", "Done".green().bold())?;

    Ok(PlaySummary {
        events: seen,
        ticks,
        duration_seconds: duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use neonbeats_audio::ManualClock;
    use pretty_assertions::assert_eq;

    fn clip(seconds: usize) -> SampleBuffer {
        SampleBuffer::mono(vec![0.25; seconds * 100], 100).unwrap()
    }

    fn options() -> PlayOptions {
        PlayOptions {
            input: PathBuf::from("clip.wav"),
            rate: 1.0,
            volume: None,
            start: None,
        }
    }

    fn play(buffer: SampleBuffer, options: &PlayOptions) -> (PlaySummary, String) {
        let clock = ManualClock::new();
        let driver = clock.clone();
        let mut out = Vec::new();
        let summary = run_session(
            clock,
            buffer,
            options,
            move |d: Duration| driver.advance(d.as_secs_f64()),
            &mut out,
        )
        .unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_plays_to_the_end() {
        let (summary, output) = play(clip(2), &options());
        assert_eq!(
            summary.events,
            vec![TransportEvent::Started, TransportEvent::Ended]
        );
        assert_eq!(summary.ticks, 8);
        assert_eq!(summary.duration_seconds, 2.0);
        assert!(output.contains("started"));
        assert!(output.contains("ended"));
    }

    #[test]
    fn test_double_rate_halves_ticks() {
        let (summary, _) = play(
            clip(2),
            &PlayOptions {
                rate: 2.0,
                ..options()
            },
        );
        assert_eq!(summary.ticks, 4);
    }

    #[test]
    fn test_start_offset_skips_ahead() {
        let (summary, _) = play(
            clip(2),
            &PlayOptions {
                start: Some(1.5),
                ..options()
            },
        );
        assert_eq!(summary.ticks, 2);
    }

    #[test]
    fn test_empty_clip_ends_immediately() {
        let empty = SampleBuffer::mono(Vec::new(), 100).unwrap();
        let (summary, _) = play(empty, &options());
        assert_eq!(summary.ticks, 0);
        assert_eq!(
            summary.events,
            vec![TransportEvent::Started, TransportEvent::Ended]
        );
    }

    #[test]
    fn test_run_rejects_garbage_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("noise.wav");
        fs::write(&path, b"definitely not a wav").unwrap();

        let code = run(&PlayOptions {
            input: path,
            ..options()
        })
        .unwrap();
        assert_eq!(code, ExitCode::from(EXIT_INPUT_ERROR));
    }
}
