//! Generation history.
//!
//! Every generated clip is recorded newest-first with the request that produced
//! it, so it can be listed or regenerated later. The list is capped; recording
//! past the cap drops the oldest entry. History is stored as a pretty-printed
//! JSON array in the user data directory.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use neonbeats_audio::GenerationRequest;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default number of entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// One recorded generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Milliseconds since the Unix epoch at record time; unique within a history.
    pub id: i64,
    /// Request that produced the clip.
    pub request: GenerationRequest,
    /// RFC 3339 record time.
    pub timestamp: String,
    /// Where the clip was written, if it was saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// BLAKE3 hash of the clip's PCM data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pcm_hash: Option<String>,
}

/// Bounded, persisted list of recent generations.
#[derive(Debug)]
pub struct History {
    path: PathBuf,
    limit: usize,
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Default history file location (XDG-compatible).
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("neonbeats").join("history.json"))
    }

    /// Opens the history at `path`. A missing file is an empty history.
    pub fn open(path: impl Into<PathBuf>, limit: usize) -> Result<Self> {
        let path = path.into();
        let limit = limit.max(1);

        let mut entries: Vec<HistoryEntry> = if path.exists() {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read history file: {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse history file: {}", path.display()))?
        } else {
            Vec::new()
        };
        entries.truncate(limit);
        debug!(path = %path.display(), entries = entries.len(), "history opened");

        Ok(Self {
            path,
            limit,
            entries,
        })
    }

    /// Writes the history back to disk, creating parent directories.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create history directory: {}", parent.display())
                })?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .context("Failed to serialize history")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write history file: {}", self.path.display()))
    }

    /// Records a generation at `now`, dropping the oldest entry past the limit.
    pub fn record(
        &mut self,
        request: GenerationRequest,
        file: Option<PathBuf>,
        pcm_hash: Option<String>,
        now: DateTime<Utc>,
    ) -> &HistoryEntry {
        let mut id = now.timestamp_millis();
        if let Some(newest) = self.entries.first() {
            id = id.max(newest.id + 1);
        }

        self.entries.insert(
            0,
            HistoryEntry {
                id,
                request,
                timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
                file,
                pcm_hash,
            },
        );
        self.entries.truncate(self.limit);
        &self.entries[0]
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Looks up an entry by id.
    pub fn get(&self, id: i64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Removes every entry. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
