//! High score and leaderboard persistence.
//!
//! Both stores are JSON files. Reads never fail from the caller's point of
//! view: a missing or unreadable file yields 0 or an empty board. Writes
//! return a `Result` so the driver decides what to do about a failure.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreFile {
    #[serde(default)]
    high_score: u32,
}

pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        ScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn try_load(&self) -> Result<u32> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let file: HighScoreFile = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(file.high_score)
    }

    /// Stored high score, or 0 if there is none to be read.
    pub fn load(&self) -> u32 {
        if !self.path.exists() {
            return 0;
        }

        self.try_load().unwrap_or_else(|e| {
            warn!("{:#}, starting from 0", e);
            0
        })
    }

    pub fn save(&self, high_score: u32) -> Result<()> {
        let text = serde_json::to_string(&HighScoreFile { high_score })?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        debug!("high score {} saved to {}", high_score, self.path.display());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub score: u32,
    pub level: u32,
    pub date: String,
}

impl LeaderboardEntry {
    pub fn now(score: u32, level: u32) -> Self {
        LeaderboardEntry {
            score,
            level,
            date: chrono::Local::now().format(DATE_FORMAT).to_string(),
        }
    }
}

/// Top runs, best first, capped at `capacity`.
pub struct LeaderboardStore {
    path: PathBuf,
    capacity: usize,
    entries: Vec<LeaderboardEntry>,
}

impl LeaderboardStore {
    pub const DEFAULT_CAPACITY: usize = 10;

    /// Opens the store and loads whatever board is on disk.
    pub fn open<P: Into<PathBuf>>(path: P, capacity: usize) -> Self {
        let mut store = LeaderboardStore { path: path.into(), capacity: capacity.max(1), entries: vec![] };
        store.entries = store.load();
        store
    }

    pub fn try_load(&self) -> Result<Vec<LeaderboardEntry>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let mut entries: Vec<LeaderboardEntry> = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        // hand-edited files may be out of order or too long
        rank(&mut entries, self.capacity);
        Ok(entries)
    }

    pub fn load(&self) -> Vec<LeaderboardEntry> {
        if !self.path.exists() {
            return vec![];
        }

        self.try_load().unwrap_or_else(|e| {
            warn!("{:#}, starting with an empty leaderboard", e);
            vec![]
        })
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Ranks `entry` into the in-memory board without touching the disk.
    pub fn insert(&mut self, entry: LeaderboardEntry) -> &[LeaderboardEntry] {
        self.entries.push(entry);
        rank(&mut self.entries, self.capacity);
        &self.entries
    }

    /// Adds a run stamped with the current time and persists the board.
    /// The in-memory board is updated even if the write fails.
    pub fn record(&mut self, score: u32, level: u32) -> Result<&[LeaderboardEntry]> {
        self.insert(LeaderboardEntry::now(score, level));
        self.save()?;
        Ok(&self.entries)
    }

    pub fn save(&self) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        debug!("leaderboard with {} entries saved to {}", self.entries.len(), self.path.display());
        Ok(())
    }
}

// Stable: equal scores keep insertion order.
fn rank(entries: &mut Vec<LeaderboardEntry>, capacity: usize) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(capacity);
}
