//! Score persistence: a `name;score` text file, sorted on load.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Most entries a leaderboard will hold; extra file lines are ignored.
pub const MAX_ENTRIES: usize = 512;

/// Leaderboard failures.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// The backing file could not be read or written.
    #[error("leaderboard file error: {0}")]
    Io(#[from] std::io::Error),
    /// A name that cannot survive the `name;score` line format.
    #[error("invalid player name: {0:?}")]
    InvalidName(String),
}

/// One scored run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Player name as entered.
    pub name: String,
    /// Final score.
    pub score: u32,
}

/// An in-memory leaderboard, highest score first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<Entry>,
}

impl Leaderboard {
    /// Loads and sorts the leaderboard from `path`.
    ///
    /// A missing file is an empty leaderboard, not an error. Lines are
    /// `name;score`; blank lines, lines without a separator, and lines with
    /// an empty name are skipped, and an unparseable score reads as zero.
    /// Ties keep their file order.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::Io`] when the file exists but cannot be
    /// read.
    pub fn load(path: &Path) -> Result<Self, LeaderboardError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };

        let mut entries = Vec::new();
        for line in contents.lines() {
            if entries.len() >= MAX_ENTRIES {
                break;
            }
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let Some((name, score)) = line.split_once(';') else {
                continue;
            };
            let name = name.trim_start_matches(' ');
            if name.is_empty() {
                continue;
            }
            let score = score.trim_start_matches(' ').parse().unwrap_or(0);
            entries.push(Entry {
                name: name.to_owned(),
                score,
            });
        }

        entries.sort_by(|a, b| b.score.cmp(&a.score));
        debug!(count = entries.len(), "leaderboard loaded");
        Ok(Self { entries })
    }

    /// Appends one run to the file at `path`, creating it if needed.
    ///
    /// The in-memory leaderboard is not updated; reload to see the new
    /// entry in rank order.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::InvalidName`] for an empty name or one
    /// containing `;` or a line break, and [`LeaderboardError::Io`] when the
    /// file cannot be written.
    pub fn append(path: &Path, name: &str, score: u32) -> Result<(), LeaderboardError> {
        if name.is_empty() || name.contains(';') || name.contains('\n') || name.contains('\r') {
            return Err(LeaderboardError::InvalidName(name.to_owned()));
        }
        let mut file = OpenOptions::new().append(true).create(true).open(path)?;
        writeln!(file, "{name};{score}")?;
        Ok(())
    }

    /// The top `n` entries, highest score first.
    #[must_use]
    pub fn top(&self, n: usize) -> &[Entry] {
        &self.entries[..self.entries.len().min(n)]
    }

    /// All entries, highest score first.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

// =============================================================================
// Tests
// =============================================================================
