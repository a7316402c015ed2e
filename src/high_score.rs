//! Persisted high score: a single decimal integer in a plain-text file.

use crate::constants::HIGH_SCORE_FILE;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File-backed slot holding the best score across sessions.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    /// Store at `<data_dir>/highscore.txt`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(HIGH_SCORE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored score. A missing or unparsable file reads as 0.
    pub fn load(&self) -> u32 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|contents| contents.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Overwrite the stored score.
    pub fn save(&self, score: u32) -> io::Result<()> {
        fs::write(&self.path, score.to_string())
    }

    /// Persist `score` only if it beats the stored value.
    ///
    /// Returns whether the file was written.
    pub fn record(&self, score: u32) -> io::Result<bool> {
        if score <= self.load() {
            return Ok(false);
        }
        self.save(score)?;
        tracing::info!(score, path = %self.path.display(), "Saved new high score");
        Ok(true)
    }
}
