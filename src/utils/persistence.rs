//! Generic persistence helpers for the ~/.skyflap/ data directory.
//!
//! Every helper takes the directory explicitly so the binary can honour
//! `--data-dir` and tests can point at a temporary directory.

use crate::constants::DATA_DIR_NAME;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the ~/.skyflap/ directory path, creating it if needed.
pub fn default_data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    ensure_dir(home_dir.join(DATA_DIR_NAME))
}

/// Create `dir` (and parents) if missing and hand it back.
pub fn ensure_dir(dir: PathBuf) -> io::Result<PathBuf> {
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Load a JSON file, returning `T::default()` if missing or invalid.
///
/// A file that exists but fails to parse is logged, since that usually means
/// a hand edit went wrong.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid JSON file");
                T::default()
            }
        },
        Err(_) => T::default(),
    }
}
