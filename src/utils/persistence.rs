//! JSON persistence helpers for the save files in the data directory.

use crate::constants::{DATA_DIR_ENV, DATA_DIR_NAME};
use log::warn;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the data directory, creating it if needed.
///
/// `$MASTERMIND_HOME` wins when set, otherwise `~/.mastermind/`.
pub fn data_dir() -> io::Result<PathBuf> {
    let dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => {
            let home_dir = dirs::home_dir().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "Could not determine home directory",
                )
            })?;
            home_dir.join(DATA_DIR_NAME)
        }
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a save file in the data directory.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(data_dir()?.join(filename))
}

/// Load a JSON file, returning `T::default()` if it is missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(_) => return T::default(),
    };
    serde_json::from_str(&json).unwrap_or_else(|e| {
        warn!("Ignoring unreadable save file {}: {e}", path.display());
        T::default()
    })
}

/// Save a value as pretty-printed JSON, creating the parent directory if needed.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}
