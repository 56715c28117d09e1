//! Platform-specific paths for stored banks.
//!
//! Banks are user data; they live under the platform config directory:
//! `~/.config/pedalera/banks/` on Linux,
//! `~/Library/Application Support/pedalera/banks/` on macOS,
//! `%APPDATA%\pedalera\banks\` on Windows.

use std::path::{Path, PathBuf};

use crate::error::PersistError;

/// Application name used for directory paths.
const APP_NAME: &str = "pedalera";

/// Subdirectory name for banks.
const BANKS_SUBDIR: &str = "banks";

/// Returns the user-specific banks directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_banks_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(BANKS_SUBDIR)
}

/// Ensure the user banks directory exists, creating it if needed.
pub fn ensure_user_banks_dir() -> Result<PathBuf, PersistError> {
    let dir = user_banks_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| PersistError::create_dir(&dir, e))?;
    }

    Ok(dir)
}

/// Find a bank file by name.
///
/// The name can be a path to a JSON file (absolute or relative), or a bare
/// bank name (with or without the `.json` extension) resolved against the
/// user banks directory.
pub fn find_bank(name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);

    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".json") {
        name.to_string()
    } else {
        format!("{name}.json")
    };

    let user_path = user_banks_dir().join(&filename);
    if user_path.is_file() {
        return Some(user_path);
    }

    None
}

/// List all bank files in the user banks directory.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_banks() -> Vec<PathBuf> {
    let dir = user_banks_dir();
    if !dir.exists() {
        return Vec::new();
    }

    let Ok(entries) = std::fs::read_dir(&dir) else {
        return Vec::new();
    };

    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().map(|ext| ext == "json").unwrap_or(false)
        })
        .collect()
}

/// Get the bank name from a file path (the file stem).
pub fn bank_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn user_banks_dir_carries_the_app_name() {
        let dir = user_banks_dir();
        let dir_str = dir.to_string_lossy();
        assert!(dir_str.contains("pedalera") || dir_str.contains("banks"));
    }

    #[test]
    fn find_bank_by_path() {
        let temp_dir = TempDir::new().unwrap();
        let bank_path = temp_dir.path().join("test.json");
        fs::write(&bank_path, "{\"name\": \"test\"}").unwrap();

        let found = find_bank(bank_path.to_str().unwrap());
        assert_eq!(found, Some(bank_path));
    }

    #[test]
    fn find_bank_not_found() {
        assert!(find_bank("nonexistent_bank_12345").is_none());
    }

    #[test]
    fn bank_name_strips_extension() {
        let path = Path::new("/path/to/bank_1.json");
        assert_eq!(bank_name_from_path(path), Some("bank_1".to_string()));
    }
}
