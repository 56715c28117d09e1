//! Bank file storage.
//!
//! Banks are stored as pretty-printed JSON documents. Loading goes through
//! the registry so port lists come from current plugin metadata, and through
//! the model API so structural validation re-runs on every load.

use std::path::Path;

use pedalera_model::Bank;
use pedalera_registry::PluginRegistry;

use crate::codec::{BankDocument, decode_bank, encode_bank};
use crate::error::PersistError;

/// Saves a bank as a JSON document, creating parent directories as needed.
pub fn save_bank(bank: &Bank, path: impl AsRef<Path>) -> Result<(), PersistError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| PersistError::create_dir(parent, e))?;
    }

    let document = encode_bank(bank)?;
    let content = serde_json::to_string_pretty(&document)?;
    std::fs::write(path, content).map_err(|e| PersistError::write_file(path, e))?;
    tracing::info!(path = %path.display(), "saved bank '{}'", bank.name());
    Ok(())
}

/// Loads a bank from a JSON document, re-materializing effects through
/// `registry`.
pub fn load_bank(path: impl AsRef<Path>, registry: &PluginRegistry) -> Result<Bank, PersistError> {
    let path = path.as_ref();
    let content =
        std::fs::read_to_string(path).map_err(|e| PersistError::read_file(path, e))?;
    let document: BankDocument = serde_json::from_str(&content)?;
    let bank = decode_bank(&document, registry)?;
    tracing::info!(path = %path.display(), "loaded bank '{}'", bank.name());
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_is_a_read_error() {
        let err = load_bank("/does/not/exist.json", &PluginRegistry::new()).unwrap_err();
        assert!(matches!(err, PersistError::ReadFile { .. }));
    }

    #[test]
    fn load_garbage_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.json");
        std::fs::write(&path, "not json").unwrap();

        let err = load_bank(&path, &PluginRegistry::new()).unwrap_err();
        assert!(matches!(err, PersistError::Json(_)));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/banks/bank.json");

        save_bank(&Bank::new("Bank 1"), &path).unwrap();
        assert!(path.exists());

        let loaded = load_bank(&path, &PluginRegistry::new()).unwrap();
        assert_eq!(loaded.name(), "Bank 1");
        assert!(loaded.pedalboards().is_empty());
    }
}
