//! Error types for persistence operations.

use std::path::PathBuf;
use thiserror::Error;

use pedalera_model::ModelError;

/// Errors that can occur while encoding, decoding, or storing banks.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse or serialize JSON
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document references a plugin the registry does not know
    #[error("unknown plugin: {0}")]
    UnknownPlugin(String),

    /// The document violates the bank-document contract
    #[error("malformed bank document: {0}")]
    Malformed(String),

    /// A connection endpoint in the graph does not resolve to a member port
    #[error("connection endpoint {0} does not resolve to a member port")]
    DanglingEndpoint(String),

    /// Rebuilding the graph from the document was rejected by the model
    #[error("invalid graph: {0}")]
    Model(#[from] ModelError),
}

impl PersistError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PersistError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PersistError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PersistError::CreateDir {
            path: path.into(),
            source,
        }
    }
}
