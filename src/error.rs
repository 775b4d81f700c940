//! Error types for wcman library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wcman operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wcman library
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read directory '{path}': {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to parse document: {0}")]
    Parse(String),

    // -------------------------------------------------------------------------
    // Schema Errors (fatal at load time)
    // -------------------------------------------------------------------------
    #[error("Base configuration document is missing: {0}")]
    MissingBaseDocument(String),

    #[error("Option '{path}' declares subtype '{subtype}' which has no validator for kind {kind}")]
    UnsupportedSubtype {
        path: String,
        subtype: String,
        kind: String,
    },

    #[error("Invalid option descriptor for {path}: {reason}")]
    InvalidDescriptor { path: String, reason: String },

    // -------------------------------------------------------------------------
    // Access Errors
    // -------------------------------------------------------------------------
    #[error("Option not found: {0}")]
    OptionNotFound(String),

    #[error("Type mismatch for {key}: expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::OptionNotFound(_) | Error::MissingBaseDocument(_))
    }

    /// Check if this error means the option catalog or base document is broken.
    ///
    /// Schema errors halt loading; they are never caused by out-of-range user values.
    #[must_use]
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Error::MissingBaseDocument(_)
                | Error::UnsupportedSubtype { .. }
                | Error::InvalidDescriptor { .. }
        )
    }
}
