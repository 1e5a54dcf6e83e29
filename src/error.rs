//! Error types for the Sentira library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! crate-wide [`SentiraError`] enum.
//!
//! The variants map onto the failure classes the pipeline distinguishes:
//! configuration and artifact-load problems are fatal and surface before any
//! work starts, corpus problems abort a training run before artifacts are
//! written, and storage problems are reported to the caller who decides
//! whether they are fatal (they are not for the ingestion path, where
//! classification has already succeeded).

use std::io;

use thiserror::Error;

/// The main error type for Sentira operations.
#[derive(Error, Debug)]
pub enum SentiraError {
    /// I/O errors (file operations, artifact reads/writes, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Corpus loading and schema errors
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Text analysis errors (normalization, tokenization)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Model errors (fitting, artifact persistence, pairing)
    #[error("Model error: {0}")]
    Model(String),

    /// Storage errors (datasets, relational store)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Comment source errors (external API)
    #[error("Source error: {0}")]
    Source(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// CSV parsing/serialization errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SentiraError.
pub type Result<T> = std::result::Result<T, SentiraError>;

impl SentiraError {
    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SentiraError::Config(msg.into())
    }

    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        SentiraError::Corpus(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SentiraError::Analysis(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        SentiraError::Model(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        SentiraError::Storage(msg.into())
    }

    /// Create a new source error.
    pub fn source<S: Into<String>>(msg: S) -> Self {
        SentiraError::Source(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        SentiraError::InvalidOperation(msg.into())
    }
}
