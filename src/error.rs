//! Error Types - one enum for the whole render path
//!
//! Row-level errors (missing or unreadable logo) are skips.
//! Everything about the input table or output directory is fatal to the batch.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SignatureError>;

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("Logo not found: {}", .0.display())]
    MissingLogo(PathBuf),

    #[error("Logo could not be decoded: {}: {source}", path.display())]
    LogoDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Input table unreadable: {}: {source}", path.display())]
    UnreadableInput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Input table is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Row {row} could not be parsed: {source}")]
    InvalidRecord {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Font unavailable: {}: {reason}", path.display())]
    FontUnavailable { path: PathBuf, reason: String },

    #[error("Output directory unusable: {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PNG encoding failed: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Write failed: {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SignatureError {
    /// Errors that drop a single row and let the batch continue.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::MissingLogo(_) | Self::LogoDecode { .. })
    }

    /// Errors that fail a single row without halting the batch.
    pub fn is_row_failure(&self) -> bool {
        matches!(self, Self::Encode(_) | Self::Write { .. })
    }
}
