use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum CuadreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid file format: {0}")]
    InvalidFormat(String),

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("pdftotext did not finish within {0:?}")]
    Timeout(Duration),

    #[error("row {row} cannot be read as a transaction: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("failed to load profile from {path}: {reason}")]
    ProfileLoad { path: PathBuf, reason: String },

    #[error("invalid profile: {0}")]
    ProfileInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

pub type Result<T> = std::result::Result<T, CuadreError>;
