//! Error types for the docsync matching engine.

use thiserror::Error;

/// Primary error type for matching and index operations.
///
/// "No match" is never an error: searches return `Ok(None)` when the
/// thresholds are not met. Only structural problems end up here.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error(
        "index data too sparse: {index_lines} indexed lines for a {frame_lines}-line frame \
         (window {window}); regenerate the document index"
    )]
    InsufficientIndexData {
        index_lines: usize,
        frame_lines: usize,
        window: usize,
    },

    #[error("invalid document type: {0:?}")]
    InvalidDocumentType(String),

    #[error("invalid document id: {0:?}")]
    InvalidDocumentId(String),

    #[error("malformed document index: {0}")]
    IndexFormat(String),

    #[error("invalid match parameters: {0}")]
    InvalidParams(String),

    #[error("ocr error: {0}")]
    Ocr(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type alias for MatchError.
pub type Result<T> = std::result::Result<T, MatchError>;
