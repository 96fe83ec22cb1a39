//! # Render Errors
//!
//! Everything that can go wrong between a snapshot and a byte buffer.
//!
//! ```text
//! lopdf::Error ─────► RenderError::Pdf
//! csv::Error ───────► RenderError::Csv
//! image::ImageError ► RenderError::Logo
//! std::io::Error ───► RenderError::Io
//! ```
//!
//! A failed render never touches the last successful export bundle, so
//! every variant is recoverable from the caller's point of view.

use thiserror::Error;

/// Errors produced by the document renderers.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The PDF object tree could not be encoded or written.
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("CSV generation failed: {0}")]
    Csv(#[from] csv::Error),

    /// The configured logo could not be decoded.
    #[error("Logo could not be used: {0}")]
    Logo(String),

    #[error("I/O error while rendering: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        RenderError::Logo(err.to_string())
    }
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
