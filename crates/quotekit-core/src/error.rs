//! # Error Types
//!
//! Domain-specific error types for quotekit-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quotekit-core errors (this file)                                      │
//! │  ├── CoreError        - Quote actions, snapshots                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quotekit-render errors (separate crate)                               │
//! │  └── RenderError      - PDF / CSV production failures                  │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees, plus an exit code          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → RenderError → CliError            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What is NOT an error
//! - A line item without quantity or price: it counts as zero.
//! - A money value that cannot be formatted: it prints as zero.
//!
//! Both are soft defaults handled where they happen.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An action referenced a line item that does not exist.
    ///
    /// ## When This Occurs
    /// - `RemoveItem` / `UpdateItem` with an index past the end
    /// - The item was already removed by a previous action
    #[error("No line item at index {index} (quote has {len} items)")]
    ItemNotFound { index: usize, len: usize },

    /// Quote has reached the maximum number of line items.
    #[error("Quote cannot have more than {max} items")]
    QuoteTooLarge { max: usize },

    /// A snapshot or quote document could not be (de)serialized.
    #[error("Invalid quote document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid color, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
