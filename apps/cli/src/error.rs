//! # CLI Error Type
//!
//! Unified error type for every command.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in quotekit                               │
//! │                                                                         │
//! │  ValidationError ──► CoreError ──┐                                      │
//! │                                  │                                      │
//! │  RenderError ────────────────────┼──► CliError ──► message on stderr    │
//! │                                  │        │                             │
//! │  ConfigError / std::io::Error ───┘        └──► ErrorCode ──► exit code  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scripts can branch on the exit code without parsing messages.

use std::path::PathBuf;

use quotekit_core::{CoreError, ValidationError};
use quotekit_render::RenderError;
use thiserror::Error;

use crate::config::ConfigError;

/// Error returned by commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A command line value that clap accepted but the command cannot use.
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid quote file: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Exit codes.
///
/// | Code | Meaning                         |
/// |------|---------------------------------|
/// | 1    | Internal error                  |
/// | 2    | Invalid input (reserved by clap for usage errors too) |
/// | 3    | Line item not found             |
/// | 4    | Configuration problem           |
/// | 5    | File could not be read/written  |
/// | 6    | Document rendering failed       |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Internal,
    Validation,
    NotFound,
    Config,
    Io,
    Render,
}

impl ErrorCode {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::Validation => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::Config => 4,
            ErrorCode::Io => 5,
            ErrorCode::Render => 6,
        }
    }
}

impl CliError {
    pub fn input(message: impl Into<String>) -> Self {
        CliError::Input(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Core(CoreError::ItemNotFound { .. }) => ErrorCode::NotFound,
            CliError::Core(CoreError::QuoteTooLarge { .. }) => ErrorCode::Validation,
            CliError::Core(CoreError::Validation(_)) => ErrorCode::Validation,
            CliError::Core(CoreError::InvalidDocument(_)) => ErrorCode::Internal,
            CliError::Render(RenderError::Logo(_)) => ErrorCode::Config,
            CliError::Render(RenderError::Io(_)) => ErrorCode::Io,
            CliError::Render(_) => ErrorCode::Render,
            CliError::Config(_) => ErrorCode::Config,
            CliError::Input(_) => ErrorCode::Validation,
            CliError::Read { .. } | CliError::Write { .. } => ErrorCode::Io,
            CliError::Parse { .. } => ErrorCode::Io,
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Core(CoreError::Validation(err))
    }
}

/// Result type for commands.
pub type CliResult<T> = Result<T, CliError>;
