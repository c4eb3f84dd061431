//! Error types for vt-core

use thiserror::Error;

/// Core error type for Veritemiz
#[derive(Error, Debug)]
pub enum CoreError {
    /// V001: Upload exceeds the size ceiling
    #[error("[V001] File is too large: {size} bytes (maximum allowed is {limit} bytes)")]
    PayloadTooLarge { size: usize, limit: usize },

    /// V002: No header row could be read
    #[error("[V002] File is empty or not a valid CSV file")]
    EmptyOrInvalidInput,

    /// V003: Content is not well-formed delimited text
    #[error("[V003] CSV parse error: {message}")]
    ParseError { message: String },

    /// V004: Cleaning scope names a column the table does not have
    #[error("[V004] Unknown column '{name}' (available: {available})")]
    UnknownColumn { name: String, available: String },

    /// V005: Malformed table or request
    #[error("[V005] Invalid input: {message}")]
    InvalidInput { message: String },

    /// V006: Artifact id was never issued or has expired
    #[error("[V006] File not found or expired: {id}")]
    NotFound { id: String },

    /// V007: Configuration file not found
    #[error("[V007] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// V008: Failed to parse configuration file
    #[error("[V008] Failed to parse config {path}: {message}")]
    ConfigParseError { path: String, message: String },

    /// V009: Invalid configuration value
    #[error("[V009] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// V010: Anything unanticipated (poisoned locks, writer failures)
    #[error("[V010] Internal error: {0}")]
    Internal(String),

    /// V011: IO error with file path context
    #[error("[V011] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// V012: CSV writer error
    #[error("[V012] CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Error taxonomy used by callers to pick a user-facing response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    PayloadTooLarge,
    EmptyOrInvalidInput,
    ParseError,
    UnknownColumn,
    InvalidInput,
    NotFound,
    Unexpected,
}

impl CoreError {
    /// Classify this error into the request-level taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::PayloadTooLarge { .. } => ErrorKind::PayloadTooLarge,
            CoreError::EmptyOrInvalidInput => ErrorKind::EmptyOrInvalidInput,
            CoreError::ParseError { .. } => ErrorKind::ParseError,
            CoreError::UnknownColumn { .. } => ErrorKind::UnknownColumn,
            CoreError::InvalidInput { .. } => ErrorKind::InvalidInput,
            CoreError::NotFound { .. } => ErrorKind::NotFound,
            CoreError::ConfigNotFound { .. }
            | CoreError::ConfigParseError { .. }
            | CoreError::ConfigInvalid { .. }
            | CoreError::Internal(_)
            | CoreError::IoWithPath { .. }
            | CoreError::Csv(_) => ErrorKind::Unexpected,
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            message: message.into(),
        }
    }
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
