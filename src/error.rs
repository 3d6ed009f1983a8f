//! Global error handling for mergefs
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use thiserror::Error;

use crate::clipboard::ClipboardError;

/// Global error type for mergefs operations
#[derive(Error, Debug)]
pub enum MergeFsError {
    /// Combine was requested with nothing selected
    #[error("No files selected: select at least one file to combine")]
    EmptySelection,

    /// Export, copy or prompt prefixing was requested before any combine
    #[error("No combined output yet: combine files first")]
    MissingOutput,

    /// Reading a single file failed
    #[error("Error reading file {path}: {message}")]
    FileRead { path: String, message: String },

    /// Clipboard errors
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl MergeFsError {
    /// Whether this error is a user notice rather than a failure
    pub fn is_notice(&self) -> bool {
        matches!(self, Self::EmptySelection | Self::MissingOutput)
    }
}

/// Specialized Result type for mergefs operations
pub type Result<T> = std::result::Result<T, MergeFsError>;

/// Creates a MergeFsError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::MergeFsError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for adding context to errors
pub trait ResultExt<T, E> {
    /// Add additional context to an error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| {
            let context = f();
            MergeFsError::Unexpected(format!("{}: {}", context, e))
        })
    }
}

// main returns io::Result, so every error must convert
impl From<MergeFsError> for io::Error {
    fn from(err: MergeFsError) -> Self {
        match err {
            MergeFsError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_positive(n: i32) -> Result<i32> {
        crate::ensure!(n > 0, InvalidArgument, "expected positive number, got {}", n);
        Ok(n)
    }

    #[test]
    fn test_ensure_macro() {
        assert_eq!(check_positive(3).unwrap(), 3);
        let err = check_positive(-1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: expected positive number, got -1"
        );
    }

    #[test]
    fn test_notice_errors() {
        assert!(MergeFsError::EmptySelection.is_notice());
        assert!(MergeFsError::MissingOutput.is_notice());
        assert!(!MergeFsError::Config("x".into()).is_notice());
    }

    #[test]
    fn test_with_context() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = res.with_context(|| "opening config").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected error: opening config: gone");
    }
}
