//! Error types for the zforum plugin.
//!
//! This module defines the centralized error type [`ZforumError`] and a [`Result`]
//! alias used throughout the crate. Only [`ZforumError::Validation`] can surface
//! from forum operations; the other variants cover plugin plumbing such as
//! theme loading and configuration parsing.

use thiserror::Error;

/// The main error type for zforum operations.
///
/// Mutations that target a post which no longer exists are not errors; they
/// are silent no-ops. The only recoverable domain failure is creating a post
/// without a title.
///
/// # Examples
///
/// ```
/// use zforum::ZforumError;
///
/// fn require_title(title: &str) -> Result<(), ZforumError> {
///     if title.trim().is_empty() {
///         return Err(ZforumError::Validation("Title is required!".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(require_title("  ").is_err());
/// ```
#[derive(Debug, Error)]
pub enum ZforumError {
    /// User input was rejected before touching the store.
    ///
    /// Raised by post creation when the trimmed title is empty. The message is
    /// meant to be shown to the user as-is.
    #[error("{0}")]
    Validation(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A theme could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A configuration value is malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ZforumError {
    /// Returns `true` for errors caused by user input rather than the environment.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// A specialized `Result` type for zforum operations.
pub type Result<T> = std::result::Result<T, ZforumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_displayed_verbatim() {
        let err = ZforumError::Validation("Title is required!".to_string());
        assert_eq!(err.to_string(), "Title is required!");
        assert!(err.is_validation());
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here/zforum.toml")?)
        }

        let err = read_missing().unwrap_err();
        assert!(matches!(err, ZforumError::Io(_)));
        assert!(!err.is_validation());
    }
}
