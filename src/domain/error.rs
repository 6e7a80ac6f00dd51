//! Error types for hooklab.
//!
//! This module defines the centralized error type [`HookError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for hooklab operations.
///
/// Construction errors ([`HookError::InvalidArgument`]) are fatal to the call
/// that produced them. Storage and serialization errors are only surfaced for
/// writes; reads degrade to "absent" and never reach the caller.
///
/// # Examples
///
/// ```
/// use hooklab::HookError;
///
/// fn validate_key(key: &str) -> Result<(), HookError> {
///     if key.is_empty() {
///         return Err(HookError::InvalidArgument("storage key must not be empty".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_key("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum HookError {
    /// Construction parameters are malformed.
    ///
    /// Raised for negative debounce delays and empty storage keys.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Storage backend operation failed.
    ///
    /// The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A value could not be encoded or decoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for hooklab operations.
pub type Result<T> = std::result::Result<T, HookError>;
