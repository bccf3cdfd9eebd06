//! Error types for the picklist engine.
//!
//! This module defines the centralized error type [`PicklistError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Selection operations never surface these errors to their callers: unknown ids,
//! wrong-mode requests and disabled targets are narrowed to no-ops and only logged.
//! Structural and configuration errors are returned as `Err`, since they point at a
//! programming error in the caller.

use thiserror::Error;

/// The main error type for picklist operations.
///
/// # Examples
///
/// ```
/// use picklist::PicklistError;
///
/// let err = PicklistError::StructuralMismatch { mirrors: 3, expected: 4 };
/// assert_eq!(
///     err.to_string(),
///     "Structural mismatch: 3 mirror entries for 4 options"
/// );
/// ```
#[derive(Debug, Error)]
pub enum PicklistError {
    /// An id did not resolve to any item or group.
    ///
    /// Produced when a stale id from a previous render pass is used after a
    /// rebuild. Always treated as a silent no-op.
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    /// The operation is not available in the current selection mode.
    ///
    /// Range and group toggles require `Multiple` mode, and `Single` mode can
    /// never be left without a selection by a bulk deselect.
    #[error("Operation `{operation}` is not available in {mode} mode")]
    InvalidOperationForMode {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Mode the engine was in.
        mode: &'static str,
    },

    /// The targeted item is disabled and keeps its selection.
    #[error("Entity is disabled: {0}")]
    DisabledEntity(String),

    /// Mirror entries diverged from the option model after a rebuild.
    ///
    /// Indicates a desynchronization between the caller and the engine and is
    /// therefore reported instead of tolerated.
    #[error("Structural mismatch: {mirrors} mirror entries for {expected} options")]
    StructuralMismatch {
        /// Number of mirror entries present.
        mirrors: usize,
        /// Number of entries the option model requires.
        expected: usize,
    },

    /// The option model violates one of its invariants (e.g. an empty group).
    #[error("Invalid option model: {0}")]
    InvalidModel(String),

    /// Configuration is invalid or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Data provider input could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A specialized `Result` type for picklist operations.
pub type Result<T> = std::result::Result<T, PicklistError>;
