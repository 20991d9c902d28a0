//! Error types for the patch engine.

use crate::types::RegistryValueRef;
use thiserror::Error;

/// Errors surfaced by strategies and the scan dispatcher.
///
/// Every variant that concerns a specific value carries the full registry
/// path and value name, so the caller can render an actionable message.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The target subtree does not exist. Fatal for the whole scan.
    #[error("registry key not found: {0}")]
    KeyNotFound(String),

    /// A value could not be read (missing or inaccessible).
    #[error("failed to read {key}: {msg}")]
    ReadFailure { key: RegistryValueRef, msg: String },

    /// A write call was rejected.
    #[error("failed to write {key}: {msg}")]
    WriteFailure { key: RegistryValueRef, msg: String },

    /// A read or write was rejected with an access-denied condition.
    #[error("access denied: {target}: {msg}")]
    PermissionDenied { target: String, msg: String },

    /// The payload is shorter than the minimum length the strategy requires.
    #[error("malformed payload in {key}: expected at least {expected} bytes, got {actual}")]
    MalformedPayload {
        key: RegistryValueRef,
        expected: usize,
        actual: usize,
    },

    /// An operation parameter is outside its allowed range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Value enumeration failed with an OS error other than exhaustion.
    /// Aborts the whole scan.
    #[error("enumeration failed under {path} at index {index}: {msg}")]
    EnumerationFailed {
        path: String,
        index: u32,
        msg: String,
    },
}

impl PatchError {
    /// Create a ReadFailure for a value.
    pub fn read_failure(key: &RegistryValueRef, msg: impl Into<String>) -> Self {
        PatchError::ReadFailure {
            key: key.clone(),
            msg: msg.into(),
        }
    }

    /// Create a WriteFailure for a value.
    pub fn write_failure(key: &RegistryValueRef, msg: impl Into<String>) -> Self {
        PatchError::WriteFailure {
            key: key.clone(),
            msg: msg.into(),
        }
    }

    /// Create a PermissionDenied for a value.
    pub fn permission_denied(key: &RegistryValueRef, msg: impl Into<String>) -> Self {
        PatchError::PermissionDenied {
            target: key.to_string(),
            msg: msg.into(),
        }
    }
}

/// Result type for patch operations.
pub type PatchResult<T> = Result<T, PatchError>;
