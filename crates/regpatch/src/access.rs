//! Registry access abstraction.
//!
//! The [`RegistryAccess`] trait is the only seam between the patch engine
//! and the operating system. The engine never touches the Windows API
//! directly, so strategies and the dispatcher can run against an in-memory
//! registry in tests.

use crate::types::{RegistryValueRef, RootKey};
use thiserror::Error;

/// Low-level accessor failures, before they are classified per-strategy.
#[derive(Debug, Error)]
pub enum AccessError {
    /// The key or value does not exist.
    #[error("not found")]
    NotFound,

    /// The OS rejected the call with an access-denied condition.
    #[error("access denied")]
    PermissionDenied,

    /// Any other OS failure, carrying the raw status code.
    #[error("os error {code}: {msg}")]
    Os { code: u32, msg: String },
}

impl AccessError {
    pub fn os(code: u32, msg: impl Into<String>) -> Self {
        AccessError::Os {
            code,
            msg: msg.into(),
        }
    }
}

/// Reads and writes named values under a registry key.
///
/// Reads of an absent value return `Ok(None)` rather than an error, and
/// `enum_value_name` signals exhaustion the same way; only genuine OS
/// failures surface as `Err`.
pub trait RegistryAccess: Send + Sync {
    /// Probe that the subtree exists and is openable with read+write access.
    fn open_key(&self, root: RootKey, subkey: &str) -> Result<(), AccessError>;

    /// Name of the value at ordinal `index`, or `Ok(None)` once enumeration
    /// is exhausted.
    fn enum_value_name(
        &self,
        root: RootKey,
        subkey: &str,
        index: u32,
    ) -> Result<Option<String>, AccessError>;

    /// Raw byte payload of a binary value, or `Ok(None)` if absent.
    fn read_binary(&self, key: &RegistryValueRef) -> Result<Option<Vec<u8>>, AccessError>;

    /// Overwrite a binary value's payload.
    fn write_binary(&self, key: &RegistryValueRef, data: &[u8]) -> Result<(), AccessError>;

    /// Typed 32-bit read of a DWORD value, or `Ok(None)` if absent.
    fn read_dword(&self, key: &RegistryValueRef) -> Result<Option<u32>, AccessError>;

    /// Typed 32-bit write of a DWORD value.
    fn write_dword(&self, key: &RegistryValueRef, value: u32) -> Result<(), AccessError>;
}
