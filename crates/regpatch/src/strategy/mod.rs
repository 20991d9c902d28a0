//! Patch strategies, one per value-name category.
//!
//! Each strategy reads the current payload through the accessor, computes a
//! minimally-invasive patched payload, and writes it back only if it
//! differs. "Already in the desired state" is a normal outcome with
//! `changed = false`, never an error. One behavior per category: the family
//! is a closed enum dispatched by [`Strategy::execute`].

mod fov;
mod framerate;
mod sensitivity;

use crate::access::{AccessError, RegistryAccess};
use crate::error::{PatchError, PatchResult};
use crate::types::{PatchOutcome, RegistryValueRef};

pub use fov::MIN_FOV_PAYLOAD_LEN;

/// The closed set of patch behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Force byte 0 of the sensitivity blob to `0x01`.
    SensitivityZero,
    /// Force the custom-frame-rate enable flag (DWORD) to `1`.
    FrameRateEnable,
    /// Force the custom-frame-rate cap (DWORD) to `0` (unbounded).
    FrameRateValue,
    /// Force byte 6 of the FOV blob to the requested value.
    FieldOfView { fov: u8 },
}

impl Strategy {
    /// Apply this strategy to one value. Read/write failures propagate as
    /// typed errors; a payload already in the desired state yields
    /// `changed = false` and issues no write.
    pub fn execute(
        &self,
        access: &dyn RegistryAccess,
        key: &RegistryValueRef,
    ) -> PatchResult<PatchOutcome> {
        match *self {
            Strategy::SensitivityZero => sensitivity::execute(access, key),
            Strategy::FrameRateEnable => framerate::execute(access, key, 1),
            Strategy::FrameRateValue => framerate::execute(access, key, 0),
            Strategy::FieldOfView { fov } => fov::execute(access, key, fov),
        }
    }
}

/// Classify an accessor failure raised while reading a value.
pub(crate) fn read_failure(key: &RegistryValueRef, err: AccessError) -> PatchError {
    match err {
        AccessError::PermissionDenied => PatchError::permission_denied(key, "read rejected"),
        other => PatchError::read_failure(key, other.to_string()),
    }
}

/// Classify an accessor failure raised while writing a value.
pub(crate) fn write_failure(key: &RegistryValueRef, err: AccessError) -> PatchError {
    match err {
        AccessError::PermissionDenied => PatchError::permission_denied(key, "write rejected"),
        other => PatchError::write_failure(key, other.to_string()),
    }
}

/// The value was enumerated a moment ago but can no longer be read.
pub(crate) fn value_missing(key: &RegistryValueRef) -> PatchError {
    PatchError::read_failure(key, "value missing or not of the expected type")
}
