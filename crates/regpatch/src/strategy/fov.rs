//! Field-of-view strategy: force byte 6 of the blob to the requested value.
//!
//! The blob layout reserves offsets 0-5 for other camera tuning fields;
//! offset 6 is the FOV byte. A payload shorter than 7 bytes cannot carry
//! that layout and fails as malformed, never as a silent skip.

use super::{read_failure, value_missing, write_failure};
use crate::access::RegistryAccess;
use crate::error::{PatchError, PatchResult};
use crate::types::{PatchOutcome, Payload, RegistryValueRef};
use tracing::debug;

const FOV_OFFSET: usize = 6;

/// Minimum payload length a FOV blob can have.
pub const MIN_FOV_PAYLOAD_LEN: usize = FOV_OFFSET + 1;

/// Compute the patched payload, or `None` when offset 6 already holds `fov`.
/// The payload must be at least [`MIN_FOV_PAYLOAD_LEN`] bytes.
fn patched(payload: &[u8], fov: u8) -> Option<Vec<u8>> {
    if payload[FOV_OFFSET] == fov {
        return None;
    }
    let mut modified = payload.to_vec();
    modified[FOV_OFFSET] = fov;
    Some(modified)
}

pub(super) fn execute(
    access: &dyn RegistryAccess,
    key: &RegistryValueRef,
    fov: u8,
) -> PatchResult<PatchOutcome> {
    let raw = access
        .read_binary(key)
        .map_err(|e| read_failure(key, e))?
        .ok_or_else(|| value_missing(key))?;

    if raw.len() < MIN_FOV_PAYLOAD_LEN {
        return Err(PatchError::MalformedPayload {
            key: key.clone(),
            expected: MIN_FOV_PAYLOAD_LEN,
            actual: raw.len(),
        });
    }

    match patched(&raw, fov) {
        None => {
            debug!("{}: FOV byte already {}", key, fov);
            Ok(PatchOutcome::unchanged(key.clone(), Payload::Binary(raw)))
        }
        Some(modified) => {
            access
                .write_binary(key, &modified)
                .map_err(|e| write_failure(key, e))?;
            Ok(PatchOutcome::patched(
                key.clone(),
                Payload::Binary(raw),
                Payload::Binary(modified),
            ))
        }
    }
}
