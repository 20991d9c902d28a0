//! Zero-sensitivity strategy: force byte 0 of the blob to `0x01`.
//!
//! The blob's remaining bytes are opaque per-mode tuning data; only the
//! leading flag byte is owned by this strategy and everything after it is
//! copied through unchanged.

use super::{read_failure, value_missing, write_failure};
use crate::access::RegistryAccess;
use crate::error::{PatchError, PatchResult};
use crate::types::{PatchOutcome, Payload, RegistryValueRef};
use tracing::debug;

const DESIRED_FLAG: u8 = 0x01;

/// Compute the patched payload, or `None` when the flag byte is already set.
fn patched(payload: &[u8]) -> Option<Vec<u8>> {
    if payload[0] == DESIRED_FLAG {
        return None;
    }
    let mut modified = payload.to_vec();
    modified[0] = DESIRED_FLAG;
    Some(modified)
}

pub(super) fn execute(
    access: &dyn RegistryAccess,
    key: &RegistryValueRef,
) -> PatchResult<PatchOutcome> {
    let raw = access
        .read_binary(key)
        .map_err(|e| read_failure(key, e))?
        .ok_or_else(|| value_missing(key))?;

    if raw.is_empty() {
        return Err(PatchError::MalformedPayload {
            key: key.clone(),
            expected: 1,
            actual: 0,
        });
    }

    match patched(&raw) {
        None => {
            debug!("{}: sensitivity flag already set", key);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::fake::MemoryRegistry;
    use crate::types::RootKey;

    const SUBKEY: &str = r"SOFTWARE\Tencent\Call-of-Duty";
    const NAME: &str = "CODM_1_iMSDK_CN_PVE_h99";

    fn value_ref() -> RegistryValueRef {
        RegistryValueRef::new(RootKey::CurrentUser, SUBKEY, NAME)
    }

    fn registry(payload: Vec<u8>) -> MemoryRegistry {
        MemoryRegistry::new(RootKey::CurrentUser, SUBKEY).with_value(NAME, Payload::Binary(payload))
    }

    #[test]
    fn test_patches_leading_byte_only() {
        let reg = registry(vec![0x00, 0xAA, 0xBB]);
        let outcome = execute(&reg, &value_ref()).unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.modified, Some(Payload::Binary(vec![0x01, 0xAA, 0xBB])));
        assert_eq!(reg.get(NAME), Some(Payload::Binary(vec![0x01, 0xAA, 0xBB])));
    }

    #[test]
    fn test_no_write_when_already_patched() {
        let reg = registry(vec![0x01, 0xAA, 0xBB]);
        let outcome = execute(&reg, &value_ref()).unwrap();
        assert!(!outcome.changed);
        assert!(outcome.modified.is_none());
        assert_eq!(reg.writes(), 0);
    }

    #[test]
    fn test_idempotent_across_runs() {
        let reg = registry(vec![0x42, 0x10, 0x20, 0x30]);
        let first = execute(&reg, &value_ref()).unwrap();
        assert!(first.changed);
        let after_first = reg.get(NAME);

        let second = execute(&reg, &value_ref()).unwrap();
        assert!(!second.changed);
        assert_eq!(reg.get(NAME), after_first);
        assert_eq!(reg.writes(), 1);
    }

    #[test]
    fn test_preserves_unowned_bytes() {
        let payload: Vec<u8> = (0u8..32).map(|b| b.wrapping_mul(7)).collect();
        let reg = registry(payload.clone());
        let outcome = execute(&reg, &value_ref()).unwrap();
        let modified = match outcome.modified.unwrap() {
            Payload::Binary(b) => b,
            other => panic!("expected binary payload, got {other:?}"),
        };
        assert_eq!(modified[0], 0x01);
        assert_eq!(&modified[1..], &payload[1..]);
    }

    #[test]
    fn test_single_byte_payload() {
        let reg = registry(vec![0x00]);
        let outcome = execute(&reg, &value_ref()).unwrap();
        assert_eq!(outcome.modified, Some(Payload::Binary(vec![0x01])));
    }

    #[test]
    fn test_empty_payload_is_malformed() {
        let reg = registry(vec![]);
        let err = execute(&reg, &value_ref()).unwrap_err();
        assert!(matches!(
            err,
            PatchError::MalformedPayload { expected: 1, actual: 0, .. }
        ));
        assert_eq!(reg.writes(), 0);
    }

    #[test]
    fn test_missing_value_is_read_failure() {
        let reg = MemoryRegistry::new(RootKey::CurrentUser, SUBKEY);
        let err = execute(&reg, &value_ref()).unwrap_err();
        assert!(matches!(err, PatchError::ReadFailure { .. }));
    }

    #[test]
    fn test_denied_write_is_permission_denied() {
        let reg = registry(vec![0x00, 0xAA]).deny_writes();
        let err = execute(&reg, &value_ref()).unwrap_err();
        assert!(matches!(err, PatchError::PermissionDenied { .. }));
    }
}
