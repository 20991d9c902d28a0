//! Frame-rate strategies: typed DWORD rewrites.
//!
//! Two sub-variants share this implementation: the enable flag is forced to
//! `1`, the custom cap value to `0` (no cap). Both read and write through
//! the typed 32-bit accessor path, never as raw bytes.

use super::{read_failure, value_missing, write_failure};
use crate::access::RegistryAccess;
use crate::error::PatchResult;
use crate::types::{PatchOutcome, Payload, RegistryValueRef};
use tracing::debug;

pub(super) fn execute(
    access: &dyn RegistryAccess,
    key: &RegistryValueRef,
    desired: u32,
) -> PatchResult<PatchOutcome> {
    let current = access
        .read_dword(key)
        .map_err(|e| read_failure(key, e))?
        .ok_or_else(|| value_missing(key))?;

    if current == desired {
        debug!("{}: already {}", key, desired);
        return Ok(PatchOutcome::unchanged(key.clone(), Payload::Dword(current)));
    }

    access
        .write_dword(key, desired)
        .map_err(|e| write_failure(key, e))?;
    Ok(PatchOutcome::patched(
        key.clone(),
        Payload::Dword(current),
        Payload::Dword(desired),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::fake::MemoryRegistry;
    use crate::error::PatchError;
    use crate::types::RootKey;

    const SUBKEY: &str = r"SOFTWARE\Tencent\Call-of-Duty";
    const ENABLE: &str = "CODM_1_iMSDK_CN_EnableFramerateCustomize_h42";
    const VALUE: &str = "CODM_1_iMSDK_CN_FramerateCustomizeValue_h42";

    fn value_ref(name: &str) -> RegistryValueRef {
        RegistryValueRef::new(RootKey::CurrentUser, SUBKEY, name)
    }

    #[test]
    fn test_enable_flag_set_from_zero() {
        let reg = MemoryRegistry::new(RootKey::CurrentUser, SUBKEY)
            .with_value(ENABLE, Payload::Dword(0));
        let outcome = execute(&reg, &value_ref(ENABLE), 1).unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.original, Payload::Dword(0));
        assert_eq!(outcome.modified, Some(Payload::Dword(1)));
        assert_eq!(reg.get(ENABLE), Some(Payload::Dword(1)));
    }

    #[test]
    fn test_enable_flag_noop_when_already_one() {
        let reg = MemoryRegistry::new(RootKey::CurrentUser, SUBKEY)
            .with_value(ENABLE, Payload::Dword(1));
        let outcome = execute(&reg, &value_ref(ENABLE), 1).unwrap();
        assert!(!outcome.changed);
        assert_eq!(reg.writes(), 0);
    }

    #[test]
    fn test_cap_value_cleared() {
        let reg = MemoryRegistry::new(RootKey::CurrentUser, SUBKEY)
            .with_value(VALUE, Payload::Dword(90));
        let outcome = execute(&reg, &value_ref(VALUE), 0).unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.modified, Some(Payload::Dword(0)));
    }

    #[test]
    fn test_idempotent_across_runs() {
        let reg = MemoryRegistry::new(RootKey::CurrentUser, SUBKEY)
            .with_value(VALUE, Payload::Dword(120));
        assert!(execute(&reg, &value_ref(VALUE), 0).unwrap().changed);
        assert!(!execute(&reg, &value_ref(VALUE), 0).unwrap().changed);
        assert_eq!(reg.writes(), 1);
        assert_eq!(reg.get(VALUE), Some(Payload::Dword(0)));
    }

    #[test]
    fn test_missing_value_is_read_failure() {
        let reg = MemoryRegistry::new(RootKey::CurrentUser, SUBKEY);
        let err = execute(&reg, &value_ref(ENABLE), 1).unwrap_err();
        assert!(matches!(err, PatchError::ReadFailure { .. }));
    }

    #[test]
    fn test_denied_write_is_permission_denied() {
        let reg = MemoryRegistry::new(RootKey::CurrentUser, SUBKEY)
            .with_value(ENABLE, Payload::Dword(0))
            .deny_writes();
        let err = execute(&reg, &value_ref(ENABLE), 1).unwrap_err();
        assert!(matches!(err, PatchError::PermissionDenied { .. }));
    }
}
