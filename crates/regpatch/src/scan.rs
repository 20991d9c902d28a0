//! Scan dispatcher: enumerate, classify, patch.
//!
//! One invocation runs one operation family over every value under the
//! target key: open the key once (fail fast if the subtree is absent), walk
//! values by ordinal index until the OS signals exhaustion, classify each
//! name, and dispatch the matching strategy. A strategy failure is recorded
//! and the walk continues; an enumeration-level OS error aborts the scan.
//!
//! Index-based enumeration is safe against our own writes: a patch rewrites
//! a value's payload in place and never adds or removes a name, so index
//! positions are stable for the duration of a pass.

use crate::access::{AccessError, RegistryAccess};
use crate::classify::{classify, Category};
use crate::error::{PatchError, PatchResult};
use crate::strategy::Strategy;
use crate::types::{PatchOutcome, RegistryValueRef, RootKey};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Operation family selected by the caller for one run. Never more than one
/// family per invocation; "run everything" is sequencing at the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Zero out aim-smoothing: patch every sensitivity blob.
    Sensitivity,
    /// Remove the frame-rate cap: enable flag to 1, cap value to 0.
    FrameRateUnlock,
    /// Widen the weapon FOV byte to `fov` (must be within `0..=255`).
    FieldOfViewUnlock { fov: u32 },
}

impl Operation {
    /// The strategy to run for a classified name, or `None` when the
    /// category does not belong to this operation family.
    fn strategy_for(&self, category: Category) -> Option<Strategy> {
        match (self, category) {
            (Operation::Sensitivity, Category::Sensitivity) => Some(Strategy::SensitivityZero),
            (Operation::FrameRateUnlock, Category::FrameRateEnable) => {
                Some(Strategy::FrameRateEnable)
            }
            (Operation::FrameRateUnlock, Category::FrameRateValue) => {
                Some(Strategy::FrameRateValue)
            }
            (Operation::FieldOfViewUnlock { fov }, Category::FieldOfView) => {
                Some(Strategy::FieldOfView { fov: *fov as u8 })
            }
            _ => None,
        }
    }

    /// Reject out-of-range parameters before any registry access happens.
    fn validate(&self) -> PatchResult<()> {
        match self {
            Operation::FieldOfViewUnlock { fov } if *fov > u8::MAX as u32 => {
                Err(PatchError::InvalidParameter(format!(
                    "FOV value {fov} is outside 0-255"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// A per-value strategy failure, recorded without aborting the scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanFailure {
    pub key: RegistryValueRef,
    pub error: String,
}

/// Aggregated result of one scan pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Full path of the scanned key.
    pub path: String,
    pub outcomes: Vec<PatchOutcome>,
    pub failures: Vec<ScanFailure>,
}

impl ScanReport {
    /// Number of values actually rewritten.
    pub fn changed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.changed).count()
    }
}

/// Ties enumeration, classification, and strategies together over one
/// accessor and one target key. Constructed explicitly by the caller and
/// passed down by parameter; holds no global state.
pub struct ScanDispatcher<'a> {
    access: &'a dyn RegistryAccess,
    root: RootKey,
    subkey: String,
}

impl<'a> ScanDispatcher<'a> {
    pub fn new(access: &'a dyn RegistryAccess, root: RootKey, subkey: impl Into<String>) -> Self {
        ScanDispatcher {
            access,
            root,
            subkey: subkey.into(),
        }
    }

    fn key_path(&self) -> String {
        format!("{}\\{}", self.root, self.subkey)
    }

    /// Run one operation family over every value under the target key.
    pub fn run(&self, op: &Operation) -> PatchResult<ScanReport> {
        op.validate()?;

        let path = self.key_path();
        self.access
            .open_key(self.root, &self.subkey)
            .map_err(|e| match e {
                AccessError::NotFound => PatchError::KeyNotFound(path.clone()),
                AccessError::PermissionDenied => PatchError::PermissionDenied {
                    target: path.clone(),
                    msg: "open with read+write access rejected".to_string(),
                },
                other => PatchError::EnumerationFailed {
                    path: path.clone(),
                    index: 0,
                    msg: format!("key open failed: {other}"),
                },
            })?;
        info!("opened registry path {}", path);

        let mut report = ScanReport {
            path: path.clone(),
            outcomes: Vec::new(),
            failures: Vec::new(),
        };

        let mut index = 0u32;
        loop {
            let name = match self.access.enum_value_name(self.root, &self.subkey, index) {
                Ok(Some(name)) => name,
                // End of enumeration is normal termination.
                Ok(None) => break,
                Err(e) => {
                    return Err(PatchError::EnumerationFailed {
                        path,
                        index,
                        msg: e.to_string(),
                    });
                }
            };
            index += 1;

            let category = classify(&name);
            let Some(strategy) = op.strategy_for(category) else {
                debug!("skipping {} ({:?})", name, category);
                continue;
            };

            let key = RegistryValueRef::new(self.root, self.subkey.clone(), &name);
            match strategy.execute(self.access, &key) {
                Ok(outcome) => report.outcomes.push(outcome),
                // One bad entry must not abort the remaining pass.
                Err(e) => {
                    warn!("{}: {}", key, e);
                    report.failures.push(ScanFailure {
                        key,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            "scan complete: {} processed, {} changed, {} failed",
            report.outcomes.len(),
            report.changed_count(),
            report.failures.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::fake::MemoryRegistry;
    use crate::types::Payload;

    const SUBKEY: &str = r"SOFTWARE\Tencent\Call-of-Duty";

    fn populated() -> MemoryRegistry {
        MemoryRegistry::new(RootKey::CurrentUser, SUBKEY)
            .with_value("CODM_1_iMSDK_CN_PVE_h99", Payload::Binary(vec![0x00, 0xAA, 0xBB]))
            .with_value("CODM_1_iMSDK_CN_PVP_h100", Payload::Binary(vec![0x01, 0xAA, 0xBB]))
            .with_value("CODM_1_iMSDK_CN_EnableFramerateCustomize_h42", Payload::Dword(0))
            .with_value("CODM_1_iMSDK_CN_FramerateCustomizeValue_h43", Payload::Dword(90))
            .with_value(
                "CODM_1_iMSDK_CN_BrWeaponFov_h7",
                Payload::Binary(vec![0, 0, 0, 0, 0, 0, 0x5A, 0x17]),
            )
            .with_value("UnrelatedValue", Payload::Dword(7))
    }

    #[test]
    fn test_sensitivity_scan_patches_and_skips() {
        let reg = populated();
        let dispatcher = ScanDispatcher::new(&reg, RootKey::CurrentUser, SUBKEY);
        let report = dispatcher.run(&Operation::Sensitivity).unwrap();

        // Two sensitivity values processed, one rewritten.
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.changed_count(), 1);
        assert!(report.failures.is_empty());
        assert_eq!(
            reg.get("CODM_1_iMSDK_CN_PVE_h99"),
            Some(Payload::Binary(vec![0x01, 0xAA, 0xBB]))
        );
        // Values of other families are untouched.
        assert_eq!(
            reg.get("CODM_1_iMSDK_CN_EnableFramerateCustomize_h42"),
            Some(Payload::Dword(0))
        );
        assert_eq!(reg.get("UnrelatedValue"), Some(Payload::Dword(7)));
    }

    #[test]
    fn test_framerate_scan_covers_both_variants() {
        let reg = populated();
        let dispatcher = ScanDispatcher::new(&reg, RootKey::CurrentUser, SUBKEY);
        let report = dispatcher.run(&Operation::FrameRateUnlock).unwrap();

        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.changed_count(), 2);
        assert_eq!(
            reg.get("CODM_1_iMSDK_CN_EnableFramerateCustomize_h42"),
            Some(Payload::Dword(1))
        );
        assert_eq!(
            reg.get("CODM_1_iMSDK_CN_FramerateCustomizeValue_h43"),
            Some(Payload::Dword(0))
        );
    }

    #[test]
    fn test_fov_scan_rewrites_offset_six() {
        let reg = populated();
        let dispatcher = ScanDispatcher::new(&reg, RootKey::CurrentUser, SUBKEY);
        let report = dispatcher
            .run(&Operation::FieldOfViewUnlock { fov: 0xFF })
            .unwrap();

        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.changed_count(), 1);
        assert_eq!(
            reg.get("CODM_1_iMSDK_CN_BrWeaponFov_h7"),
            Some(Payload::Binary(vec![0, 0, 0, 0, 0, 0, 0xFF, 0x17]))
        );
    }

    #[test]
    fn test_rescan_performs_zero_writes() {
        let reg = populated();
        let dispatcher = ScanDispatcher::new(&reg, RootKey::CurrentUser, SUBKEY);
        dispatcher.run(&Operation::Sensitivity).unwrap();
        dispatcher.run(&Operation::FrameRateUnlock).unwrap();
        dispatcher
            .run(&Operation::FieldOfViewUnlock { fov: 0xFF })
            .unwrap();
        let writes_after_first_pass = reg.writes();

        let second = dispatcher.run(&Operation::Sensitivity).unwrap();
        assert_eq!(second.changed_count(), 0);
        dispatcher.run(&Operation::FrameRateUnlock).unwrap();
        dispatcher
            .run(&Operation::FieldOfViewUnlock { fov: 0xFF })
            .unwrap();
        assert_eq!(reg.writes(), writes_after_first_pass);
    }

    #[test]
    fn test_strategy_failure_does_not_abort_scan() {
        let reg = MemoryRegistry::new(RootKey::CurrentUser, SUBKEY)
            // Too short for the FOV layout: fails, loudly.
            .with_value("CODM_1_iMSDK_CN_BrWeaponFov_h7", Payload::Binary(vec![0, 0, 0]))
            .with_value(
                "CODM_1_iMSDK_CN_MPWeaponFov_h8",
                Payload::Binary(vec![0, 0, 0, 0, 0, 0, 0x40]),
            );
        let dispatcher = ScanDispatcher::new(&reg, RootKey::CurrentUser, SUBKEY);
        let report = dispatcher
            .run(&Operation::FieldOfViewUnlock { fov: 0x68 })
            .unwrap();

        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].error.contains("at least 7 bytes"));
        assert!(report.failures[0].key.to_string().contains("BrWeaponFov"));
        // The healthy value after the bad one was still processed.
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(
            reg.get("CODM_1_iMSDK_CN_MPWeaponFov_h8"),
            Some(Payload::Binary(vec![0, 0, 0, 0, 0, 0, 0x68]))
        );
    }

    #[test]
    fn test_enumeration_error_aborts() {
        let reg = populated().fail_enumeration_at(2);
        let dispatcher = ScanDispatcher::new(&reg, RootKey::CurrentUser, SUBKEY);
        let err = dispatcher.run(&Operation::Sensitivity).unwrap_err();
        assert!(matches!(err, PatchError::EnumerationFailed { index: 2, .. }));
    }

    #[test]
    fn test_missing_key_fails_fast() {
        let reg = MemoryRegistry::new(RootKey::CurrentUser, SUBKEY);
        let dispatcher = ScanDispatcher::new(&reg, RootKey::CurrentUser, r"SOFTWARE\Nope");
        let err = dispatcher.run(&Operation::Sensitivity).unwrap_err();
        match err {
            PatchError::KeyNotFound(path) => {
                assert_eq!(path, r"HKEY_CURRENT_USER\SOFTWARE\Nope");
            }
            other => panic!("expected KeyNotFound, got {other}"),
        }
    }

    #[test]
    fn test_fov_out_of_range_rejected_before_any_access() {
        let reg = populated();
        let dispatcher = ScanDispatcher::new(&reg, RootKey::CurrentUser, SUBKEY);
        let err = dispatcher
            .run(&Operation::FieldOfViewUnlock { fov: 300 })
            .unwrap_err();
        assert!(matches!(err, PatchError::InvalidParameter(_)));
        assert_eq!(reg.reads(), 0);
        assert_eq!(reg.writes(), 0);
    }

    #[test]
    fn test_empty_key_yields_empty_report() {
        let reg = MemoryRegistry::new(RootKey::CurrentUser, SUBKEY);
        let dispatcher = ScanDispatcher::new(&reg, RootKey::CurrentUser, SUBKEY);
        let report = dispatcher.run(&Operation::Sensitivity).unwrap();
        assert!(report.outcomes.is_empty());
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_report_serializes() {
        let reg = populated();
        let dispatcher = ScanDispatcher::new(&reg, RootKey::CurrentUser, SUBKEY);
        let report = dispatcher.run(&Operation::FrameRateUnlock).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("EnableFramerateCustomize"));
        assert!(json.contains("\"changed\":true"));
        let back: ScanReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.outcomes.len(), report.outcomes.len());
    }
}
