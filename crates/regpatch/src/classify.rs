//! Value-name classification.
//!
//! CODM persists its per-user settings as values named
//! `CODM_<n>_iMSDK_CN_<keywords>_h<hash>` under a single subtree. The
//! keyword section decides which patch strategy applies. The templates are
//! disjoint by construction, so matching is order-independent, and
//! classification is a pure, total function of the name string: anything
//! that matches no template is `Unclassified` and skipped.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Name category, one per patch strategy family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Per-mode aim sensitivity blob (PVE/PVP/TD/BR, firing variants,
    /// optional descriptor tail).
    Sensitivity,
    /// Custom frame-rate enable flag (DWORD).
    FrameRateEnable,
    /// Custom frame-rate cap value (DWORD).
    FrameRateValue,
    /// Weapon field-of-view blob (battle-royale or multiplayer).
    FieldOfView,
    /// No template matched; the dispatcher skips these silently.
    Unclassified,
}

static SENSITIVITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^CODM_\d+_iMSDK_CN_(?:PVE|PVP|TD|Br|PVEFiring|PVPFiring|TDFiring|BrFiring)(?:_(?:RotateSensitive|AimRotate|ReddotHolo|Sniper|Free|ACOG|[\dX]+|SkyVehicle|GroundVehicle|Vertical|Ult).*?)?_h\d+$",
    )
    .expect("sensitivity pattern")
});

static FRAMERATE_ENABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^CODM_\d+_iMSDK_CN_EnableFramerateCustomize_h\d+$")
        .expect("framerate enable pattern")
});

static FRAMERATE_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^CODM_\d+_iMSDK_CN_FramerateCustomizeValue_h\d+$")
        .expect("framerate value pattern")
});

static FIELD_OF_VIEW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^CODM_\d+_iMSDK_CN_(?:BrWeaponFov|MPWeaponFov)_h\d+$")
        .expect("field of view pattern")
});

/// Classify a value name. Same name always yields the same category,
/// independent of payload or prior state.
pub fn classify(name: &str) -> Category {
    if SENSITIVITY.is_match(name) {
        Category::Sensitivity
    } else if FRAMERATE_ENABLE.is_match(name) {
        Category::FrameRateEnable
    } else if FRAMERATE_VALUE.is_match(name) {
        Category::FrameRateValue
    } else if FIELD_OF_VIEW.is_match(name) {
        Category::FieldOfView
    } else {
        Category::Unclassified
    }
}
