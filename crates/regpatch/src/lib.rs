//! Registry-entry classification-and-patch engine for CODM client settings.
//!
//! CODM's Chinese client persists per-user tuning values under a single
//! registry subtree, named `CODM_<n>_iMSDK_CN_<keywords>_h<hash>`. This
//! crate locates those entries and rewrites a subset of them to force
//! specific in-game behaviors:
//!
//! - zero out aim smoothing (flag byte in the sensitivity blobs),
//! - remove the frame-rate cap (a DWORD enable flag plus a DWORD cap value),
//! - widen the weapon field-of-view byte.
//!
//! Patches are minimally invasive: only the bytes a strategy owns change,
//! everything else in a payload is copied through untouched, and a value
//! already in the desired state is never rewritten (re-running a scan on a
//! patched system performs zero writes).
//!
//! All OS access goes through the [`RegistryAccess`] trait, so the engine
//! carries no Windows dependency and is fully testable in memory. The
//! `tactix` binary provides the `windows-sys` implementation plus the CLI.

pub mod access;
pub mod classify;
pub mod error;
pub mod scan;
pub mod strategy;
pub mod types;

// Re-export key types at crate root.
pub use access::{AccessError, RegistryAccess};
pub use classify::{classify, Category};
pub use error::{PatchError, PatchResult};
pub use scan::{Operation, ScanDispatcher, ScanFailure, ScanReport};
pub use strategy::{Strategy, MIN_FOV_PAYLOAD_LEN};
pub use types::{PatchOutcome, Payload, RegistryValueRef, RootKey};
