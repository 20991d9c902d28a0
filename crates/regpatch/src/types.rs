//! Core data model: value references, payloads, and patch outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Registry root hive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RootKey {
    CurrentUser,
    LocalMachine,
    ClassesRoot,
    Users,
    CurrentConfig,
}

impl RootKey {
    /// Canonical `HKEY_*` name, as rendered in registry paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            RootKey::CurrentUser => "HKEY_CURRENT_USER",
            RootKey::LocalMachine => "HKEY_LOCAL_MACHINE",
            RootKey::ClassesRoot => "HKEY_CLASSES_ROOT",
            RootKey::Users => "HKEY_USERS",
            RootKey::CurrentConfig => "HKEY_CURRENT_CONFIG",
        }
    }
}

impl fmt::Display for RootKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one named registry value. Immutable once constructed;
/// used as the key for every read and write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryValueRef {
    pub root: RootKey,
    pub subkey: String,
    pub name: String,
}

impl RegistryValueRef {
    pub fn new(root: RootKey, subkey: impl Into<String>, name: impl Into<String>) -> Self {
        RegistryValueRef {
            root,
            subkey: subkey.into(),
            name: name.into(),
        }
    }

    /// Full path of the containing key, without the value name.
    pub fn key_path(&self) -> String {
        format!("{}\\{}", self.root, self.subkey)
    }
}

impl fmt::Display for RegistryValueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\\{}\\{}", self.root, self.subkey, self.name)
    }
}

/// Raw content of one value, exactly as persisted: an opaque byte blob
/// for `REG_BINARY` values or a 32-bit unsigned integer for `REG_DWORD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    Binary(Vec<u8>),
    Dword(u32),
}

impl Payload {
    /// Human rendering: space-separated hex bytes for binary, decimal for DWORD.
    pub fn render(&self) -> String {
        match self {
            Payload::Binary(bytes) => bytes
                .iter()
                .map(|b| format!("{:02X}", b))
                .collect::<Vec<_>>()
                .join(" "),
            Payload::Dword(v) => v.to_string(),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Result of running one strategy against one value.
///
/// `changed == false` guarantees `modified == None` and that no write was
/// issued; re-running a scan on an already-patched system performs zero
/// writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchOutcome {
    pub key: RegistryValueRef,
    pub original: Payload,
    pub modified: Option<Payload>,
    pub changed: bool,
    pub succeeded: bool,
}

impl PatchOutcome {
    /// Outcome for a value already in the desired state.
    pub fn unchanged(key: RegistryValueRef, original: Payload) -> Self {
        PatchOutcome {
            key,
            original,
            modified: None,
            changed: false,
            succeeded: true,
        }
    }

    /// Outcome for a value that was rewritten.
    pub fn patched(key: RegistryValueRef, original: Payload, modified: Payload) -> Self {
        PatchOutcome {
            key,
            original,
            modified: Some(modified),
            changed: true,
            succeeded: true,
        }
    }
}
