//! `RegistryAccess` implementation over the Win32 registry API.
//!
//! Keys are opened per call and closed by a guard on every path, including
//! errors. Reads of an absent value surface as `Ok(None)`; access-denied
//! statuses map to `AccessError::PermissionDenied` so strategies can
//! classify them.

use super::encode_wide;
use regpatch::{AccessError, RegistryAccess, RegistryValueRef, RootKey};
use std::ptr;
use windows_sys::Win32::Foundation::{
    ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, ERROR_NO_MORE_ITEMS, ERROR_SUCCESS,
};
use windows_sys::Win32::System::Registry::{
    RegCloseKey, RegEnumValueW, RegOpenKeyExW, RegQueryValueExW, RegSetValueExW, HKEY,
    HKEY_CLASSES_ROOT, HKEY_CURRENT_CONFIG, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, HKEY_USERS,
    KEY_QUERY_VALUE, KEY_READ, KEY_SET_VALUE, KEY_WRITE, REG_BINARY, REG_DWORD,
};

// Longest value name the registry allows, in UTF-16 units.
const MAX_VALUE_NAME: usize = 16384;

/// Closes the key when it goes out of scope, on success and error paths alike.
struct OwnedKey(HKEY);

impl Drop for OwnedKey {
    fn drop(&mut self) {
        unsafe {
            RegCloseKey(self.0);
        }
    }
}

fn hive(root: RootKey) -> HKEY {
    match root {
        RootKey::CurrentUser => HKEY_CURRENT_USER,
        RootKey::LocalMachine => HKEY_LOCAL_MACHINE,
        RootKey::ClassesRoot => HKEY_CLASSES_ROOT,
        RootKey::Users => HKEY_USERS,
        RootKey::CurrentConfig => HKEY_CURRENT_CONFIG,
    }
}

fn map_status(status: u32) -> Result<(), AccessError> {
    match status {
        ERROR_SUCCESS => Ok(()),
        ERROR_FILE_NOT_FOUND => Err(AccessError::NotFound),
        ERROR_ACCESS_DENIED => Err(AccessError::PermissionDenied),
        code => Err(AccessError::os(code, "registry call failed")),
    }
}

fn open(root: RootKey, subkey: &str, sam: u32) -> Result<OwnedKey, AccessError> {
    let wide = encode_wide(subkey);
    let mut hkey: HKEY = ptr::null_mut();
    let status = unsafe { RegOpenKeyExW(hive(root), wide.as_ptr(), 0, sam, &mut hkey) };
    map_status(status)?;
    Ok(OwnedKey(hkey))
}

/// Live Windows registry accessor.
pub struct WinRegistry;

impl RegistryAccess for WinRegistry {
    fn open_key(&self, root: RootKey, subkey: &str) -> Result<(), AccessError> {
        open(root, subkey, KEY_READ | KEY_WRITE).map(|_| ())
    }

    fn enum_value_name(
        &self,
        root: RootKey,
        subkey: &str,
        index: u32,
    ) -> Result<Option<String>, AccessError> {
        let key = open(root, subkey, KEY_QUERY_VALUE)?;
        let mut name = vec![0u16; MAX_VALUE_NAME];
        let mut name_len = name.len() as u32;
        let status = unsafe {
            RegEnumValueW(
                key.0,
                index,
                name.as_mut_ptr(),
                &mut name_len,
                ptr::null(),
                ptr::null_mut(),
                ptr::null_mut(),
                ptr::null_mut(),
            )
        };
        if status == ERROR_NO_MORE_ITEMS {
            return Ok(None);
        }
        map_status(status)?;
        Ok(Some(String::from_utf16_lossy(&name[..name_len as usize])))
    }

    fn read_binary(&self, key: &RegistryValueRef) -> Result<Option<Vec<u8>>, AccessError> {
        let opened = open(key.root, &key.subkey, KEY_QUERY_VALUE)?;
        let name = encode_wide(&key.name);

        // First call sizes the payload, second fills it.
        let mut size = 0u32;
        let status = unsafe {
            RegQueryValueExW(
                opened.0,
                name.as_ptr(),
                ptr::null(),
                ptr::null_mut(),
                ptr::null_mut(),
                &mut size,
            )
        };
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        map_status(status)?;

        let mut data = vec![0u8; size as usize];
        let data_ptr = if data.is_empty() {
            ptr::null_mut()
        } else {
            data.as_mut_ptr()
        };
        let status = unsafe {
            RegQueryValueExW(
                opened.0,
                name.as_ptr(),
                ptr::null(),
                ptr::null_mut(),
                data_ptr,
                &mut size,
            )
        };
        map_status(status)?;
        data.truncate(size as usize);
        Ok(Some(data))
    }

    fn write_binary(&self, key: &RegistryValueRef, data: &[u8]) -> Result<(), AccessError> {
        let opened = open(key.root, &key.subkey, KEY_SET_VALUE)?;
        let name = encode_wide(&key.name);
        let status = unsafe {
            RegSetValueExW(
                opened.0,
                name.as_ptr(),
                0,
                REG_BINARY,
                data.as_ptr(),
                data.len() as u32,
            )
        };
        map_status(status)
    }

    fn read_dword(&self, key: &RegistryValueRef) -> Result<Option<u32>, AccessError> {
        let opened = open(key.root, &key.subkey, KEY_QUERY_VALUE)?;
        let name = encode_wide(&key.name);
        let mut value = 0u32;
        let mut size = std::mem::size_of::<u32>() as u32;
        let mut value_type = 0u32;
        let status = unsafe {
            RegQueryValueExW(
                opened.0,
                name.as_ptr(),
                ptr::null(),
                &mut value_type,
                &mut value as *mut u32 as *mut u8,
                &mut size,
            )
        };
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        map_status(status)?;
        if value_type != REG_DWORD || size != std::mem::size_of::<u32>() as u32 {
            // Present but not a DWORD: the typed read treats it as absent.
            return Ok(None);
        }
        Ok(Some(value))
    }

    fn write_dword(&self, key: &RegistryValueRef, value: u32) -> Result<(), AccessError> {
        let opened = open(key.root, &key.subkey, KEY_SET_VALUE)?;
        let name = encode_wide(&key.name);
        let status = unsafe {
            RegSetValueExW(
                opened.0,
                name.as_ptr(),
                0,
                REG_DWORD,
                &value as *const u32 as *const u8,
                std::mem::size_of::<u32>() as u32,
            )
        };
        map_status(status)
    }
}
