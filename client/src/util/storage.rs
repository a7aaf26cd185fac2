//! Browser storage helpers for persisted credentials and preferences.
//!
//! SYSTEM CONTEXT
//! ==============
//! These helpers centralize hydrate-only read/write behavior so the gateway
//! and theme code can persist values without repeating web-sys glue. Outside
//! the browser every read misses and every write is dropped.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Which browser storage area to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageArea {
    /// `localStorage`; survives browser restarts.
    Local,
    /// `sessionStorage`; cleared when the browser session ends.
    Session,
}

#[cfg(feature = "hydrate")]
fn storage(area: StorageArea) -> Option<web_sys::Storage> {
    let window = web_sys::window()?;
    match area {
        StorageArea::Local => window.local_storage().ok().flatten(),
        StorageArea::Session => window.session_storage().ok().flatten(),
    }
}

/// Load a raw string for `key`.
pub fn load_raw(area: StorageArea, key: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        storage(area)?.get_item(key).ok().flatten()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (area, key);
        None
    }
}

/// Save a raw string for `key`.
pub fn save_raw(area: StorageArea, key: &str, value: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = storage(area) {
            let _ = storage.set_item(key, value);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (area, key, value);
    }
}

/// Load a JSON value for `key`. Unparseable entries read as missing.
pub fn load_json<T: DeserializeOwned>(area: StorageArea, key: &str) -> Option<T> {
    let raw = load_raw(area, key)?;
    serde_json::from_str(&raw).ok()
}

/// Save a JSON value for `key`.
pub fn save_json<T: Serialize>(area: StorageArea, key: &str, value: &T) {
    let Ok(raw) = serde_json::to_string(value) else {
        return;
    };
    save_raw(area, key, &raw);
}

/// Remove `key` from the given area.
pub fn remove(area: StorageArea, key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = storage(area) {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (area, key);
    }
}
