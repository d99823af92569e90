//! Key/value storage backing settings and high scores
//!
//! LocalStorage on web. Natively there is no backing store: reads find
//! nothing and writes report failure, which callers treat as a no-op.

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Read and decode a JSON value stored under `key`
#[cfg(target_arch = "wasm32")]
pub fn read_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = local_storage()?.get_item(key).ok().flatten()?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding unreadable '{}' entry: {}", key, e);
            None
        }
    }
}

/// Encode `value` as JSON and store it under `key`. Returns false if nothing was written.
#[cfg(target_arch = "wasm32")]
pub fn write_json<T: Serialize>(key: &str, value: &T) -> bool {
    let Some(storage) = local_storage() else {
        log::warn!("LocalStorage unavailable, '{}' not saved", key);
        return false;
    };
    match serde_json::to_string(value) {
        Ok(json) => storage.set_item(key, &json).is_ok(),
        Err(e) => {
            log::warn!("Failed to encode '{}': {}", key, e);
            false
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn read_json<T: DeserializeOwned>(_key: &str) -> Option<T> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn write_json<T: Serialize>(key: &str, _value: &T) -> bool {
    log::debug!("No native storage, '{}' not saved", key);
    false
}
