//! LocalStorage access
//!
//! Values are stored as JSON strings. Native builds have no storage and the
//! helpers quietly report nothing saved.

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Read and decode `key`. Missing or corrupt values come back as `None`.
#[cfg(target_arch = "wasm32")]
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = local_storage()?.get_item(key).ok().flatten()?;
    decode(key, &json)
}

/// Encode and write `key`. Returns whether the write went through.
#[cfg(target_arch = "wasm32")]
pub fn save_json<T: Serialize>(key: &str, value: &T) -> bool {
    let Some(json) = encode(key, value) else {
        return false;
    };
    match local_storage() {
        Some(storage) => match storage.set_item(key, &json) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to write {}: {:?}", key, e);
                false
            }
        },
        None => {
            log::warn!("LocalStorage unavailable; {} not saved", key);
            false
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load_json<T: DeserializeOwned>(_key: &str) -> Option<T> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_json<T: Serialize>(key: &str, value: &T) -> bool {
    // Still encode so bad values show up in native runs
    encode(key, value);
    false
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn decode<T: DeserializeOwned>(key: &str, json: &str) -> Option<T> {
    match serde_json::from_str(json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring corrupt {} ({})", key, e);
            None
        }
    }
}

pub(crate) fn encode<T: Serialize>(key: &str, value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(json) => Some(json),
        Err(e) => {
            log::warn!("Failed to encode {}: {}", key, e);
            None
        }
    }
}
