//! Local key/value persistence.
//!
//! The browser build of TodoHub kept its session in localStorage; this
//! module provides the same surface for every platform we ship on:
//! - file-backed storage on native targets
//! - an in-memory map on wasm

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

#[cfg(not(target_arch = "wasm32"))]
use std::{fs, path::PathBuf};

/// In-memory storage for WASM, file-based for native
#[allow(dead_code)]
static LOCAL_STORAGE: Lazy<Mutex<HashMap<String, HashMap<String, String>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Get the storage directory for a namespace
#[cfg(not(target_arch = "wasm32"))]
fn get_storage_dir(namespace: &str) -> PathBuf {
    let safe_ns = sanitize_namespace(namespace);

    if let Some(data_dir) = dirs::data_local_dir() {
        return data_dir.join("todohub").join(safe_ns);
    }

    PathBuf::from("cache").join("storage").join(safe_ns)
}

/// Sanitize a namespace for filesystem use
fn sanitize_namespace(namespace: &str) -> String {
    namespace
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Get a value from namespaced storage
#[cfg(not(target_arch = "wasm32"))]
pub fn storage_get(namespace: &str, key: &str) -> Option<String> {
    let storage_dir = get_storage_dir(namespace);
    let file_path = storage_dir.join(format!("{}.json", sanitize_key(key)));
    fs::read_to_string(file_path).ok()
}

#[cfg(target_arch = "wasm32")]
pub fn storage_get(namespace: &str, key: &str) -> Option<String> {
    let storage = LOCAL_STORAGE.lock().ok()?;
    storage.get(namespace)?.get(key).cloned()
}

/// Set a value in namespaced storage
#[cfg(not(target_arch = "wasm32"))]
pub fn storage_set(namespace: &str, key: &str, value: &str) -> Result<(), String> {
    let storage_dir = get_storage_dir(namespace);
    fs::create_dir_all(&storage_dir)
        .map_err(|e| format!("Failed to create storage directory: {}", e))?;
    let file_path = storage_dir.join(format!("{}.json", sanitize_key(key)));
    fs::write(file_path, value).map_err(|e| format!("Failed to write to storage: {}", e))
}

#[cfg(target_arch = "wasm32")]
pub fn storage_set(namespace: &str, key: &str, value: &str) -> Result<(), String> {
    let mut storage = LOCAL_STORAGE.lock().map_err(|e| e.to_string())?;
    let entries = storage.entry(namespace.to_string()).or_default();
    entries.insert(key.to_string(), value.to_string());
    Ok(())
}

/// Delete a value from namespaced storage
#[cfg(not(target_arch = "wasm32"))]
pub fn storage_delete(namespace: &str, key: &str) -> Result<(), String> {
    let storage_dir = get_storage_dir(namespace);
    let file_path = storage_dir.join(format!("{}.json", sanitize_key(key)));
    if file_path.exists() {
        fs::remove_file(file_path).map_err(|e| format!("Failed to delete from storage: {}", e))?;
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub fn storage_delete(namespace: &str, key: &str) -> Result<(), String> {
    let mut storage = LOCAL_STORAGE.lock().map_err(|e| e.to_string())?;
    if let Some(entries) = storage.get_mut(namespace) {
        entries.remove(key);
    }
    Ok(())
}

/// List all keys in a namespace
#[cfg(not(target_arch = "wasm32"))]
pub fn storage_keys(namespace: &str) -> Vec<String> {
    let storage_dir = get_storage_dir(namespace);
    if !storage_dir.exists() {
        return Vec::new();
    }
    fs::read_dir(storage_dir)
        .ok()
        .map(|entries| {
            entries
                .flatten()
                .filter_map(|entry| {
                    let path = entry.path();
                    if path.extension().and_then(|e| e.to_str()) == Some("json") {
                        path.file_stem()
                            .and_then(|s| s.to_str())
                            .map(|s| s.to_string())
                    } else {
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
pub fn storage_keys(namespace: &str) -> Vec<String> {
    LOCAL_STORAGE
        .lock()
        .ok()
        .and_then(|storage| storage.get(namespace).map(|s| s.keys().cloned().collect()))
        .unwrap_or_default()
}

/// Clear an entire namespace
#[cfg(not(target_arch = "wasm32"))]
pub fn storage_clear(namespace: &str) -> Result<(), String> {
    let storage_dir = get_storage_dir(namespace);
    if storage_dir.exists() {
        fs::remove_dir_all(&storage_dir).map_err(|e| format!("Failed to clear storage: {}", e))?;
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub fn storage_clear(namespace: &str) -> Result<(), String> {
    let mut storage = LOCAL_STORAGE.lock().map_err(|e| e.to_string())?;
    storage.remove(namespace);
    Ok(())
}

/// Sanitize storage key for filesystem use
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_namespace() {
        assert_eq!(sanitize_namespace("session"), "session");
        assert_eq!(sanitize_namespace("my session!"), "my_session_");
        assert_eq!(sanitize_namespace("/path/to/file"), "_path_to_file");
    }

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("auth_token"), "auth_token");
        assert_eq!(sanitize_key("user:preferences"), "user_preferences");
    }
}
