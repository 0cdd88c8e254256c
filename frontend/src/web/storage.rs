//! LocalStorage wrapper.

use crate::session::TokenStore;

/// Browser LocalStorage access.
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// `None` if the key does not exist or storage is unavailable.
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// Returns whether the write succeeded.
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// Returns whether the delete succeeded.
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// Durable storage adapter the session core is injected with.
pub struct BrowserTokenStore;

impl TokenStore for BrowserTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::get(key)
    }

    fn set(&self, key: &str, value: &str) {
        LocalStorage::set(key, value);
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}
