use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

/// Storage key for the bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key for the API key
pub const API_KEY_KEY: &str = "apiKey";

/// Storage key for the logged-in profile name
pub const USER_KEY: &str = "user";

/// Persistent key/value store for credentials.
///
/// Each key is kept as its own JSON document under the store directory and
/// survives between runs. Values are serialized as plain JSON strings on
/// write; older installs that double-encoded values (a token stored with
/// wrapping quote characters) are normalized on read, so no consumer needs
/// defensive parsing.
///
/// There is no expiry tracking. Whether a stored token is still valid is
/// decided solely by the remote API's response status.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create credential directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub(crate) fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn save(&self, key: &str, value: &str) -> Result<()> {
        let contents = serde_json::to_string(value)?;
        std::fs::write(self.entry_path(key), contents)
            .with_context(|| format!("Failed to persist credential: {}", key))?;
        Ok(())
    }

    /// Read a stored value. Missing or corrupt entries return `None` rather
    /// than failing the caller.
    pub fn get(&self, key: &str) -> Option<String> {
        let raw = std::fs::read_to_string(self.entry_path(key)).ok()?;
        match serde_json::from_str::<String>(&raw) {
            Ok(value) => {
                // Legacy double-encoded entries still carry quote characters
                // inside the decoded string. Strip them here, once.
                let normalized = value.trim().trim_matches('"');
                if normalized.is_empty() {
                    None
                } else {
                    Some(normalized.to_string())
                }
            }
            Err(err) => {
                debug!(key, error = %err, "Ignoring corrupt credential entry");
                None
            }
        }
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove credential: {}", key))?;
        }
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY)
    }

    pub fn api_key(&self) -> Option<String> {
        self.get(API_KEY_KEY)
    }

    pub fn user_name(&self) -> Option<String> {
        self.get(USER_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some() && self.api_key().is_some()
    }

    /// Remove all stored credentials (logout).
    pub fn clear(&self) -> Result<()> {
        for key in [TOKEN_KEY, API_KEY_KEY, USER_KEY] {
            self.remove(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, CredentialStore) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = CredentialStore::new(dir.path().to_path_buf()).expect("Failed to create store");
        (dir, store)
    }

    #[test]
    fn test_round_trip() {
        let (_dir, store) = store();
        store.save(TOKEN_KEY, "abc").unwrap();
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));

        store.remove(TOKEN_KEY).unwrap();
        assert_eq!(store.get(TOKEN_KEY), None);
    }

    #[test]
    fn test_missing_key_returns_none() {
        let (_dir, store) = store();
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_corrupt_entry_returns_none() {
        let (_dir, store) = store();
        std::fs::write(store.entry_path(TOKEN_KEY), "{not json").unwrap();
        assert_eq!(store.get(TOKEN_KEY), None);
    }

    #[test]
    fn test_legacy_double_encoded_value_is_normalized() {
        let (_dir, store) = store();
        // A token that was JSON-stringified twice: the file holds the JSON
        // encoding of the string "\"abc123\"".
        std::fs::write(store.entry_path(TOKEN_KEY), r#""\"abc123\"""#).unwrap();
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, store) = store();
        assert!(store.remove(TOKEN_KEY).is_ok());
        assert!(store.remove(TOKEN_KEY).is_ok());
    }

    #[test]
    fn test_clear_removes_everything() {
        let (_dir, store) = store();
        store.save(TOKEN_KEY, "t").unwrap();
        store.save(API_KEY_KEY, "k").unwrap();
        store.save(USER_KEY, "alice").unwrap();
        assert!(store.is_authenticated());

        store.clear().unwrap();
        assert_eq!(store.token(), None);
        assert_eq!(store.api_key(), None);
        assert_eq!(store.user_name(), None);
        assert!(!store.is_authenticated());
    }
}
