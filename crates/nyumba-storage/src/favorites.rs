//! Favorite listings, persisted as a JSON array of ids under one key.

use tracing::{debug, warn};

use nyumba_core::error::Result;

use crate::kv::KeyValueStore;

pub const FAVORITES_KEY: &str = "favorites";

/// The set of favorited property ids. Read once on load; written on every
/// toggle.
pub struct FavoritesStore<S: KeyValueStore> {
    store: S,
    key: String,
    ids: Vec<String>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn load(store: S) -> Result<Self> {
        Self::load_with_key(store, FAVORITES_KEY)
    }

    /// Load from `key`. A stored value that is not a JSON string array is
    /// discarded with a warning.
    pub fn load_with_key(store: S, key: &str) -> Result<Self> {
        let ids = match store.get(key)? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => ids,
                Err(e) => {
                    warn!(key, error = %e, "Ignoring unreadable favorites");
                    Vec::new()
                }
            },
        };
        debug!(key, count = ids.len(), "Favorites loaded");

        Ok(Self {
            store,
            key: key.to_string(),
            ids,
        })
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|f| f == id)
    }

    /// Add or remove `id`, persist, and return whether it is now a favorite.
    ///
    /// On a write failure the in-memory set is left unchanged.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let mut next = self.ids.clone();
        let now_favorite = if let Some(pos) = next.iter().position(|f| f == id) {
            next.remove(pos);
            false
        } else {
            next.push(id.to_string());
            true
        };

        self.store.set(&self.key, &serde_json::to_string(&next)?)?;
        self.ids = next;
        debug!(id, now_favorite, "Favorite toggled");
        Ok(now_favorite)
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKeyValueStore;
    use nyumba_core::error::NyumbaError;

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _: &str) -> Result<Option<String>> {
            Ok(Some("[\"1\"]".to_string()))
        }
        fn set(&self, _: &str, _: &str) -> Result<()> {
            Err(NyumbaError::Storage("read-only".into()))
        }
    }

    #[test]
    fn test_empty_store_loads_empty() {
        let favorites = FavoritesStore::load(MemoryKeyValueStore::new()).unwrap();
        assert!(favorites.ids().is_empty());
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut favorites = FavoritesStore::load(MemoryKeyValueStore::new()).unwrap();
        assert!(favorites.toggle("2").unwrap());
        assert!(favorites.contains("2"));
        assert!(!favorites.toggle("2").unwrap());
        assert!(!favorites.contains("2"));
    }

    #[test]
    fn test_toggle_writes_json_array() {
        let kv = MemoryKeyValueStore::new();
        let mut favorites = FavoritesStore::load(kv.clone()).unwrap();
        favorites.toggle("1").unwrap();
        favorites.toggle("3").unwrap();
        assert_eq!(kv.get(FAVORITES_KEY).unwrap().as_deref(), Some(r#"["1","3"]"#));

        favorites.toggle("1").unwrap();
        assert_eq!(kv.get(FAVORITES_KEY).unwrap().as_deref(), Some(r#"["3"]"#));
    }

    #[test]
    fn test_reload_sees_previous_toggles() {
        let mut favorites = FavoritesStore::load(MemoryKeyValueStore::new()).unwrap();
        favorites.toggle("4").unwrap();
        let kv = favorites.into_inner();

        let reloaded = FavoritesStore::load(kv).unwrap();
        assert_eq!(reloaded.ids(), ["4".to_string()]);
    }

    #[test]
    fn test_custom_key() {
        let kv = MemoryKeyValueStore::new();
        let mut favorites = FavoritesStore::load_with_key(kv.clone(), "saved").unwrap();
        favorites.toggle("9").unwrap();
        assert!(kv.get(FAVORITES_KEY).unwrap().is_none());
        assert_eq!(kv.get("saved").unwrap().as_deref(), Some(r#"["9"]"#));
    }

    #[test]
    fn test_corrupt_value_treated_as_empty() {
        let kv = MemoryKeyValueStore::new();
        kv.set(FAVORITES_KEY, "{not an array").unwrap();
        let favorites = FavoritesStore::load(kv).unwrap();
        assert!(favorites.ids().is_empty());
    }

    #[test]
    fn test_failed_write_leaves_set_unchanged() {
        let mut favorites = FavoritesStore::load(ReadOnlyStore).unwrap();
        assert!(favorites.toggle("2").is_err());
        assert_eq!(favorites.ids(), ["1".to_string()]);
    }
}
