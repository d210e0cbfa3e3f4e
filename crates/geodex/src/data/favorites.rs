//! Favorites store
//!
//! The set of country codes the user has marked, persisted after every
//! mutation. Storage failures never reach the caller; the in-memory set stays
//! authoritative for the session.

use crate::config::notify::DEBOUNCE_WINDOW_MS;
use crate::config::storage::FAVORITES_KEY;
use crate::data::storage::{self, StorageBackend};
use crate::notify::{Notification, NotificationDebouncer, NotificationSink};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Display name used when the caller doesn't provide one
const FALLBACK_NAME: &str = "Country";

/// Persisted favorites payload: `{"favorites": [...]}`
#[derive(Serialize)]
struct FavoritesFile<'a> {
    favorites: &'a [String],
}

/// Accepted persisted schemas, newest first
///
/// Older sessions wrote `{"state": {"favorites": [...]}}` or a bare array;
/// all three hydrate to the same set.
#[derive(Deserialize)]
#[serde(untagged)]
enum PersistedFavorites {
    Current { favorites: Vec<String> },
    Legacy { state: LegacyState },
    Bare(Vec<String>),
}

#[derive(Deserialize)]
struct LegacyState {
    favorites: Vec<String>,
}

impl PersistedFavorites {
    fn into_codes(self) -> Vec<String> {
        match self {
            PersistedFavorites::Current { favorites } => favorites,
            PersistedFavorites::Legacy { state } => state.favorites,
            PersistedFavorites::Bare(favorites) => favorites,
        }
    }
}

/// Per-user favorites, with a debounced notification per mutation burst
pub struct FavoritesStore {
    /// Favorited codes in insertion order, no duplicates
    favorites: Vec<String>,
    storage: Arc<dyn StorageBackend>,
    debouncer: NotificationDebouncer,
}

impl FavoritesStore {
    /// Hydrate the store from persisted state
    ///
    /// Unreadable or malformed state degrades to an empty set.
    pub fn load(storage: Arc<dyn StorageBackend>, sink: Arc<dyn NotificationSink>) -> Self {
        Self::with_debounce_window(storage, sink, Duration::from_millis(DEBOUNCE_WINDOW_MS))
    }

    /// Hydrate with a custom debounce window (for testing)
    pub fn with_debounce_window(
        storage: Arc<dyn StorageBackend>,
        sink: Arc<dyn NotificationSink>,
        window: Duration,
    ) -> Self {
        let mut favorites = match storage.read(FAVORITES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<PersistedFavorites>(&raw) {
                Ok(persisted) => persisted.into_codes(),
                Err(e) => {
                    eprintln!("Failed to parse persisted favorites: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                eprintln!("Failed to read persisted favorites: {e}");
                Vec::new()
            }
        };

        // Old persisted data may contain duplicates; first occurrence wins.
        let mut seen = HashSet::new();
        favorites.retain(|code| seen.insert(code.clone()));

        Self {
            favorites,
            storage,
            debouncer: NotificationDebouncer::with_window(sink, window),
        }
    }

    /// Toggle a country in the favorites set
    ///
    /// Returns the new membership: `true` if the code was added, `false` if
    /// removed. Any string is accepted as a code. Persists the updated set
    /// and schedules a debounced notification describing the action, using
    /// `display_name` if given.
    pub fn toggle(&mut self, code: &str, display_name: Option<&str>) -> bool {
        let added = match self.favorites.iter().position(|c| c == code) {
            Some(index) => {
                self.favorites.remove(index);
                false
            }
            None => {
                self.favorites.push(code.to_string());
                true
            }
        };

        self.persist();

        let name = display_name.unwrap_or(FALLBACK_NAME);
        let notification = if added {
            Notification::success(format!("{name} added to favorites!"))
        } else {
            Notification::info(format!("{name} removed from favorites!"))
        };
        self.debouncer.schedule(notification);

        added
    }

    /// Check if a code is currently favorited
    pub fn is_favorite(&self, code: &str) -> bool {
        self.favorites.iter().any(|c| c == code)
    }

    /// All favorited codes, in insertion order
    pub fn codes(&self) -> &[String] {
        &self.favorites
    }

    /// Number of favorites
    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Write the current set back; failures are reported and swallowed
    fn persist(&self) {
        let file = FavoritesFile {
            favorites: &self.favorites,
        };
        if let Err(e) = storage::save_json(self.storage.as_ref(), FAVORITES_KEY, &file) {
            eprintln!("Failed to persist favorites: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::storage::MemoryStorage;
    use crate::error::{AppError, Result};
    use crate::notify::testing::RecordingSink;
    use crate::notify::NotificationVariant;
    use std::thread::sleep;

    const WINDOW: Duration = Duration::from_millis(30);
    const SETTLE: Duration = Duration::from_millis(120);

    fn store_with(
        storage: Arc<MemoryStorage>,
        sink: Arc<RecordingSink>,
    ) -> FavoritesStore {
        FavoritesStore::with_debounce_window(storage, sink, WINDOW)
    }

    fn empty_store() -> (FavoritesStore, Arc<MemoryStorage>, Arc<RecordingSink>) {
        let storage = Arc::new(MemoryStorage::new());
        let sink = RecordingSink::new();
        let store = store_with(storage.clone(), sink.clone());
        (store, storage, sink)
    }

    #[test]
    fn test_starts_empty() {
        let (store, _, _) = empty_store();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let (mut store, _, _) = empty_store();

        assert!(store.toggle("US", Some("United States")));
        assert!(store.is_favorite("US"));
        assert_eq!(store.codes(), ["US".to_string()]);

        assert!(!store.toggle("US", Some("United States")));
        assert!(!store.is_favorite("US"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_toggle_flips_membership_for_any_code() {
        let (mut store, _, _) = empty_store();

        for code in ["US", "CA", "", "not a code", "🌍"] {
            let before = store.is_favorite(code);
            store.toggle(code, None);
            assert_ne!(store.is_favorite(code), before);
        }
    }

    #[test]
    fn test_toggle_persists_current_schema() {
        let (mut store, storage, _) = empty_store();

        store.toggle("US", Some("United States"));

        let raw = storage.read(FAVORITES_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"favorites":["US"]}"#);
    }

    #[test]
    fn test_hydrates_current_schema() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(FAVORITES_KEY, r#"{"favorites":["US","CA"]}"#);

        let store = store_with(storage, RecordingSink::new());
        assert_eq!(store.codes(), ["US".to_string(), "CA".to_string()]);
    }

    #[test]
    fn test_hydrates_legacy_wrapper_schema() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(FAVORITES_KEY, r#"{"state":{"favorites":["US","CA"]}}"#);

        let store = store_with(storage, RecordingSink::new());
        assert_eq!(store.codes(), ["US".to_string(), "CA".to_string()]);
    }

    #[test]
    fn test_hydrates_bare_array_schema() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(FAVORITES_KEY, r#"["US","CA"]"#);

        let store = store_with(storage, RecordingSink::new());
        assert_eq!(store.codes(), ["US".to_string(), "CA".to_string()]);
    }

    #[test]
    fn test_malformed_payload_hydrates_empty() {
        for payload in ["invalid json", r#"{"favorites": "nope"}"#, r#"{"foo": 1}"#, "42"] {
            let storage = Arc::new(MemoryStorage::new());
            storage.seed(FAVORITES_KEY, payload);

            let store = store_with(storage, RecordingSink::new());
            assert!(store.is_empty(), "payload {payload:?} should hydrate empty");
        }
    }

    #[test]
    fn test_duplicates_dropped_on_load() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(FAVORITES_KEY, r#"{"favorites":["US","CA","US"]}"#);

        let store = store_with(storage, RecordingSink::new());
        assert_eq!(store.codes(), ["US".to_string(), "CA".to_string()]);
    }

    #[test]
    fn test_add_notification_after_debounce() {
        let (mut store, _, sink) = empty_store();

        store.toggle("US", Some("United States"));
        sleep(SETTLE);

        let received = sink.snapshot();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].message, "United States added to favorites!");
        assert_eq!(received[0].variant, NotificationVariant::Success);
    }

    #[test]
    fn test_remove_notification_after_debounce() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(FAVORITES_KEY, r#"{"favorites":["US"]}"#);
        let sink = RecordingSink::new();
        let mut store = store_with(storage, sink.clone());

        store.toggle("US", Some("United States"));
        sleep(SETTLE);

        let received = sink.snapshot();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].message, "United States removed from favorites!");
        assert_eq!(received[0].variant, NotificationVariant::Info);
    }

    #[test]
    fn test_fallback_display_name() {
        let (mut store, _, sink) = empty_store();

        store.toggle("US", None);
        sleep(SETTLE);

        assert_eq!(sink.snapshot()[0].message, "Country added to favorites!");
    }

    #[test]
    fn test_rapid_toggles_announce_only_settled_state() {
        let (mut store, _, sink) = empty_store();

        // Three rapid toggles: add, remove, add — only the last is announced
        store.toggle("US", Some("United States"));
        store.toggle("US", Some("United States"));
        store.toggle("US", Some("United States"));
        sleep(SETTLE);

        let received = sink.snapshot();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].message, "United States added to favorites!");
        assert_eq!(received[0].variant, NotificationVariant::Success);
        assert!(store.is_favorite("US"));
    }

    #[test]
    fn test_toggles_of_different_codes_coalesce_to_last() {
        let (mut store, _, sink) = empty_store();

        store.toggle("US", Some("United States"));
        store.toggle("CA", Some("Canada"));
        sleep(SETTLE);

        // One announcement for the burst, describing the final action;
        // both mutations still applied.
        let received = sink.snapshot();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].message, "Canada added to favorites!");
        assert!(store.is_favorite("US"));
        assert!(store.is_favorite("CA"));
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        struct FailingStorage;

        impl StorageBackend for FailingStorage {
            fn read(&self, _key: &str) -> Result<Option<String>> {
                Ok(None)
            }
            fn write(&self, _key: &str, _value: &str) -> Result<()> {
                Err(AppError::Storage("disk full".to_string()))
            }
            fn remove(&self, _key: &str) -> Result<()> {
                Ok(())
            }
        }

        let mut store = FavoritesStore::with_debounce_window(
            Arc::new(FailingStorage),
            RecordingSink::new(),
            WINDOW,
        );

        // Write fails but the toggle still lands in memory
        assert!(store.toggle("US", None));
        assert!(store.is_favorite("US"));
    }

    #[test]
    fn test_read_failure_hydrates_empty() {
        struct UnreadableStorage;

        impl StorageBackend for UnreadableStorage {
            fn read(&self, _key: &str) -> Result<Option<String>> {
                Err(AppError::Storage("permission denied".to_string()))
            }
            fn write(&self, _key: &str, _value: &str) -> Result<()> {
                Ok(())
            }
            fn remove(&self, _key: &str) -> Result<()> {
                Ok(())
            }
        }

        let store = FavoritesStore::with_debounce_window(
            Arc::new(UnreadableStorage),
            RecordingSink::new(),
            WINDOW,
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_persisted_state_survives_reload() {
        let storage = Arc::new(MemoryStorage::new());

        {
            let mut store = store_with(storage.clone(), RecordingSink::new());
            store.toggle("US", None);
            store.toggle("CA", None);
        }

        let store = store_with(storage, RecordingSink::new());
        assert_eq!(store.codes(), ["US".to_string(), "CA".to_string()]);
    }
}
