//! Countries list cache
//!
//! Keeps the last-fetched full country list so the home and favorites views
//! don't refetch within (or across) sessions. Full-replace only: no eviction,
//! no TTL, no partial update — fine at country-list scale (~250 entries).

use crate::config::storage::COUNTRIES_CACHE_KEY;
use crate::data::storage::{self, StorageBackend};
use crate::data::types::Country;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Persisted cache payload: `{"allCountries": [...], "allCountriesLoaded": bool}`
#[derive(Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default, rename = "allCountries")]
    all_countries: Vec<Country>,
    #[serde(default, rename = "allCountriesLoaded")]
    all_countries_loaded: bool,
}

/// Session cache of the full country list
///
/// `loaded` is true iff the list has been explicitly set at least once —
/// including set to empty, which is distinct from "never loaded".
pub struct CountriesCache {
    all_countries: Vec<Country>,
    all_countries_loaded: bool,
    storage: Arc<dyn StorageBackend>,
}

impl CountriesCache {
    /// Hydrate the cache from persisted state, verbatim
    ///
    /// Unreadable or malformed state degrades to empty/not-loaded.
    pub fn load(storage: Arc<dyn StorageBackend>) -> Self {
        let file = match storage::load_json::<CacheFile>(storage.as_ref(), COUNTRIES_CACHE_KEY) {
            Ok(Some(file)) => file,
            Ok(None) => CacheFile::default(),
            Err(e) => {
                eprintln!("Failed to load countries cache: {e}");
                CacheFile::default()
            }
        };

        Self {
            all_countries: file.all_countries,
            all_countries_loaded: file.all_countries_loaded,
            storage,
        }
    }

    /// Replace the cached list wholesale and mark it loaded
    ///
    /// An empty list is valid: the cache is then "loaded but empty".
    pub fn set_all(&mut self, countries: Vec<Country>) {
        self.all_countries = countries;
        self.all_countries_loaded = true;
        self.persist();
    }

    /// Look up a country by exact, case-sensitive code match
    pub fn get(&self, code: &str) -> Option<&Country> {
        self.all_countries.iter().find(|c| c.cca2 == code)
    }

    /// Reset to empty and not loaded
    pub fn clear(&mut self) {
        self.all_countries.clear();
        self.all_countries_loaded = false;
        self.persist();
    }

    /// The cached list (possibly empty)
    pub fn all(&self) -> &[Country] {
        &self.all_countries
    }

    /// Whether the list has been explicitly set since the last clear
    pub fn is_loaded(&self) -> bool {
        self.all_countries_loaded
    }

    /// Number of cached countries
    pub fn len(&self) -> usize {
        self.all_countries.len()
    }

    /// Check if the cached list is empty
    pub fn is_empty(&self) -> bool {
        self.all_countries.is_empty()
    }

    /// Write the full state back; failures are reported and swallowed
    fn persist(&self) {
        let file = CacheFile {
            all_countries: self.all_countries.clone(),
            all_countries_loaded: self.all_countries_loaded,
        };
        if let Err(e) = storage::save_json(self.storage.as_ref(), COUNTRIES_CACHE_KEY, &file) {
            eprintln!("Failed to persist countries cache: {e}");
        }
    }
}
