//! Country catalog service
//!
//! Coordinates the country provider and the on-disk cache. The full list is
//! fetched at most once; after that, reads are served from the cache until
//! it is explicitly refreshed or cleared. Fetch failures surface as error
//! notifications while leaving any cached data intact.

use std::sync::Arc;

use crate::data::cache::CountriesCache;
use crate::data::types::{Country, CountryFilter};
use crate::error::Result;
use crate::notify::{Notification, NotificationSink};
use crate::providers::CountryProvider;

/// Fallback user-facing message when a country fetch fails
const FETCH_FAILED_MSG: &str = "Failed to load countries.";

pub struct Catalog {
    provider: Box<dyn CountryProvider>,
    cache: CountriesCache,
    sink: Arc<dyn NotificationSink>,
}

impl Catalog {
    pub fn new(
        provider: Box<dyn CountryProvider>,
        cache: CountriesCache,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            provider,
            cache,
            sink,
        }
    }

    /// The country list, fetching from the provider only on a cold cache.
    ///
    /// A loaded-but-empty cache counts as warm and does not trigger a fetch.
    /// On fetch failure an error notification is dispatched and whatever the
    /// cache currently holds is returned.
    pub fn countries(&mut self) -> Vec<Country> {
        if !self.cache.is_loaded() {
            if let Err(e) = self.fetch_into_cache() {
                eprintln!("Failed to fetch countries from {}: {e}", self.provider.name());
                self.sink
                    .dispatch(Notification::error(e.user_message(FETCH_FAILED_MSG)));
            }
        }
        self.cache.all().to_vec()
    }

    /// Force a fresh fetch, replacing the cached list on success.
    ///
    /// On failure the previous cache contents are kept.
    pub fn refresh(&mut self) -> Result<Vec<Country>> {
        self.fetch_into_cache()?;
        Ok(self.cache.all().to_vec())
    }

    /// Look up a single country by code, preferring the cache.
    ///
    /// Cache misses fall through to the provider's detail endpoint, which
    /// also covers codes the list view never saw.
    pub fn country(&mut self, code: &str) -> Result<Option<Country>> {
        if let Some(country) = self.cache.get(code) {
            return Ok(Some(country.clone()));
        }
        self.provider.fetch_by_code(code)
    }

    /// Filter the country list by name search and region
    pub fn search(&mut self, filter: &CountryFilter) -> Vec<Country> {
        self.countries()
            .into_iter()
            .filter(|c| filter.matches(c))
            .collect()
    }

    /// Drop the cached list; the next read fetches again
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache(&self) -> &CountriesCache {
        &self.cache
    }

    fn fetch_into_cache(&mut self) -> Result<()> {
        let countries = self.provider.fetch_all()?;
        self.cache.set_all(countries);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::storage::MemoryStorage;
    use crate::error::AppError;
    use crate::notify::testing::RecordingSink;
    use crate::notify::NullSink;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Provider that serves a fixed list and counts fetches
    struct MockProvider {
        countries: Vec<Country>,
        fail: bool,
        fetch_count: Arc<AtomicU32>,
    }

    impl MockProvider {
        fn new(countries: Vec<Country>) -> Self {
            Self {
                countries,
                fail: false,
                fetch_count: Arc::new(AtomicU32::new(0)),
            }
        }

        fn failing() -> Self {
            Self {
                countries: Vec::new(),
                fail: true,
                fetch_count: Arc::new(AtomicU32::new(0)),
            }
        }

        fn counter(&self) -> Arc<AtomicU32> {
            Arc::clone(&self.fetch_count)
        }
    }

    impl CountryProvider for MockProvider {
        fn name(&self) -> &'static str {
            "Mock"
        }

        fn id(&self) -> &'static str {
            "mock"
        }

        fn fetch_all(&self) -> Result<Vec<Country>> {
            self.fetch_count.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Storage("mock outage".into()));
            }
            Ok(self.countries.clone())
        }

        fn fetch_by_code(&self, code: &str) -> Result<Option<Country>> {
            self.fetch_count.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Storage("mock outage".into()));
            }
            Ok(self.countries.iter().find(|c| c.cca2 == code).cloned())
        }
    }

    fn sample_countries() -> Vec<Country> {
        vec![
            Country::new("US", "United States")
                .with_region("Americas")
                .with_population(331_000_000),
            Country::new("DE", "Germany")
                .with_region("Europe")
                .with_population(83_000_000),
            Country::new("FR", "France")
                .with_region("Europe")
                .with_population(67_000_000),
        ]
    }

    fn catalog_with(provider: MockProvider) -> Catalog {
        let storage = Arc::new(MemoryStorage::new());
        let cache = CountriesCache::load(storage);
        Catalog::new(Box::new(provider), cache, Arc::new(NullSink))
    }

    #[test]
    fn test_countries_fetches_once() {
        let provider = MockProvider::new(sample_countries());
        let count = provider.counter();
        let mut catalog = catalog_with(provider);

        assert_eq!(catalog.countries().len(), 3);
        assert_eq!(catalog.countries().len(), 3);
        assert_eq!(catalog.countries().len(), 3);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_result_counts_as_loaded() {
        let provider = MockProvider::new(Vec::new());
        let count = provider.counter();
        let mut catalog = catalog_with(provider);

        assert!(catalog.countries().is_empty());
        assert!(catalog.countries().is_empty());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fetch_failure_dispatches_error_notification() {
        let sink = RecordingSink::new();
        let storage = Arc::new(MemoryStorage::new());
        let cache = CountriesCache::load(storage);
        let mut catalog = Catalog::new(
            Box::new(MockProvider::failing()),
            cache,
            Arc::clone(&sink) as Arc<dyn NotificationSink>,
        );

        assert!(catalog.countries().is_empty());
        let received = sink.snapshot();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].message, "Failed to load countries.");
    }

    #[test]
    fn test_fetch_failure_keeps_cache_cold() {
        let provider = MockProvider::failing();
        let count = provider.counter();
        let mut catalog = catalog_with(provider);

        // Each read retries while the cache never warmed up
        catalog.countries();
        catalog.countries();
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(!catalog.cache().is_loaded());
    }

    #[test]
    fn test_refresh_refetches() {
        let provider = MockProvider::new(sample_countries());
        let count = provider.counter();
        let mut catalog = catalog_with(provider);

        catalog.countries();
        let refreshed = catalog.refresh().unwrap();
        assert_eq!(refreshed.len(), 3);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_refresh_failure_keeps_previous_cache() {
        let storage = Arc::new(MemoryStorage::new());
        let mut cache = CountriesCache::load(storage.clone());
        cache.set_all(sample_countries());
        let mut catalog = Catalog::new(Box::new(MockProvider::failing()), cache, Arc::new(NullSink));

        assert!(catalog.refresh().is_err());
        assert_eq!(catalog.countries().len(), 3);
    }

    #[test]
    fn test_country_served_from_cache() {
        let provider = MockProvider::new(sample_countries());
        let count = provider.counter();
        let mut catalog = catalog_with(provider);

        catalog.countries();
        let germany = catalog.country("DE").unwrap().unwrap();
        assert_eq!(germany.name.common, "Germany");
        // Warm-up fetch only; the lookup hit the cache
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_country_cache_miss_falls_through_to_provider() {
        let provider = MockProvider::new(sample_countries());
        let count = provider.counter();
        let mut catalog = catalog_with(provider);

        let germany = catalog.country("DE").unwrap().unwrap();
        assert_eq!(germany.cca2, "DE");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_country_unknown_code() {
        let mut catalog = catalog_with(MockProvider::new(sample_countries()));
        assert!(catalog.country("ZZ").unwrap().is_none());
    }

    #[test]
    fn test_search_by_name() {
        let mut catalog = catalog_with(MockProvider::new(sample_countries()));
        let filter = CountryFilter::new().search("ger");
        let results = catalog.search(&filter);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].cca2, "DE");
    }

    #[test]
    fn test_search_by_region() {
        let mut catalog = catalog_with(MockProvider::new(sample_countries()));
        let filter = CountryFilter::new().region("Europe");
        let results = catalog.search(&filter);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_search_combined() {
        let mut catalog = catalog_with(MockProvider::new(sample_countries()));
        let filter = CountryFilter::new().search("fr").region("Europe");
        let results = catalog.search(&filter);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].cca2, "FR");
    }

    #[test]
    fn test_clear_cache_forces_refetch() {
        let provider = MockProvider::new(sample_countries());
        let count = provider.counter();
        let mut catalog = catalog_with(provider);

        catalog.countries();
        catalog.clear_cache();
        catalog.countries();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cache_survives_reload() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let cache = CountriesCache::load(storage.clone());
            let mut catalog =
                Catalog::new(Box::new(MockProvider::new(sample_countries())), cache, Arc::new(NullSink));
            catalog.countries();
        }

        // A second catalog over the same storage never touches the provider
        let cache = CountriesCache::load(storage);
        let mut catalog = Catalog::new(Box::new(MockProvider::failing()), cache, Arc::new(NullSink));
        assert_eq!(catalog.countries().len(), 3);
    }
}
