//! Data persistence
//!
//! Favorites, the countries cache, the auth session, and the storage layer
//! they persist through.

pub mod auth;
pub mod cache;
pub mod favorites;
pub mod storage;
pub mod types;

// Re-export common types
pub use auth::{AuthStore, User};
pub use cache::CountriesCache;
pub use favorites::FavoritesStore;
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
pub use types::{Country, CountryFilter, CountryName, Currency, Flags};
