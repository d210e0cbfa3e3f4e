//! Configuration constants for geodex app services

/// Application metadata
pub mod app {
    /// Application name (used for config directory, etc.)
    pub const NAME: &str = "geodex";
}

/// Country API configuration
pub mod api {
    /// Base URL of the REST Countries API
    pub const REST_COUNTRIES_BASE: &str = "https://restcountries.com/v3.1";

    /// Fields requested for the full country list (keeps the payload small)
    pub const LIST_FIELDS: &str = "name,flags,population,region,capital,cca2";

    /// Fields requested for a single-country detail lookup
    pub const DETAIL_FIELDS: &str =
        "name,flags,population,region,subregion,capital,cca2,tld,currencies,languages,borders";
}

/// Network configuration
pub mod network {
    /// User agent sent with every request
    pub const USER_AGENT: &str = concat!("geodex/", env!("CARGO_PKG_VERSION"));

    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Read timeout in seconds
    pub const READ_TIMEOUT_SECS: u64 = 30;
}

/// Durable storage keys
pub mod storage {
    /// Favorites store: `{"favorites": ["US", ...]}`
    pub const FAVORITES_KEY: &str = "favorites-storage";

    /// Countries cache: `{"allCountries": [...], "allCountriesLoaded": bool}`
    pub const COUNTRIES_CACHE_KEY: &str = "countries-list-cache";

    /// Auth session: `{"user": {...} | null, "isAuthenticated": bool}`
    pub const AUTH_KEY: &str = "auth-storage";
}

/// Notification timing
pub mod notify {
    /// Coalescing window for rapid favorite toggles (milliseconds)
    pub const DEBOUNCE_WINDOW_MS: u64 = 100;

    /// Window for suppressing a repeat of the same message (milliseconds)
    pub const DUPLICATE_WINDOW_MS: u64 = 500;
}

/// Mock authentication (demo credentials, not a security boundary)
pub mod auth {
    pub const MOCK_USERNAME: &str = "testuser";
    pub const MOCK_PASSWORD: &str = "password123";
    pub const MOCK_EMAIL: &str = "testuser@example.com";

    /// Simulated round-trip delay for the login call (milliseconds)
    pub const LOGIN_DELAY_MS: u64 = 500;
}
