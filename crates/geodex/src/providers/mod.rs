//! Country data providers
//!
//! Sources of country records behind the `CountryProvider` trait; the app
//! ships the REST Countries implementation.

pub mod rest_countries;
pub mod traits;

// Re-exports
pub use rest_countries::RestCountriesProvider;
pub use traits::CountryProvider;
