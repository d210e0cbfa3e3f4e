//! Country provider trait
//!
//! Defines the interface a country-data source must implement.

use crate::data::types::Country;
use crate::error::Result;

/// A source of country records
pub trait CountryProvider: Send + Sync {
    /// Display name for the provider (e.g., "REST Countries")
    fn name(&self) -> &'static str;

    /// Machine-readable identifier (e.g., "rest-countries")
    fn id(&self) -> &'static str;

    /// Fetch the full country list (list-view fields only)
    fn fetch_all(&self) -> Result<Vec<Country>>;

    /// Look up a single country by its two-letter code, with detail fields
    ///
    /// Returns `Ok(None)` when the code is unknown to the provider.
    fn fetch_by_code(&self, code: &str) -> Result<Option<Country>>;
}
