//! REST Countries API provider
//!
//! Implementation of `CountryProvider` for REST Countries v3.1
//! (<https://restcountries.com/>). Fields are requested explicitly to keep
//! the payload small; the list view asks for fewer fields than detail.

use crate::config::api::{DETAIL_FIELDS, LIST_FIELDS, REST_COUNTRIES_BASE};
use crate::data::types::Country;
use crate::error::{AppError, Result};
use crate::network::HttpClient;

use super::traits::CountryProvider;

use reqwest::StatusCode;

/// REST Countries API provider
pub struct RestCountriesProvider {
    client: HttpClient,
    base_url: String,
}

impl RestCountriesProvider {
    /// Create a provider against the public API
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: HttpClient::new()?,
            base_url: REST_COUNTRIES_BASE.to_string(),
        })
    }

    /// Create a provider with a custom base URL (for testing or mirrors)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new()?,
            base_url: base_url.into(),
        })
    }

    fn list_url(&self) -> String {
        format!("{}/all?fields={}", self.base_url, LIST_FIELDS)
    }

    fn detail_url(&self, code: &str) -> String {
        format!("{}/alpha/{}?fields={}", self.base_url, code, DETAIL_FIELDS)
    }
}

impl CountryProvider for RestCountriesProvider {
    fn name(&self) -> &'static str {
        "REST Countries"
    }

    fn id(&self) -> &'static str {
        "rest-countries"
    }

    fn fetch_all(&self) -> Result<Vec<Country>> {
        self.client.get_json(&self.list_url())
    }

    fn fetch_by_code(&self, code: &str) -> Result<Option<Country>> {
        // The alpha endpoint answers with an array even for a single code
        match self.client.get_json::<Vec<Country>>(&self.detail_url(code)) {
            Ok(countries) => Ok(countries.into_iter().next()),
            Err(AppError::Network(e)) if e.status() == Some(StatusCode::NOT_FOUND) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
