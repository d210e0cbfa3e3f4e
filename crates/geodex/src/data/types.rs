//! Country records and list filtering
//!
//! `Country` mirrors the REST Countries v3.1 payload for the fields the app
//! requests. The stores treat it as an opaque immutable record; every field
//! tolerates absence so cached payloads from older sessions still load.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Country display names
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CountryName {
    /// Common name (e.g. "Germany")
    #[serde(default)]
    pub common: String,
    /// Official name (e.g. "Federal Republic of Germany")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official: Option<String>,
    /// Native names keyed by language code
    #[serde(
        default,
        rename = "nativeName",
        skip_serializing_if = "Option::is_none"
    )]
    pub native_name: Option<HashMap<String, NativeName>>,
}

/// A native-language rendering of the country name
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NativeName {
    #[serde(default)]
    pub official: String,
    #[serde(default)]
    pub common: String,
}

/// Flag image references
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Flags {
    #[serde(default)]
    pub svg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// A currency used by a country
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Currency {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// A country record as returned by the REST Countries API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, the identifier used everywhere in the app
    pub cca2: String,
    #[serde(default)]
    pub name: CountryName,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub flags: Flags,

    // Detail-view fields, absent in the list payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tld: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currencies: Option<HashMap<String, Currency>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borders: Option<Vec<String>>,
}

impl Country {
    /// Create a country with minimal info
    pub fn new(cca2: impl Into<String>, common_name: impl Into<String>) -> Self {
        Self {
            cca2: cca2.into(),
            name: CountryName {
                common: common_name.into(),
                official: None,
                native_name: None,
            },
            population: 0,
            region: String::new(),
            subregion: None,
            capital: Vec::new(),
            flags: Flags::default(),
            tld: None,
            currencies: None,
            languages: None,
            borders: None,
        }
    }

    /// Set the population
    pub fn with_population(mut self, population: u64) -> Self {
        self.population = population;
        self
    }

    /// Set the region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the capital list
    pub fn with_capital(mut self, capital: impl Into<String>) -> Self {
        self.capital = vec![capital.into()];
        self
    }
}

// =============================================================================
// CountryFilter - search and region filtering for list views
// =============================================================================

/// Filter for the country list views
///
/// Search matches case-insensitively against the common name; region is an
/// exact match, with the empty selection meaning "all regions".
#[derive(Debug, Clone, Default)]
pub struct CountryFilter {
    search: Option<String>,
    region: Option<String>,
}

impl CountryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term (empty term matches everything)
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.is_empty() { None } else { Some(term) };
        self
    }

    /// Set the region (empty region matches everything)
    pub fn region(mut self, region: impl Into<String>) -> Self {
        let region = region.into();
        self.region = if region.is_empty() {
            None
        } else {
            Some(region)
        };
        self
    }

    /// Check whether a country passes the filter
    pub fn matches(&self, country: &Country) -> bool {
        if let Some(ref term) = self.search {
            if !country
                .name
                .common
                .to_lowercase()
                .contains(&term.to_lowercase())
            {
                return false;
            }
        }

        if let Some(ref region) = self.region {
            if country.region != *region {
                return false;
            }
        }

        true
    }
}
