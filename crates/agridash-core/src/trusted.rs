//! The curated set of shops that every search result must contain.
//!
//! Loaded from YAML so deployments can swap the list without a rebuild:
//!
//! ```yaml
//! shops:
//!   - name: Madras Fertilizers Ltd.
//!     lat: 13.08268
//!     lon: 80.27072
//!     address:
//!       town: Manali, Chennai
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::ConfigError;

/// Postal address fields used for display.
///
/// Geocoders return many more keys than the ones named here; those are kept
/// in `extra` so keyword matching still sees them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Address {
    /// First non-empty of town, village, city, suburb.
    #[must_use]
    pub fn locality(&self) -> Option<&str> {
        [&self.town, &self.village, &self.city, &self.suburb]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .find(|s| !s.trim().is_empty())
    }

    /// `"<road>, <locality>"`, dropping whichever part is missing.
    #[must_use]
    pub fn display_line(&self) -> String {
        let road = self.road.as_deref().filter(|s| !s.trim().is_empty());
        match (road, self.locality()) {
            (Some(road), Some(locality)) => format!("{road}, {locality}"),
            (Some(road), None) => road.to_string(),
            (None, Some(locality)) => locality.to_string(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustedShop {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub address: Option<Address>,
}

impl TrustedShop {
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrustedShopsFile {
    #[serde(default)]
    pub shops: Vec<TrustedShop>,
}

/// Load and validate the trusted shop list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_trusted_shops(path: &Path) -> Result<TrustedShopsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TrustedShopsIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_trusted_shops(&content)
}

/// Parse and validate a trusted shop list from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_trusted_shops(content: &str) -> Result<TrustedShopsFile, ConfigError> {
    let file: TrustedShopsFile = serde_yaml::from_str(content)?;
    validate_trusted_shops(&file)?;
    Ok(file)
}

fn validate_trusted_shops(file: &TrustedShopsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for shop in &file.shops {
        if shop.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "trusted shop name must be non-empty".to_string(),
            ));
        }

        if !shop.coordinate().is_valid() {
            return Err(ConfigError::Validation(format!(
                "trusted shop '{}' has invalid coordinates ({}, {})",
                shop.name, shop.lat, shop.lon
            )));
        }

        if !seen_names.insert(shop.name.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate trusted shop name: '{}'",
                shop.name
            )));
        }
    }

    Ok(())
}
