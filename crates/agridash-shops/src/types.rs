//! Geocoder payload types and the ranked shop records produced from them.

use agridash_core::{Address, Coordinate, TrustedShop};
use serde::{Deserialize, Serialize};

use crate::links::maps_search_url;

/// Label shown for records whose geocoder entry carried no usable name.
pub const FALLBACK_SHOP_LABEL: &str = "Agri Shop";

/// One place record as returned by the text-search endpoint.
///
/// Coordinates arrive as strings from LocationIQ and as numbers from some
/// Nominatim mirrors, so they are kept as raw JSON until normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlace {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub lat: Option<serde_json::Value>,
    #[serde(default)]
    pub lon: Option<serde_json::Value>,
    #[serde(default)]
    pub address: Option<serde_json::Value>,
    #[serde(default)]
    pub extratags: Option<serde_json::Value>,
    #[serde(default)]
    pub tags: Option<serde_json::Value>,
}

/// A shop candidate with validated coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopRecord {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<serde_json::Map<String, serde_json::Value>>,
    pub is_trusted: bool,
    pub distance_meters: f64,
}

impl ShopRecord {
    #[must_use]
    pub fn from_trusted(shop: &TrustedShop) -> Self {
        Self {
            name: shop.name.clone(),
            lat: shop.lat,
            lon: shop.lon,
            address: shop.address.clone(),
            tags: None,
            is_trusted: true,
            distance_meters: 0.0,
        }
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }

    /// The record's name, or [`FALLBACK_SHOP_LABEL`] when it is blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            FALLBACK_SHOP_LABEL
        } else {
            &self.name
        }
    }

    /// Road and locality for list rows; empty when no address is known.
    #[must_use]
    pub fn address_line(&self) -> String {
        self.address
            .as_ref()
            .map(Address::display_line)
            .unwrap_or_default()
    }

    /// `"2.35 km"`, `"Pre-loaded Shop"` for trusted records without a
    /// distance, otherwise empty.
    #[must_use]
    pub fn distance_label(&self) -> String {
        if self.distance_meters > 0.0 {
            format!("{:.2} km", self.distance_meters / 1000.0)
        } else if self.is_trusted {
            "Pre-loaded Shop".to_string()
        } else {
            String::new()
        }
    }

    #[must_use]
    pub fn maps_url(&self) -> String {
        maps_search_url(&self.name, self.lat, self.lon)
    }
}

/// Where the map should be centered after a search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
}

/// How the remote half of a search went. Diagnostic only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemoteStatus {
    /// The geocoder answered; `returned` raw records, `accepted` survived
    /// normalization, keyword filtering and coordinate dedup.
    Ok { returned: usize, accepted: usize },
    /// The geocoder could not be used; only trusted shops were merged.
    Unavailable { reason: String },
}

/// The complete result of one shop search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub shops: Vec<ShopRecord>,
    pub view: MapView,
    pub remote: RemoteStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, trusted: bool, distance: f64) -> ShopRecord {
        ShopRecord {
            name: name.to_string(),
            lat: 13.0,
            lon: 80.0,
            address: None,
            tags: None,
            is_trusted: trusted,
            distance_meters: distance,
        }
    }

    #[test]
    fn blank_name_uses_fallback_label() {
        assert_eq!(record("  ", false, 0.0).display_name(), FALLBACK_SHOP_LABEL);
        assert_eq!(record("Krishi Kendra", false, 0.0).display_name(), "Krishi Kendra");
    }

    #[test]
    fn distance_label_formats_kilometers() {
        assert_eq!(record("a", false, 2346.0).distance_label(), "2.35 km");
        assert_eq!(record("a", true, 0.0).distance_label(), "Pre-loaded Shop");
        assert_eq!(record("a", false, 0.0).distance_label(), "");
    }

    #[test]
    fn raw_place_accepts_string_and_numeric_coordinates() {
        let places: Vec<RawPlace> = serde_json::from_value(serde_json::json!([
            { "display_name": "Green Agro", "lat": "13.1", "lon": "80.2" },
            { "name": "Farm Depot", "lat": 13.2, "lon": 80.3, "class": "shop" }
        ]))
        .unwrap();
        assert_eq!(places.len(), 2);
        assert!(places[0].name.is_none());
        assert_eq!(places[1].lat, Some(serde_json::json!(13.2)));
    }

    #[test]
    fn remote_status_serializes_with_tag() {
        let json = serde_json::to_value(RemoteStatus::Ok {
            returned: 3,
            accepted: 1,
        })
        .unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["accepted"], 1);
    }
}
