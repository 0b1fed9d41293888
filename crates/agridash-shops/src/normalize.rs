//! Conversion of raw geocoder places into [`ShopRecord`]s.

use agridash_core::{Address, Coordinate};
use serde_json::Value;

use crate::types::{RawPlace, ShopRecord};

/// Coerces a JSON latitude/longitude into a usable `f64`.
///
/// Accepts numbers and numeric strings. Missing values, blank or
/// non-numeric strings, non-finite values and exact zero all yield `None`;
/// a zero coordinate is how the geocoder reports "no position".
#[must_use]
pub fn coerce_coordinate(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };

    (number.is_finite() && number != 0.0).then_some(number)
}

/// Normalizes one geocoder place.
///
/// Returns `None` when either coordinate is unusable or out of range. The
/// name falls back to `display_name`, then to an empty string.
#[must_use]
pub fn normalize_place(raw: &RawPlace) -> Option<ShopRecord> {
    let lat = coerce_coordinate(raw.lat.as_ref())?;
    let lon = coerce_coordinate(raw.lon.as_ref())?;
    if !Coordinate::new(lat, lon).is_valid() {
        return None;
    }

    let name = [raw.name.as_deref(), raw.display_name.as_deref()]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string();

    let address = raw
        .address
        .as_ref()
        .filter(|v| v.is_object())
        .and_then(|v| serde_json::from_value::<Address>(v.clone()).ok());

    Some(ShopRecord {
        name,
        lat,
        lon,
        address,
        tags: tag_bag(raw),
        is_trusted: false,
        distance_meters: 0.0,
    })
}

/// `extratags` when present, otherwise `tags`.
fn tag_bag(raw: &RawPlace) -> Option<serde_json::Map<String, Value>> {
    let pick = |v: &Option<Value>| v.as_ref().and_then(Value::as_object).cloned();
    pick(&raw.extratags).or_else(|| pick(&raw.tags))
}
