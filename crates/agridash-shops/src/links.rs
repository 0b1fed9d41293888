//! Outbound map links for shop results.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::types::FALLBACK_SHOP_LABEL;

const MAPS_SEARCH_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Maps search URL for `"<name>, <lat>,<lon>"`.
///
/// Including the coordinates pins the search to the shop's location even
/// when several branches share a name.
#[must_use]
pub fn maps_search_url(name: &str, lat: f64, lon: f64) -> String {
    let label = if name.trim().is_empty() {
        FALLBACK_SHOP_LABEL
    } else {
        name
    };
    let query = format!("{label}, {lat},{lon}");
    format!(
        "{MAPS_SEARCH_BASE}{}",
        utf8_percent_encode(&query, URI_COMPONENT)
    )
}
