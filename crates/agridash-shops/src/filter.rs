//! Keyword filter that keeps agriculture-related places.

use crate::types::ShopRecord;

/// Lower-case terms that mark a place as an agricultural input supplier.
pub const AGRI_KEYWORDS: &[&str] = &[
    "seed",
    "fertilizer",
    "fertiliser",
    "pesticide",
    "agro",
    "agri",
    "krishi",
    "krushi",
    "farm",
    "horticulture",
    "nursery",
    "garden",
    "agrovet",
    "agriculture",
];

/// `true` when the name, the serialized address, or the serialized tag bag
/// contains any [`AGRI_KEYWORDS`] term, ignoring case.
///
/// Plain substring match over the JSON text, so a keyword inside a key
/// (`"garden_centre"`) or a longer word (`"agrochemicals"`) also counts.
#[must_use]
pub fn is_agri_shop(record: &ShopRecord) -> bool {
    let name = record.name.to_lowercase();
    let address = record
        .address
        .as_ref()
        .and_then(|a| serde_json::to_string(a).ok())
        .unwrap_or_default()
        .to_lowercase();
    let tags = record
        .tags
        .as_ref()
        .and_then(|t| serde_json::to_string(t).ok())
        .unwrap_or_default()
        .to_lowercase();

    AGRI_KEYWORDS
        .iter()
        .any(|k| name.contains(k) || address.contains(k) || tags.contains(k))
}
