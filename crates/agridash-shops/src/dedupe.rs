//! Coordinate dedup, trusted-list merge and distance ranking.

use std::collections::HashSet;

use agridash_core::Coordinate;

use crate::types::ShopRecord;

/// Remote records closer than this to an already accepted record are dropped.
pub const MERGE_RADIUS_M: f64 = 50.0;

/// Upper bound on the number of records a search returns.
pub const MAX_RESULTS: usize = 60;

/// A coordinate in units of 1e-5 degrees, rounded half away from zero.
/// Exact binary ties round up (13.015625 -> 1301563), unlike `format!("{:.5}")`.
#[allow(clippy::cast_possible_truncation)]
fn rounded_key(degrees: f64) -> i64 {
    // |degrees| <= 180 after normalization, so the product fits an i64.
    (degrees * 1e5).round() as i64
}

/// Drops records whose coordinates match an earlier record to 5 decimal
/// places (about 1.1 m). First occurrence wins; order is preserved.
#[must_use]
pub fn dedupe_by_rounded_coords(records: Vec<ShopRecord>) -> Vec<ShopRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert((rounded_key(r.lat), rounded_key(r.lon))))
        .collect()
}

/// Starts from `trusted` and appends each `remote` record that is at least
/// `radius_m` away from every record accepted so far.
///
/// Trusted records are never compared with each other, so two curated shops
/// on the same street both survive.
#[must_use]
pub fn merge_with_trusted(
    trusted: &[ShopRecord],
    remote: Vec<ShopRecord>,
    radius_m: f64,
) -> Vec<ShopRecord> {
    let mut merged: Vec<ShopRecord> = trusted.to_vec();
    for candidate in remote {
        let point = candidate.coordinate();
        let is_duplicate = merged
            .iter()
            .any(|existing| existing.coordinate().distance_to(&point) < radius_m);
        if is_duplicate {
            tracing::debug!(
                name = %candidate.name,
                lat = candidate.lat,
                lon = candidate.lon,
                "dropping remote shop within merge radius of an existing result"
            );
        } else {
            merged.push(candidate);
        }
    }
    merged
}

/// Sets `distance_meters` relative to `center` (0 without a center), sorts
/// nearest first and keeps at most `limit` records.
///
/// The sort is stable, so records at equal distance keep their merge order.
#[must_use]
pub fn rank_by_distance(
    mut records: Vec<ShopRecord>,
    center: Option<Coordinate>,
    limit: usize,
) -> Vec<ShopRecord> {
    for record in &mut records {
        record.distance_meters = center.map_or(0.0, |c| c.distance_to(&record.coordinate()));
    }
    records.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    records.truncate(limit);
    records
}
