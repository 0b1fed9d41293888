//! Great-circle distance and search-area helpers.
//!
//! Distances use the haversine formula over a spherical Earth. The haversine
//! term is clamped to `[0, 1]` before the inverse trig step, so rounding noise
//! at coincident or antipodal points never yields `NaN` or a negative value.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both components finite and inside `[-90, 90]` / `[-180, 180]`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Haversine distance to `other` in meters.
    #[must_use]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_meters(*self, *other)
    }

    /// Axis-aligned box extending `half_width_deg` degrees in every direction.
    #[must_use]
    pub fn bounding_box(&self, half_width_deg: f64) -> BoundingBox {
        BoundingBox {
            min_lon: self.lon - half_width_deg,
            min_lat: self.lat - half_width_deg,
            max_lon: self.lon + half_width_deg,
            max_lat: self.lat + half_width_deg,
        }
    }
}

/// Rectangular search hint sent to the geocoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Renders the box as `min_lon,min_lat,max_lon,max_lat` with six decimals.
    #[must_use]
    pub fn to_viewbox(&self) -> String {
        format!(
            "{:.6},{:.6},{:.6},{:.6}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

/// Great-circle distance between `a` and `b` in meters.
#[must_use]
pub fn haversine_meters(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let delta_phi = (b.lat - a.lat).to_radians();
    let delta_lambda = (b.lon - a.lon).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}
