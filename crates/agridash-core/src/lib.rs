//! Shared configuration and geographic primitives for agridash.

pub mod app_config;
pub mod config;
pub mod error;
pub mod geo;
pub mod trusted;
pub mod view;

pub use app_config::{AppConfig, Environment, RemoteFailurePolicy};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use geo::{haversine_meters, BoundingBox, Coordinate, EARTH_RADIUS_M};
pub use trusted::{load_trusted_shops, parse_trusted_shops, Address, TrustedShop, TrustedShopsFile};
pub use view::View;
