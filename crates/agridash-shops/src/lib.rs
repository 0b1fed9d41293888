//! Agricultural shop finder: geocoder client, result filtering and ranking.

pub mod client;
pub mod dedupe;
pub mod error;
pub mod filter;
pub mod geolocation;
pub mod links;
pub mod normalize;
pub mod pipeline;
pub mod types;

pub use client::{LocationIqClient, PlaceSearch, SearchRequest};
pub use error::ShopsError;
pub use geolocation::{
    search_near_me, FixedLocation, LocateOptions, LocationError, LocationProvider, NearMeOutcome,
    NoLocation, NEAR_ME_QUERY,
};
pub use links::maps_search_url;
pub use pipeline::{PipelineSettings, ShopSearchPipeline, DEFAULT_QUERY};
pub use types::{MapView, RawPlace, RemoteStatus, SearchOutcome, ShopRecord};
