pub mod app_config;
pub mod config;
mod error;
pub mod geo;
pub mod links;
pub mod outlets;
pub mod rank;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use geo::{haversine_km, Coordinate, EARTH_RADIUS_KM};
pub use links::{route_url, TravelMode};
pub use outlets::{load_outlets, Outlet, OutletsFile};
pub use rank::{rank_by_distance, RankedOutlet};
