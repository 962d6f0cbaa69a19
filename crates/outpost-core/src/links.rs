//! Google Maps directions links.
//!
//! The URL shape is a compatibility surface: downstream spreadsheets and
//! dashboards link through it, so changes here break saved routes.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/?api=1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TravelMode::Driving => write!(f, "driving"),
            TravelMode::Walking => write!(f, "walking"),
            TravelMode::Bicycling => write!(f, "bicycling"),
            TravelMode::Transit => write!(f, "transit"),
        }
    }
}

impl std::str::FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "driving" => Ok(TravelMode::Driving),
            "walking" => Ok(TravelMode::Walking),
            "bicycling" => Ok(TravelMode::Bicycling),
            "transit" => Ok(TravelMode::Transit),
            other => Err(format!(
                "unknown travel mode '{other}'; expected driving, walking, bicycling, or transit"
            )),
        }
    }
}

/// Build a directions link from `origin` to `destination`.
///
/// Shape: `{base}&origin=<lat>,<lng>&destination=<lat>,<lng>[&travelmode=<mode>]`.
#[must_use]
pub fn route_url(origin: Coordinate, destination: Coordinate, mode: Option<TravelMode>) -> String {
    let mut url = format!("{DIRECTIONS_BASE}&origin={origin}&destination={destination}");
    if let Some(mode) = mode {
        url.push_str("&travelmode=");
        url.push_str(&mode.to_string());
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_url_matches_documented_template() {
        let origin = Coordinate::new(22.05762, 78.93807);
        let destination = Coordinate::new(22.0532, 78.9435);
        assert_eq!(
            route_url(origin, destination, None),
            "https://www.google.com/maps/dir/?api=1&origin=22.05762,78.93807&destination=22.0532,78.9435"
        );
    }

    #[test]
    fn route_url_appends_travel_mode() {
        let origin = Coordinate::new(22.0, 78.0);
        let destination = Coordinate::new(23.0, 79.0);
        let url = route_url(origin, destination, Some(TravelMode::Driving));
        assert!(url.ends_with("&travelmode=driving"), "got {url}");
    }

    #[test]
    fn travel_mode_round_trips_through_from_str() {
        for mode in [
            TravelMode::Driving,
            TravelMode::Walking,
            TravelMode::Bicycling,
            TravelMode::Transit,
        ] {
            assert_eq!(mode.to_string().parse::<TravelMode>(), Ok(mode));
        }
        assert!("flying".parse::<TravelMode>().is_err());
    }
}
