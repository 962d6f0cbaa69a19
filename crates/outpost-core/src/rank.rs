//! Distance ranking over the outlet list.

use serde::Serialize;

use crate::geo::{haversine_km, Coordinate};
use crate::outlets::Outlet;

/// An outlet annotated with its distance from the reference coordinate.
#[derive(Debug, Clone, Serialize)]
pub struct RankedOutlet {
    pub outlet: Outlet,
    /// The outlet's coordinate. Always present: outlets without one never
    /// make it into a ranking.
    pub coordinate: Coordinate,
    /// Full-precision haversine distance in kilometers. Ordering uses this
    /// value; rounding happens at display time only.
    pub distance_km: f64,
}

impl RankedOutlet {
    /// Distance rounded to 2 decimal places for display.
    #[must_use]
    pub fn display_km(&self) -> f64 {
        (self.distance_km * 100.0).round() / 100.0
    }
}

/// Rank outlets by haversine distance from `reference`, nearest first.
///
/// Outlets missing either coordinate component are skipped, never an error.
/// The sort is stable on the unrounded distance, so exact ties keep their
/// original input order and repeated runs on identical input produce
/// identical rankings.
#[must_use]
pub fn rank_by_distance(reference: Coordinate, outlets: &[Outlet]) -> Vec<RankedOutlet> {
    let mut ranked: Vec<RankedOutlet> = outlets
        .iter()
        .filter_map(|outlet| {
            let coordinate = outlet.coordinate()?;
            Some(RankedOutlet {
                outlet: outlet.clone(),
                coordinate,
                distance_km: haversine_km(reference, coordinate),
            })
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}
