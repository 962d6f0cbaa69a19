//! Textual coordinate patterns.

use regex::Regex;

use outpost_core::Coordinate;

/// Recognized patterns, tried in priority order — first match wins.
///
/// The bare pair deliberately comes first: when a string contains both a
/// bare pair and a URL sub-pattern, the bare pair takes precedence.
const COORDINATE_PATTERNS: [&str; 4] = [
    // 1. Bare decimal pair: `22.05762, 78.93807`
    r"(-?\d+(?:\.\d+)?)\s*,\s*(-?\d+(?:\.\d+)?)",
    // 2. Map-view URLs: `.../@22.05762,78.93807,17z`
    r"@(-?\d+(?:\.\d+)?),(-?\d+(?:\.\d+)?)",
    // 3. Query parameter: `?ll=22.05762,78.93807`
    r"ll=(-?\d+(?:\.\d+)?),(-?\d+(?:\.\d+)?)",
    // 4. Place-data path segments: `!3d22.05762!4d78.93807`
    r"!3d(-?\d+(?:\.\d+)?)!4d(-?\d+(?:\.\d+)?)",
];

/// Parse a coordinate out of free-form text or an (already expanded) URL.
///
/// The matched pair is interpreted as `(latitude, longitude)` with no
/// range validation beyond float parsing. Returns `None` when no pattern
/// matches.
#[must_use]
pub fn parse_coordinate(text: &str) -> Option<Coordinate> {
    for pattern in &COORDINATE_PATTERNS {
        let re = Regex::new(pattern).expect("valid regex");
        if let Some(cap) = re.captures(text) {
            let lat = cap.get(1)?.as_str().parse::<f64>().ok()?;
            let lng = cap.get(2)?.as_str().parse::<f64>().ok()?;
            return Some(Coordinate::new(lat, lng));
        }
    }
    None
}
