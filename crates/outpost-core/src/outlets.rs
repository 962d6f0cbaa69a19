//! Outlet records and outlets-file loading.
//!
//! The outlet list is configuration, not a database: a YAML file in the
//! repo's `config/` directory, or a CSV export of the operations
//! spreadsheet (PARTY NAME / ADDRESS / CITY / DISTRICT / STATE / PINCODE
//! columns plus coordinates).

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::ConfigError;

/// One outlet to rank by distance.
///
/// Coordinates are optional: spreadsheet rows with a missing or unparseable
/// latitude/longitude are carried as `None` and skipped at ranking time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlet {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
}

impl Outlet {
    /// The outlet's coordinate, if both components are present.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OutletsFile {
    pub outlets: Vec<Outlet>,
}

/// Load and validate the outlet list from a YAML or CSV file.
///
/// Files ending in `.csv` are read as a header-row CSV export; anything
/// else is parsed as the YAML `outlets:` list.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (empty names, duplicate names).
pub fn load_outlets(path: &Path) -> Result<Vec<Outlet>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::OutletsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let outlets = if is_csv {
        parse_outlets_csv(&content)?
    } else {
        let file: OutletsFile = serde_yaml::from_str(&content)?;
        file.outlets
    };

    validate_outlets(&outlets)?;

    Ok(outlets)
}

/// Raw CSV row. Coordinates come in as text so that junk cells ("N/A",
/// "-", stray notes) demote to `None` instead of failing the whole file.
#[derive(Debug, Deserialize)]
struct CsvOutletRow {
    name: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    latitude: Option<String>,
    #[serde(default)]
    longitude: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    district: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    pincode: Option<String>,
}

impl From<CsvOutletRow> for Outlet {
    fn from(row: CsvOutletRow) -> Self {
        Self {
            name: row.name,
            address: row.address,
            latitude: parse_coordinate_cell(row.latitude.as_deref()),
            longitude: parse_coordinate_cell(row.longitude.as_deref()),
            city: row.city,
            district: row.district,
            state: row.state,
            pincode: row.pincode,
        }
    }
}

fn parse_coordinate_cell(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
}

fn parse_outlets_csv(content: &str) -> Result<Vec<Outlet>, ConfigError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut outlets = Vec::new();
    for record in reader.deserialize::<CsvOutletRow>() {
        outlets.push(record?.into());
    }
    Ok(outlets)
}

fn validate_outlets(outlets: &[Outlet]) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for outlet in outlets {
        if outlet.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "outlet name must be non-empty".to_string(),
            ));
        }

        let lower_name = outlet.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate outlet name: '{}'",
                outlet.name
            )));
        }
    }

    Ok(())
}
