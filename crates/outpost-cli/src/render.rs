//! Table and CSV rendering of a ranked outlet list.

use std::io::Write;

use serde::Serialize;

use outpost_core::{route_url, Coordinate, RankedOutlet, TravelMode};

/// One exported row. Field order is the CSV column order.
#[derive(Debug, Serialize)]
pub(crate) struct ExportRow {
    pub rank: usize,
    pub name: String,
    pub distance_km: f64,
    pub route_url: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

impl ExportRow {
    fn new(
        rank: usize,
        origin: Coordinate,
        ranked: &RankedOutlet,
        mode: Option<TravelMode>,
    ) -> Self {
        Self {
            rank,
            name: ranked.outlet.name.clone(),
            distance_km: ranked.display_km(),
            route_url: route_url(origin, ranked.coordinate, mode),
            address: ranked.outlet.address.clone(),
            city: ranked.outlet.city.clone(),
            district: ranked.outlet.district.clone(),
            state: ranked.outlet.state.clone(),
            pincode: ranked.outlet.pincode.clone(),
        }
    }
}

/// Ordinal rank label as shown in the ops dashboard ("1st Nearest", ...).
pub(crate) fn ordinal_label(rank: usize) -> String {
    let suffix = match (rank % 10, rank % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{rank}{suffix} Nearest")
}

/// Render the ranked outlets as an aligned text table, nearest first.
pub(crate) fn render_table(
    origin: Coordinate,
    ranked: &[RankedOutlet],
    mode: Option<TravelMode>,
) -> String {
    if ranked.is_empty() {
        return "no outlets with coordinates to rank\n".to_string();
    }

    let name_width = ranked
        .iter()
        .map(|r| r.outlet.name.len())
        .max()
        .unwrap_or(0)
        .max("OUTLET".len());

    let mut out = String::new();
    out.push_str(&format!(
        "{:<14}  {:<name_width$}  {:>9}  ROUTE\n",
        "RANK", "OUTLET", "KM"
    ));
    for (i, r) in ranked.iter().enumerate() {
        out.push_str(&format!(
            "{:<14}  {:<name_width$}  {:>9.2}  {}\n",
            ordinal_label(i + 1),
            r.outlet.name,
            r.display_km(),
            route_url(origin, r.coordinate, mode),
        ));
    }
    out
}

/// CSV column names, matching [`ExportRow`]'s field order. Written
/// explicitly so an empty ranking still yields a well-formed file.
pub(crate) const CSV_HEADER: [&str; 9] = [
    "rank",
    "name",
    "distance_km",
    "route_url",
    "address",
    "city",
    "district",
    "state",
    "pincode",
];

/// Write the ranked outlets as CSV with a header row.
pub(crate) fn write_csv<W: Write>(
    writer: &mut W,
    origin: Coordinate,
    ranked: &[RankedOutlet],
    mode: Option<TravelMode>,
) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for (i, r) in ranked.iter().enumerate() {
        wtr.serialize(ExportRow::new(i + 1, origin, r, mode))?;
    }
    wtr.flush()?;
    Ok(())
}
