use clap::Parser;

use outpost_core::{Coordinate, Outlet, RankedOutlet, TravelMode};

use super::{Cli, Commands};
use crate::render;

#[test]
fn parses_rank_command() {
    let cli = Cli::try_parse_from(["outpost-cli", "rank", "22.05, 78.94"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Rank { ref location, .. } if location == "22.05, 78.94"
    ));
}

#[test]
fn parses_rank_with_mode_and_csv() {
    let cli = Cli::try_parse_from([
        "outpost-cli",
        "rank",
        "22.05,78.94",
        "--mode",
        "driving",
        "--csv",
        "out.csv",
    ])
    .expect("expected valid cli args");
    match cli.command {
        Commands::Rank { mode, csv, .. } => {
            assert_eq!(mode, Some(TravelMode::Driving));
            assert_eq!(csv.as_deref(), Some(std::path::Path::new("out.csv")));
        }
        Commands::Validate { .. } => panic!("expected rank command"),
    }
}

#[test]
fn rejects_unknown_travel_mode() {
    let result = Cli::try_parse_from(["outpost-cli", "rank", "22,78", "--mode", "teleport"]);
    assert!(result.is_err());
}

#[test]
fn parses_validate_command() {
    let cli = Cli::try_parse_from(["outpost-cli", "validate", "--outlets", "outlets.csv"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Validate { .. }));
}

fn ranked(name: &str, lat: f64, lng: f64, km: f64) -> RankedOutlet {
    RankedOutlet {
        outlet: Outlet {
            name: name.to_string(),
            address: Some("12 MG Road".to_string()),
            latitude: Some(lat),
            longitude: Some(lng),
            city: Some("Chhindwara".to_string()),
            district: None,
            state: Some("MP".to_string()),
            pincode: Some("480001".to_string()),
        },
        coordinate: Coordinate::new(lat, lng),
        distance_km: km,
    }
}

#[test]
fn ordinal_labels() {
    assert_eq!(render::ordinal_label(1), "1st Nearest");
    assert_eq!(render::ordinal_label(2), "2nd Nearest");
    assert_eq!(render::ordinal_label(3), "3rd Nearest");
    assert_eq!(render::ordinal_label(4), "4th Nearest");
    assert_eq!(render::ordinal_label(11), "11th Nearest");
    assert_eq!(render::ordinal_label(12), "12th Nearest");
    assert_eq!(render::ordinal_label(13), "13th Nearest");
    assert_eq!(render::ordinal_label(21), "21st Nearest");
    assert_eq!(render::ordinal_label(22), "22nd Nearest");
}

#[test]
fn render_table_lists_nearest_first() {
    let origin = Coordinate::new(22.0500, 78.9400);
    let rows = vec![
        ranked("Bharat Kirana", 22.0496, 78.9389, 0.12),
        ranked("Akash Traders", 22.0532, 78.9435, 0.50),
    ];
    let table = render::render_table(origin, &rows, None);

    let bharat = table.find("Bharat Kirana").expect("first outlet rendered");
    let akash = table.find("Akash Traders").expect("second outlet rendered");
    assert!(bharat < akash, "nearest outlet should come first:\n{table}");
    assert!(table.contains("1st Nearest"));
    assert!(table.contains("0.12"));
}

#[test]
fn render_table_handles_empty_ranking() {
    let origin = Coordinate::new(22.0, 78.0);
    let table = render::render_table(origin, &[], None);
    assert!(table.contains("no outlets"));
}

#[test]
fn csv_export_has_header_and_route_url() {
    let origin = Coordinate::new(22.0500, 78.9400);
    let rows = vec![ranked("Akash Traders", 22.0532, 78.9435, 0.5034)];

    let mut buf = Vec::new();
    render::write_csv(&mut buf, origin, &rows, Some(TravelMode::Driving))
        .expect("csv should write");
    let out = String::from_utf8(buf).expect("csv is utf-8");

    let mut lines = out.lines();
    assert_eq!(
        lines.next(),
        Some("rank,name,distance_km,route_url,address,city,district,state,pincode")
    );
    let row = lines.next().expect("one data row");
    assert!(row.starts_with("1,Akash Traders,0.5,"));
    assert!(row.contains("origin=22.05,78.94&destination=22.0532,78.9435&travelmode=driving"));
}

#[test]
fn csv_export_with_no_rows_still_has_header() {
    let origin = Coordinate::new(22.0500, 78.9400);

    let mut buf = Vec::new();
    render::write_csv(&mut buf, origin, &[], None).expect("csv should write");
    let out = String::from_utf8(buf).expect("csv is utf-8");

    let mut lines = out.lines();
    assert_eq!(
        lines.next(),
        Some("rank,name,distance_km,route_url,address,city,district,state,pincode")
    );
    assert_eq!(lines.next(), None);
}
