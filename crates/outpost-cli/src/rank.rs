//! Rank command handler.

use std::path::Path;

use outpost_core::{rank_by_distance, AppConfig, TravelMode};
use outpost_extract::Extractor;

use crate::render;

/// Extract the reference coordinate, rank every outlet against it, and
/// print the nearest-to-farthest table. Optionally writes the same rows
/// as CSV.
///
/// # Errors
///
/// Returns an error if the outlets file cannot be loaded, extraction
/// fails (empty input, failed short-link expansion, unrecognized format),
/// or the CSV file cannot be written.
pub(crate) async fn run_rank(
    config: &AppConfig,
    location: &str,
    outlets_override: Option<&Path>,
    csv_out: Option<&Path>,
    mode: Option<TravelMode>,
) -> anyhow::Result<()> {
    let outlets_path = outlets_override.unwrap_or(&config.outlets_path);
    let outlets = outpost_core::load_outlets(outlets_path)?;
    tracing::info!(
        path = %outlets_path.display(),
        count = outlets.len(),
        "loaded outlets"
    );

    let extractor = Extractor::new(config.expand_timeout_secs, &config.user_agent)?;
    let reference = extractor.extract(location).await?;
    tracing::info!(latitude = reference.latitude, longitude = reference.longitude, "reference coordinate resolved");

    let ranked = rank_by_distance(reference, &outlets);
    let skipped = outlets.len() - ranked.len();
    if skipped > 0 {
        tracing::warn!(skipped, "outlets without coordinates were excluded");
    }

    print!("{}", render::render_table(reference, &ranked, mode));

    if let Some(path) = csv_out {
        let mut file = std::fs::File::create(path)?;
        render::write_csv(&mut file, reference, &ranked, mode)?;
        println!("wrote {} rows to {}", ranked.len(), path.display());
    }

    Ok(())
}
