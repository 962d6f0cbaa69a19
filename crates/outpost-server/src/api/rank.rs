//! Rank endpoint: extract the reference coordinate, rank every configured
//! outlet against it, and return the ordered table as JSON or CSV.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use outpost_core::{rank_by_distance, route_url, Coordinate, RankedOutlet, TravelMode};
use outpost_extract::ExtractError;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct RankRequest {
    pub location: String,
    pub travel_mode: Option<TravelMode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ExportParams {
    pub location: String,
    pub travel_mode: Option<TravelMode>,
}

#[derive(Debug, Serialize)]
pub(super) struct RankData {
    pub reference: Coordinate,
    pub total_outlets: usize,
    pub skipped_without_coordinates: usize,
    pub results: Vec<RankItem>,
}

#[derive(Debug, Serialize)]
pub(super) struct RankItem {
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

pub(super) async fn rank_outlets(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<RankRequest>,
) -> Result<Json<ApiResponse<RankData>>, ApiError> {
    let reference = state
        .extractor
        .extract(&body.location)
        .await
        .map_err(|e| map_extract_error(req_id.0.clone(), &e))?;

    let mode = body.travel_mode.or(state.travel_mode);
    let ranked = rank_by_distance(reference, &state.outlets);
    let data = RankData {
        reference,
        total_outlets: state.outlets.len(),
        skipped_without_coordinates: state.outlets.len() - ranked.len(),
        results: build_rank_items(reference, &ranked, mode),
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn export_csv(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<ExportParams>,
) -> Result<Response, ApiError> {
    let reference = state
        .extractor
        .extract(&params.location)
        .await
        .map_err(|e| map_extract_error(req_id.0.clone(), &e))?;

    let mode = params.travel_mode.or(state.travel_mode);
    let ranked = rank_by_distance(reference, &state.outlets);
    let body = build_csv_body(reference, &ranked, mode)
        .map_err(|e| map_csv_error(req_id.0.clone(), &e))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"outlet-distances.csv\"",
            ),
        ],
        body,
    )
        .into_response())
}

fn build_rank_items(
    origin: Coordinate,
    ranked: &[RankedOutlet],
    mode: Option<TravelMode>,
) -> Vec<RankItem> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, r)| RankItem {
            rank: i + 1,
            name: r.outlet.name.clone(),
            distance_km: r.display_km(),
            route_url: route_url(origin, r.coordinate, mode),
            address: r.outlet.address.clone(),
            city: r.outlet.city.clone(),
            district: r.outlet.district.clone(),
            state: r.outlet.state.clone(),
            pincode: r.outlet.pincode.clone(),
        })
        .collect()
}

/// CSV column names, matching [`RankItem`]'s field order. Written
/// explicitly so an all-outlets-missing list still exports a header row.
const CSV_HEADER: [&str; 9] = [
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

fn build_csv_body(
    origin: Coordinate,
    ranked: &[RankedOutlet],
    mode: Option<TravelMode>,
) -> csv::Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;
    for item in build_rank_items(origin, ranked, mode) {
        wtr.serialize(item)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn map_extract_error(request_id: String, error: &ExtractError) -> ApiError {
    let code = match error {
        ExtractError::EmptyInput => "empty_input",
        ExtractError::LinkExpansionFailed { .. } => "link_expansion_failed",
        ExtractError::UnrecognizedFormat { .. } => "unrecognized_format",
    };
    tracing::debug!(error = %error, code, "location extraction failed");
    ApiError::new(request_id, code, error.to_string())
}

fn map_csv_error(request_id: String, error: &csv::Error) -> ApiError {
    tracing::error!(error = %error, "csv export failed");
    ApiError::new(request_id, "internal_error", "csv export failed")
}
