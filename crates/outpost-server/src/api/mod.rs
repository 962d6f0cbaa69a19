mod rank;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use outpost_core::{Outlet, TravelMode};
use outpost_extract::Extractor;

use crate::middleware::{request_id, require_allowed_email, AllowListState, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub outlets: Arc<Vec<Outlet>>,
    pub extractor: Arc<Extractor>,
    pub travel_mode: Option<TravelMode>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    outlets: usize,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "empty_input" | "unrecognized_format" => StatusCode::BAD_REQUEST,
            "link_expansion_failed" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-user-email"),
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(allow_list: AllowListState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/rank", post(rank::rank_outlets))
        .route("/api/v1/rank/export", get(rank::export_csv))
        .layer(axum::middleware::from_fn_with_state(
            allow_list,
            require_allowed_email,
        ))
}

pub fn build_app(state: AppState, allow_list: AllowListState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(allow_list))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData {
                status: "ok",
                outlets: state.outlets.len(),
            },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use outpost_core::Outlet;

    fn outlet(name: &str, lat: Option<f64>, lng: Option<f64>) -> Outlet {
        Outlet {
            name: name.to_string(),
            address: None,
            latitude: lat,
            longitude: lng,
            city: None,
            district: None,
            state: None,
            pincode: None,
        }
    }

    fn sample_outlets() -> Vec<Outlet> {
        vec![
            outlet("A", Some(22.0532), Some(78.9435)),
            outlet("B", Some(22.0496), Some(78.9389)),
            outlet("C", Some(22.0603), Some(78.9521)),
            outlet("No Coords", Some(22.0), None),
        ]
    }

    fn gated_app(outlets: Vec<Outlet>) -> Router {
        let state = AppState {
            outlets: Arc::new(outlets),
            extractor: Arc::new(
                Extractor::new(5, "outpost-test/0.1")
                    .expect("client construction should not fail"),
            ),
            travel_mode: None,
        };
        let allow_list = AllowListState::new(&["ops@example.com".to_string()], false)
            .expect("allow-list should build");
        build_app(state, allow_list)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json parse")
    }

    fn rank_request(location: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/rank")
            .header("content-type", "application/json")
            .header("x-user-email", "ops@example.com")
            .body(Body::from(format!("{{\"location\":\"{location}\"}}")))
            .expect("request")
    }

    #[tokio::test]
    async fn rank_without_email_returns_401_envelope() {
        let app = gated_app(sample_outlets());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/rank")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"location":"22.05, 78.94"}"#))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"].as_str(), Some("unauthorized"));
    }

    #[tokio::test]
    async fn rank_returns_results_in_ascending_distance_order() {
        let app = gated_app(sample_outlets());
        let response = app
            .oneshot(rank_request("22.0500, 78.9400"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;

        let results = json["data"]["results"].as_array().expect("results array");
        let names: Vec<&str> = results
            .iter()
            .map(|r| r["name"].as_str().expect("name"))
            .collect();
        assert_eq!(names, ["B", "A", "C"]);

        let distances: Vec<f64> = results
            .iter()
            .map(|r| r["distance_km"].as_f64().expect("distance_km"))
            .collect();
        assert!(
            distances.windows(2).all(|w| w[0] <= w[1]),
            "distances not ascending: {distances:?}"
        );
        assert_eq!(
            json["data"]["skipped_without_coordinates"].as_u64(),
            Some(1)
        );
    }

    #[tokio::test]
    async fn rank_with_empty_location_returns_400_with_stable_code() {
        let app = gated_app(sample_outlets());
        let response = app.oneshot(rank_request("")).await.expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"].as_str(), Some("empty_input"));
    }

    #[tokio::test]
    async fn export_returns_csv_with_header_row() {
        let app = gated_app(sample_outlets());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/rank/export?location=22.0500,78.9400")
                    .header("x-user-email", "ops@example.com")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .expect("content-type header");
        assert!(content_type.starts_with("text/csv"), "got {content_type}");

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let text = String::from_utf8_lossy(&body);
        assert!(
            text.starts_with("rank,name,distance_km,route_url,"),
            "missing header row: {text}"
        );
    }

    #[tokio::test]
    async fn export_with_no_rankable_outlets_still_has_header_row() {
        let app = gated_app(vec![outlet("No Coords", None, None)]);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/rank/export?location=22.0500,78.9400")
                    .header("x-user-email", "ops@example.com")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let text = String::from_utf8_lossy(&body);
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("rank,name,distance_km,route_url,address,city,district,state,pincode")
        );
        assert_eq!(lines.next(), None);
    }

    #[tokio::test]
    async fn health_is_public_even_with_gate_enabled() {
        let app = gated_app(sample_outlets());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["status"].as_str(), Some("ok"));
        assert_eq!(json["data"]["outlets"].as_u64(), Some(4));
    }
}
