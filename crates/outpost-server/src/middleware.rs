use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Email allow-list settings used by middleware.
#[derive(Debug, Clone)]
pub struct AllowListState {
    emails: Arc<HashSet<String>>,
    pub enabled: bool,
}

impl AllowListState {
    /// Builds the allow-list gate from the configured email list.
    ///
    /// In development, an empty list disables the gate for local iteration.
    /// In non-development envs, an empty list fails startup.
    ///
    /// # Errors
    ///
    /// Returns an error outside development when no emails are configured.
    pub fn new(allowed_emails: &[String], is_development: bool) -> anyhow::Result<Self> {
        let emails: HashSet<String> = allowed_emails
            .iter()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        if emails.is_empty() {
            if is_development {
                tracing::warn!(
                    "OUTPOST_ALLOWED_EMAILS not set; email gate disabled in development environment"
                );
                return Ok(Self {
                    emails: Arc::new(HashSet::new()),
                    enabled: false,
                });
            }

            anyhow::bail!(
                "OUTPOST_ALLOWED_EMAILS is required outside development; provide comma-separated addresses"
            );
        }

        Ok(Self {
            emails: Arc::new(emails),
            enabled: true,
        })
    }

    fn allows(&self, email: &str) -> bool {
        self.emails.contains(email)
    }
}

#[derive(Debug, Serialize)]
struct MiddlewareErrorBody {
    error: MiddlewareError,
}

#[derive(Debug, Serialize)]
struct MiddlewareError {
    code: &'static str,
    message: &'static str,
}

impl IntoResponse for MiddlewareErrorBody {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(self)).into_response()
    }
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware enforcing the email allow-list when enabled.
///
/// The caller identifies itself with an `x-user-email` header; comparison
/// is case-insensitive on a trimmed value.
pub async fn require_allowed_email(
    State(allow_list): State<AllowListState>,
    req: Request,
    next: Next,
) -> Response {
    if !allow_list.enabled {
        return next.run(req).await;
    }

    let email = extract_email(req.headers().get("x-user-email"));

    match email {
        Some(email) if allow_list.allows(&email) => next.run(req).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(MiddlewareErrorBody {
                error: MiddlewareError {
                    code: "unauthorized",
                    message: "email is missing or not on the allow-list",
                },
            }),
        )
            .into_response(),
    }
}

fn extract_email(value: Option<&HeaderValue>) -> Option<String> {
    value
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}
