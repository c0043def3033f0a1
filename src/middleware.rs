//! Request middleware: bearer-token auth and content-type negotiation.
//! Rejection payloads mirror the `{"error": ..., "code": ...}` shape the
//! API has always produced.

use crate::server::AppState;
use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::debug;

fn reject(status: StatusCode, message: &str, code: u16) -> Response {
    (status, Json(json!({ "error": message, "code": code }))).into_response()
}

/// Requires `Authorization: Bearer <token>` matching the configured API
/// token on every request it wraps.
pub async fn bearer_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let Some(auth_header) = auth_header else {
        return reject(StatusCode::UNAUTHORIZED, "Authorization header required", 400);
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return reject(
            StatusCode::UNAUTHORIZED,
            "Invalid authorization format. Use: Bearer <token>",
            400,
        );
    };

    if token.is_empty() {
        return reject(StatusCode::UNAUTHORIZED, "Token is required", 401);
    }

    if token != state.api_token {
        debug!("rejected request with invalid bearer token");
        return reject(StatusCode::UNAUTHORIZED, "Invalid token", 401);
    }

    next.run(request).await
}

/// Enforces JSON in both directions: mutating requests must carry
/// `Content-Type: application/json`, and an `Accept` header, when present,
/// must admit JSON.
pub async fn validate_headers(request: Request, next: Next) -> Response {
    let method = request.method();
    if method == Method::POST || method == Method::PUT || method == Method::PATCH {
        let content_type = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        if content_type != "application/json" && !content_type.starts_with("application/json;") {
            return reject(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Content-Type must be application/json",
                415,
            );
        }
    }

    let accept = request
        .headers()
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if !accept.is_empty() && accept != "*/*" && !accept.contains("application/json") {
        return reject(
            StatusCode::NOT_ACCEPTABLE,
            "Accept header must include application/json",
            406,
        );
    }

    next.run(request).await
}
