use crate::middleware::{bearer_auth, validate_headers};
use crate::models::{ValidateAddressRequest, ValidateAddressResponse};
use crate::validator::ValidatorService;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode},
    middleware as axum_middleware,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<ValidatorService>,
    pub api_token: String,
    pub metrics: PrometheusHandle,
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "address-validator",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus text exposition
async fn metrics_text(State(state): State<AppState>) -> String {
    state.metrics.render()
}

async fn validate_address(
    State(state): State<AppState>,
    payload: Result<Json<ValidateAddressRequest>, JsonRejection>,
) -> (StatusCode, Json<ValidateAddressResponse>) {
    let request_id = Uuid::new_v4();

    let address = match payload {
        Ok(Json(request)) => request.address,
        Err(rejection) => {
            debug!(%request_id, error = %rejection, "rejected malformed request body");
            return bad_request();
        }
    };

    if address.trim().is_empty() {
        debug!(%request_id, "rejected empty address");
        return bad_request();
    }

    info!(%request_id, "validating address");
    let response = state.validator.validate_address(&address).await;
    (StatusCode::OK, Json(response))
}

fn bad_request() -> (StatusCode, Json<ValidateAddressResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ValidateAddressResponse::error(
            "Invalid request: address field is required",
        )),
    )
}

/// Create the HTTP server with all routes. The validate endpoint sits
/// behind bearer auth and JSON content negotiation; health and metrics
/// stay open.
pub fn create_server(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api = Router::new()
        .route("/validate-address", post(validate_address))
        .layer(axum_middleware::from_fn(validate_headers))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            bearer_auth,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .nest("/api/v1", api)
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the specified port
pub async fn start_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = create_server(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    println!("🚀 HTTP server running on http://localhost:{port}");
    println!("💚 Health check: http://localhost:{port}/health");

    axum::serve(listener, app).await?;

    Ok(())
}
