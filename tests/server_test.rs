//! Handler-level tests: auth, content negotiation, and response envelopes,
//! driving the router directly with `tower::ServiceExt`.

use address_validator::apis::ProviderKind;
use address_validator::cache::{Cache, InMemoryCache};
use address_validator::error::{Result, ServiceError};
use address_validator::geocoding::{Geocoder, Resolved};
use address_validator::models::{AddressRecord, ResponseStatus, ValidateAddressResponse};
use address_validator::server::{create_server, AppState};
use address_validator::validator::ValidatorService;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tower::ServiceExt;

const TEST_TOKEN: &str = "test-token";

fn test_record() -> AddressRecord {
    AddressRecord {
        street: "Main Street".to_string(),
        number: "123".to_string(),
        city: "Austin".to_string(),
        state: "TX".to_string(),
        postal_code: "78701".to_string(),
        county: String::new(),
        country: "United States".to_string(),
        formatted: "123 Main Street, Austin, TX 78701".to_string(),
    }
}

struct StaticGeocoder;

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, _address: &str) -> Result<Resolved> {
        Ok(Resolved {
            record: test_record(),
            provider: ProviderKind::Geoapify,
        })
    }
}

struct FailingGeocoder;

#[async_trait]
impl Geocoder for FailingGeocoder {
    async fn geocode(&self, _address: &str) -> Result<Resolved> {
        Err(ServiceError::AllProvidersFailed)
    }
}

fn app_with(geocoder: Arc<dyn Geocoder>) -> Router {
    let cache = Arc::new(InMemoryCache::new()) as Arc<dyn Cache>;
    let state = AppState {
        validator: Arc::new(ValidatorService::new(geocoder, cache)),
        api_token: TEST_TOKEN.to_string(),
        metrics: PrometheusBuilder::new().build_recorder().handle(),
    };
    create_server(state)
}

fn app() -> Router {
    app_with(Arc::new(StaticGeocoder))
}

fn validate_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/validate-address")
        .header(header::AUTHORIZATION, format!("Bearer {TEST_TOKEN}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_body(response: axum::response::Response) -> ValidateAddressResponse {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_is_open() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_authorization_header() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/validate-address")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"address":"123 Main St"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_authorization_scheme() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/validate-address")
                .header(header::AUTHORIZATION, "Basic abc123")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"address":"123 Main St"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/validate-address")
                .header(header::AUTHORIZATION, "Bearer wrong-token")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"address":"123 Main St"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_content_type() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/validate-address")
                .header(header::AUTHORIZATION, format!("Bearer {TEST_TOKEN}"))
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from(r#"{"address":"123 Main St"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_non_json_accept_header() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/validate-address")
                .header(header::AUTHORIZATION, format!("Bearer {TEST_TOKEN}"))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ACCEPT, "text/html")
                .body(Body::from(r#"{"address":"123 Main St"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn test_empty_address_is_bad_request() {
    let response = app()
        .oneshot(validate_request(r#"{"address":"   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_body(response).await;
    assert_eq!(body.status, ResponseStatus::Error);
    assert!(body.data.is_none());
}

#[tokio::test]
async fn test_missing_address_field_is_bad_request() {
    let response = app()
        .oneshot(validate_request(r#"{"street":"123 Main St"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_successful_validation_envelope() {
    let response = app()
        .oneshot(validate_request(r#"{"address":"123 Main Stret"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_body(response).await;
    assert_eq!(body.status, ResponseStatus::Success);
    assert_eq!(body.data, Some(test_record()));
    assert_eq!(body.corrections, vec!["Stret → street (typo correction)"]);
    assert!(body.error.is_none());
}

#[tokio::test]
async fn test_corrections_key_is_omitted_when_empty() {
    let response = app()
        .oneshot(validate_request(r#"{"address":"123 Main Street"}"#))
        .await
        .unwrap();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let raw: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(raw.get("corrections").is_none());
    assert!(raw.get("error").is_none());
}

#[tokio::test]
async fn test_resolver_failure_maps_to_error_envelope() {
    let response = app_with(Arc::new(FailingGeocoder))
        .oneshot(validate_request(r#"{"address":"123 Main Stret"}"#))
        .await
        .unwrap();

    // Resolution failures keep HTTP 200; the envelope carries the error
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_body(response).await;
    assert_eq!(body.status, ResponseStatus::Error);
    assert!(body.error.is_some());
    assert!(body.data.is_none());
}
