use super::{GeocodingProvider, ProviderKind, ProviderOutcome};
use crate::error::{Result, ServiceError};
use crate::models::AddressRecord;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

/// Client for the Geoapify-shaped forward-geocoding API.
pub struct GeoapifyClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeoapifyClient {
    pub fn new(client: Client, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeoapifyResponse {
    #[serde(default)]
    features: Vec<GeoapifyFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoapifyFeature {
    properties: GeoapifyProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GeoapifyProperties {
    country: String,
    state_code: String,
    county: String,
    city: String,
    postcode: String,
    street: String,
    housenumber: String,
    formatted: String,
}

#[async_trait]
impl GeocodingProvider for GeoapifyClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Geoapify
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.base_url.is_empty()
    }

    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<ProviderOutcome> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("text", address), ("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::ProviderStatus {
                provider: "geoapify",
                status,
                body,
            });
        }

        let payload: GeoapifyResponse = response.json().await?;
        let Some(feature) = payload.features.into_iter().next() else {
            debug!("geoapify returned no features");
            return Ok(ProviderOutcome::Empty);
        };

        let props = feature.properties;
        Ok(ProviderOutcome::Found(AddressRecord {
            street: props.street,
            number: props.housenumber,
            city: props.city,
            state: props.state_code,
            postal_code: props.postcode,
            county: props.county,
            country: props.country,
            formatted: props.formatted,
        }))
    }
}
