//! Provider-chain resolution: try each configured geocoder in order and
//! take the first hit.

use crate::apis::{
    GeoapifyClient, GeocodingProvider, ProviderKind, ProviderOutcome, SmartyClient,
};
use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::models::AddressRecord;
use crate::observability::metrics;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Hard ceiling on each outbound provider call.
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// A successfully resolved address and the provider that produced it.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub record: AddressRecord,
    pub provider: ProviderKind,
}

/// Resolves a normalized address to structured components.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Resolved>;
}

/// Ordered chain of geocoding providers. Unconfigured providers are
/// skipped; per-provider failures and empty answers fall through to the
/// next entry; only an exhausted chain is an error.
pub struct GeocodingService {
    providers: Vec<Arc<dyn GeocodingProvider>>,
}

impl GeocodingService {
    pub fn new(providers: Vec<Arc<dyn GeocodingProvider>>) -> Self {
        Self { providers }
    }

    /// Build the production chain from configuration: Geoapify first,
    /// Smarty as fallback, sharing one HTTP client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(PROVIDER_TIMEOUT)
            .build()?;

        Ok(Self::new(vec![
            Arc::new(GeoapifyClient::new(
                client.clone(),
                config.geocoding_a_api_key.clone(),
                config.geocoding_a_base_url.clone(),
            )),
            Arc::new(SmartyClient::new(
                client,
                config.geocoding_b_api_key.clone(),
                config.geocoding_b_base_url.clone(),
            )),
        ]))
    }
}

#[async_trait]
impl Geocoder for GeocodingService {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Resolved> {
        for provider in &self.providers {
            if !provider.is_configured() {
                continue;
            }

            match provider.geocode(address).await {
                Ok(ProviderOutcome::Found(record)) => {
                    metrics::provider_success(provider.kind().as_str());
                    info!(provider = %provider.kind(), "address resolved");
                    return Ok(Resolved {
                        record,
                        provider: provider.kind(),
                    });
                }
                Ok(ProviderOutcome::Empty) => {
                    metrics::provider_empty(provider.kind().as_str());
                    warn!(provider = %provider.kind(), "no results, trying fallback");
                }
                Err(err) => {
                    metrics::provider_error(provider.kind().as_str());
                    warn!(provider = %provider.kind(), error = %err, "provider failed, trying fallback");
                }
            }
        }

        metrics::geocode_failure();
        Err(ServiceError::AllProvidersFailed)
    }
}
