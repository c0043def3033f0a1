//! Metrics for the validation pipeline, following Prometheus naming
//! conventions. Recording is a no-op until an exporter is installed.

use std::fmt;

/// All metric names used by the service, to avoid magic strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    ValidateRequests,
    CacheHits,
    CacheMisses,
    ProviderSuccess,
    ProviderEmpty,
    ProviderError,
    GeocodeFailures,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::ValidateRequests => "addr_validate_requests_total",
            MetricName::CacheHits => "addr_cache_hits_total",
            MetricName::CacheMisses => "addr_cache_misses_total",
            MetricName::ProviderSuccess => "addr_provider_success_total",
            MetricName::ProviderEmpty => "addr_provider_empty_total",
            MetricName::ProviderError => "addr_provider_error_total",
            MetricName::GeocodeFailures => "addr_geocode_failures_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn validate_request() {
    metrics::counter!(MetricName::ValidateRequests.as_str()).increment(1);
}

pub fn cache_hit() {
    metrics::counter!(MetricName::CacheHits.as_str()).increment(1);
}

pub fn cache_miss() {
    metrics::counter!(MetricName::CacheMisses.as_str()).increment(1);
}

pub fn provider_success(provider: &'static str) {
    metrics::counter!(MetricName::ProviderSuccess.as_str(), "provider" => provider).increment(1);
}

pub fn provider_empty(provider: &'static str) {
    metrics::counter!(MetricName::ProviderEmpty.as_str(), "provider" => provider).increment(1);
}

pub fn provider_error(provider: &'static str) {
    metrics::counter!(MetricName::ProviderError.as_str(), "provider" => provider).increment(1);
}

pub fn geocode_failure() {
    metrics::counter!(MetricName::GeocodeFailures.as_str()).increment(1);
}
