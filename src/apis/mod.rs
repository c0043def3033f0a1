//! External geocoding provider clients.

mod geoapify;
mod smarty;

pub use geoapify::GeoapifyClient;
pub use smarty::SmartyClient;

use crate::error::Result;
use crate::models::AddressRecord;
use async_trait::async_trait;
use std::fmt;

/// Identifies which provider produced a geocoding result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Geoapify,
    Smarty,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Geoapify => "geoapify",
            ProviderKind::Smarty => "smarty",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single provider lookup. Transport and decode failures
/// travel separately as errors.
#[derive(Debug, Clone)]
pub enum ProviderOutcome {
    /// The provider resolved the address to a record.
    Found(AddressRecord),
    /// The provider answered but had no candidates; the chain moves on.
    Empty,
}

/// One external geocoder. Implementations must be cheap to share across
/// request tasks.
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// False when the API key or base URL is missing; the chain skips
    /// unconfigured providers without counting them as failures.
    fn is_configured(&self) -> bool;

    async fn geocode(&self, address: &str) -> Result<ProviderOutcome>;
}
