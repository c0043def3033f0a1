use serde::{Deserialize, Serialize};

/// Inbound payload for `POST /api/v1/validate-address`.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateAddressRequest {
    pub address: String,
}

/// Structured address components resolved by a geocoding provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub street: String,
    pub number: String,
    pub city: String,
    /// Canonical two-letter abbreviation when the provider supplies one.
    pub state: String,
    pub postal_code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub county: String,
    pub country: String,
    pub formatted: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Wire shape returned by the validation endpoint. Exactly one of `data`
/// and `error` is populated; `corrections` is serialized only when the
/// normalization pipeline actually changed something.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateAddressResponse {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AddressRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub corrections: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidateAddressResponse {
    pub fn success(data: AddressRecord, corrections: Vec<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(data),
            corrections,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
            corrections: Vec::new(),
            error: Some(message.into()),
        }
    }
}

/// Result of running the normalization pipeline over a raw address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedInput {
    /// The input exactly as received, byte for byte.
    pub original: String,
    pub normalized: String,
    /// One human-readable entry per token replacement, in application order.
    pub changes: Vec<String>,
}
