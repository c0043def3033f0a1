use super::{GeocodingProvider, ProviderKind, ProviderOutcome};
use crate::error::{Result, ServiceError};
use crate::models::AddressRecord;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

/// Client for the Smarty-shaped US autocomplete API.
pub struct SmartyClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SmartyClient {
    pub fn new(client: Client, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SmartyResponse {
    #[serde(default)]
    suggestions: Vec<SmartySuggestion>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SmartySuggestion {
    street_line: String,
    secondary: String,
    city: String,
    state: String,
    zipcode: String,
    entries: i64,
}

/// Split a street line into (number, street). The first token is the
/// number only when it is entirely digits and dashes.
fn split_street_line(street_line: &str) -> (String, String) {
    let mut parts = street_line.split_whitespace();
    let Some(first) = parts.next() else {
        return (String::new(), String::new());
    };

    if is_house_number(first) {
        (first.to_string(), parts.collect::<Vec<_>>().join(" "))
    } else {
        (String::new(), street_line.to_string())
    }
}

fn is_house_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit() || c == '-')
}

fn format_suggestion(suggestion: &SmartySuggestion) -> String {
    let mut parts = vec![suggestion.street_line.clone()];
    if !suggestion.secondary.is_empty() {
        parts.push(suggestion.secondary.clone());
    }
    parts.push(format!(
        "{}, {} {}",
        suggestion.city, suggestion.state, suggestion.zipcode
    ));
    parts.join(", ")
}

#[async_trait]
impl GeocodingProvider for SmartyClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Smarty
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.base_url.is_empty()
    }

    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<ProviderOutcome> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("search", address),
                ("max_results", "1"),
                ("license", "us-autocomplete-pro-cloud"),
            ])
            .header("Referer", "localhost:3000")
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::ProviderStatus {
                provider: "smarty",
                status,
                body,
            });
        }

        let payload: SmartyResponse = response.json().await?;
        let Some(suggestion) = payload.suggestions.into_iter().next() else {
            debug!("smarty returned no suggestions");
            return Ok(ProviderOutcome::Empty);
        };

        debug!(entries = suggestion.entries, "smarty suggestion accepted");
        let formatted = format_suggestion(&suggestion);
        let (number, street) = split_street_line(&suggestion.street_line);

        Ok(ProviderOutcome::Found(AddressRecord {
            street,
            number,
            city: suggestion.city,
            state: suggestion.state,
            postal_code: suggestion.zipcode,
            county: String::new(),
            country: "United States".to_string(),
            formatted,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_street_line_with_number() {
        assert_eq!(
            split_street_line("123 Main Street"),
            ("123".to_string(), "Main Street".to_string())
        );
        assert_eq!(
            split_street_line("12-14 Elm Avenue"),
            ("12-14".to_string(), "Elm Avenue".to_string())
        );
    }

    #[test]
    fn test_split_street_line_without_number() {
        assert_eq!(
            split_street_line("Broadway"),
            (String::new(), "Broadway".to_string())
        );
        // "One" is not digits-and-dashes, so the line passes through whole
        assert_eq!(
            split_street_line("One Market Plaza"),
            (String::new(), "One Market Plaza".to_string())
        );
    }

    #[test]
    fn test_split_street_line_number_only() {
        assert_eq!(split_street_line("123"), ("123".to_string(), String::new()));
        assert_eq!(split_street_line(""), (String::new(), String::new()));
    }

    #[test]
    fn test_format_suggestion_with_and_without_secondary() {
        let mut suggestion = SmartySuggestion {
            street_line: "123 Main St".to_string(),
            secondary: String::new(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            zipcode: "78701".to_string(),
            entries: 1,
        };
        assert_eq!(format_suggestion(&suggestion), "123 Main St, Austin, TX 78701");

        suggestion.secondary = "Apt 4".to_string();
        assert_eq!(
            format_suggestion(&suggestion),
            "123 Main St, Apt 4, Austin, TX 78701"
        );
    }
}
