//! Address validation: normalization pipeline, cache lookups, and the
//! geocoding hand-off.

use crate::cache::Cache;
use crate::dictionary::{
    find_closest_match, normalize_us_state, COMMON_CITY_NAMES, COMMON_STREET_TYPES,
    DIRECTION_ABBREVIATIONS, STREET_ABBREVIATIONS,
};
use crate::geocoding::Geocoder;
use crate::models::{NormalizedInput, ValidateAddressResponse};
use crate::observability::metrics;
use md5::{Digest, Md5};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Street-name words that sit within edit distance 2 of a street type and
/// must never be "corrected" (e.g. "main" is one edit from "lane").
const COMMON_ADDRESS_WORDS: &[&str] = &[
    "main", "park", "oak", "pine", "maple", "elm", "cedar", "lake", "hill", "view", "center",
    "first", "second", "third", "north", "south", "east", "west", "new", "old", "grand", "high",
    "spring",
];

pub struct ValidatorService {
    geocoder: Arc<dyn Geocoder>,
    cache: Arc<dyn Cache>,
}

impl ValidatorService {
    pub fn new(geocoder: Arc<dyn Geocoder>, cache: Arc<dyn Cache>) -> Self {
        Self { geocoder, cache }
    }

    /// Normalize, consult the cache, geocode on a miss, cache the result.
    /// Resolution failures come back as `status=error` responses rather
    /// than errors; corrections are only returned on success.
    #[instrument(skip(self))]
    pub async fn validate_address(&self, address: &str) -> ValidateAddressResponse {
        metrics::validate_request();

        let normalized = normalize_input(address);
        let key = generate_cache_key(&normalized.normalized);

        if let Some(value) = self.cache.get(&key).await {
            match serde_json::from_value::<ValidateAddressResponse>(value) {
                Ok(response) => {
                    metrics::cache_hit();
                    debug!(key = %key, "cache hit");
                    return response;
                }
                Err(err) => {
                    warn!(key = %key, error = %err, "cached value has the wrong shape, treating as miss")
                }
            }
        }
        metrics::cache_miss();

        let resolved = match self.geocoder.geocode(&normalized.normalized).await {
            Ok(resolved) => resolved,
            Err(err) => {
                return ValidateAddressResponse::error(format!(
                    "Failed to validate address: {err}"
                ));
            }
        };

        let response = ValidateAddressResponse::success(resolved.record, normalized.changes);

        if let Ok(value) = serde_json::to_value(&response) {
            self.cache.set(&key, value).await;
        }

        response
    }
}

/// The cache key depends only on the lowercased normalized form, so
/// differently-typoed spellings of one address share an entry.
pub fn generate_cache_key(address: &str) -> String {
    let digest = Md5::digest(address.to_lowercase().as_bytes());
    format!("addr:{}", hex::encode(digest))
}

/// Three passes over whitespace-split tokens: expand abbreviations, fix
/// typos against the street-type and city dictionaries, canonicalize the
/// state. Each replacement appends one human-readable entry to `changes`.
pub fn normalize_input(input: &str) -> NormalizedInput {
    let original = input.to_string();
    let mut changes = Vec::new();
    let mut words: Vec<String> = input.split_whitespace().map(str::to_string).collect();

    // Pass 1: street and direction abbreviations, bare ("st"), dotted
    // ("st.") and comma-suffixed ("blvd,") forms.
    for word in &mut words {
        let lower = word.to_lowercase();
        let lookup = |token: &str| {
            STREET_ABBREVIATIONS
                .get(token)
                .or_else(|| DIRECTION_ABBREVIATIONS.get(token))
                .copied()
        };

        if let Some(expansion) = lookup(&lower) {
            changes.push(format!("{word} → {expansion}"));
            *word = expansion.to_string();
        } else if let Some(stripped) = lower.strip_suffix(',') {
            if let Some(expansion) = lookup(stripped) {
                // The comma stays on the token but out of the change log
                changes.push(format!("{} → {expansion}", word.trim_end_matches(',')));
                *word = format!("{expansion},");
            }
        }
    }

    // Pass 2: bounded edit-distance correction, street types first, city
    // names for longer tokens.
    for i in 0..words.len() {
        let word = words[i].clone();
        let core = word.trim_end_matches([',', '.']).to_lowercase();

        if core.len() < 4 || is_numeric(&core) {
            continue;
        }

        if let Some(m) = find_closest_match(&core, COMMON_STREET_TYPES, 2) {
            if core != m && !COMMON_ADDRESS_WORDS.contains(&core.as_str()) {
                let suffix = if word.ends_with(',') {
                    ","
                } else if word.ends_with('.') {
                    "."
                } else {
                    ""
                };
                let replacement = format!("{m}{suffix}");
                changes.push(format!("{word} → {replacement} (typo correction)"));
                words[i] = replacement;
                continue;
            }
        }

        if core.len() > 5 {
            if let Some(m) = find_closest_match(&core, COMMON_CITY_NAMES, 2) {
                if core != m {
                    let suffix = if word.ends_with(',') { "," } else { "" };
                    let replacement = format!("{m}{suffix}");
                    changes.push(format!("{word} → {replacement} (city correction)"));
                    words[i] = replacement;
                }
            }
        }
    }

    // Pass 3: canonicalize tokens that sit where a state belongs.
    for i in 0..words.len() {
        let word = words[i].clone();
        let core = word.trim_end_matches([',', '.']).to_lowercase();

        let after_comma = i > 0 && words[i - 1].ends_with(',');
        let at_end = i == words.len() - 1;
        let likely_state =
            (core.len() == 2 && (after_comma || at_end)) || (after_comma && core.len() > 3);

        if !likely_state {
            continue;
        }

        if let Some(abbrev) = normalize_us_state(&core) {
            if !word.eq_ignore_ascii_case(abbrev) {
                changes.push(format!("{word} → {abbrev} (state)"));
                words[i] = abbrev.to_string();
            }
        }
    }

    let joined = words.join(" ");
    let normalized = WHITESPACE.replace_all(&joined, " ").trim().to_string();

    NormalizedInput {
        original,
        normalized,
        changes,
    }
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
