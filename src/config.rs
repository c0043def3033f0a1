use crate::error::{Result, ServiceError};
use std::env;
use std::time::Duration;

const DEFAULT_GEOAPIFY_URL: &str = "https://api.geoapify.com/v1/geocode/search";
const DEFAULT_SMARTY_URL: &str = "https://us-autocomplete-pro.api.smarty.com/lookup";
const DEFAULT_CACHE_TTL_SECONDS: u64 = 86_400;

/// Runtime configuration, read from the environment (a `.env` file is
/// loaded by `main` before this runs). A provider with an empty key or
/// base URL is simply disabled.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub geocoding_a_api_key: String,
    pub geocoding_a_base_url: String,
    pub geocoding_b_api_key: String,
    pub geocoding_b_base_url: String,
    pub cache_ttl: Duration,
    pub environment: String,
    pub redis_host: String,
    pub redis_port: u16,
    pub redis_password: String,
    pub redis_db: i64,
    pub api_token: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_token = get_env("API_TOKEN", "");
        if api_token.is_empty() {
            return Err(ServiceError::Config(
                "API_TOKEN environment variable is required".to_string(),
            ));
        }

        Ok(Self {
            port: parse_or(&get_env("PORT", "3000"), 3000),
            geocoding_a_api_key: get_env("GEOCODING_A_API_KEY", ""),
            geocoding_a_base_url: get_env("GEOCODING_A_BASE_URL", DEFAULT_GEOAPIFY_URL),
            geocoding_b_api_key: get_env("GEOCODING_B_API_KEY", ""),
            geocoding_b_base_url: get_env("GEOCODING_B_BASE_URL", DEFAULT_SMARTY_URL),
            cache_ttl: Duration::from_secs(parse_or(
                &get_env("CACHE_TTL_SECONDS", ""),
                DEFAULT_CACHE_TTL_SECONDS,
            )),
            environment: get_env("ENVIRONMENT", "development"),
            redis_host: get_env("REDIS_HOST", "localhost"),
            redis_port: parse_or(&get_env("REDIS_PORT", "6379"), 6379),
            redis_password: get_env("REDIS_PASSWORD", ""),
            redis_db: parse_or(&get_env("REDIS_DB", "0"), 0),
            api_token,
        })
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_or<T: std::str::FromStr>(value: &str, default: T) -> T {
    value.parse().unwrap_or(default)
}
