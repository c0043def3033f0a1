//! Main library crate for the address validation service

pub mod apis;
pub mod cache;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod geocoding;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod server;
pub mod validator;

// Re-export the types most callers need
pub use models::{AddressRecord, ValidateAddressRequest, ValidateAddressResponse};
