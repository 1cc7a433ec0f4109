//! Integration tests for Multishop.
//!
//! # Running Tests
//!
//! ```bash
//! # Apply the schema to a running PostgreSQL
//! cargo run -p multishop-cli -- migrate run
//!
//! # Start the storefront, then run the ignored tests
//! cargo run -p multishop-storefront &
//! cargo test -p multishop-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_routing` - HTTP tests against a running storefront
//! - `schema_idempotence` - Migration runs against a scratch database
//! - `content_preference` - Store-over-global lookups against a scratch database

use secrecy::SecretString;

/// Base URL of the running storefront (`STOREFRONT_BASE_URL`).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Connection string for a database the tests may freely change.
///
/// Reads `TEST_DATABASE_URL`, falling back to `DATABASE_URL`.
#[must_use]
pub fn test_database_url() -> Option<SecretString> {
    std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .map(SecretString::from)
}
