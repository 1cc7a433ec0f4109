//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::db::Database;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    database: Database,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `database` - Data-access handle
    #[must_use]
    pub fn new(config: StorefrontConfig, database: Database) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, database }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the data-access handle.
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.inner.database
    }

    /// Public base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.config.base_url
    }
}
