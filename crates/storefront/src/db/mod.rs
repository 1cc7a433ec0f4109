//! Database access for the storefront `PostgreSQL`.
//!
//! # Tables
//!
//! - `stores` - Tenants, mapped from the request host
//! - `pages` - Custom CMS pages
//! - `landing_pages` - Section-based landing pages (JSON blobs + legacy columns)
//! - `blogs` - Blog posts
//! - `site_settings` - Key/value settings, some values JSON-encoded
//! - `products`, `categories` - Catalog rows (slugs only matter here)
//!
//! Every content table carries a nullable `store_id`: `NULL` rows are global
//! defaults shared by all stores. Lookups see `store_id = $store OR store_id
//! IS NULL` and prefer the store's own row.
//!
//! # Migrations
//!
//! The schema is evolved by the runner in [`crate::schema`], invoked through:
//! ```bash
//! cargo run -p multishop-cli -- migrate run
//! ```
//!
//! # Data access seams
//!
//! [`Database`] is the single handle shared by the read path and the schema
//! runner. The read path only sees it through the traits below so handlers
//! and services can be exercised against an in-memory double in tests.

mod content;
mod landing_pages;
#[cfg(test)]
pub mod memory;
mod settings;
mod sitemap;
mod stores;

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use multishop_core::{BlogPost, LandingPage, Page, SiteSettings, Slug, StoreId};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Shared data-access handle over the storefront database.
///
/// Cheap to clone; clones share the underlying pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using a database URL.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the connection cannot be established.
    pub async fn connect(database_url: &secrecy::SecretString) -> Result<Self, sqlx::Error> {
        Ok(Self::new(create_pool(database_url).await?))
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Read access to routable content.
///
/// Every lookup returns only storefront-visible rows (published pages and
/// posts, active landing pages) for `store`, preferring the store's own row
/// over a global one.
pub trait ContentSource {
    /// Find a published page by slug.
    fn find_page(
        &self,
        slug: &Slug,
        store: Option<StoreId>,
    ) -> impl Future<Output = Result<Option<Page>, RepositoryError>> + Send;

    /// Find an active landing page by slug.
    fn find_landing_page(
        &self,
        slug: &Slug,
        store: Option<StoreId>,
    ) -> impl Future<Output = Result<Option<LandingPage>, RepositoryError>> + Send;

    /// Find a published blog post by slug.
    fn find_blog(
        &self,
        slug: &Slug,
        store: Option<StoreId>,
    ) -> impl Future<Output = Result<Option<BlogPost>, RepositoryError>> + Send;

    /// Most recent published posts, newest first.
    fn recent_blogs(
        &self,
        store: Option<StoreId>,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<BlogPost>, RepositoryError>> + Send;
}

/// Read and write access to `site_settings`.
pub trait SettingsSource {
    /// Load every setting into a snapshot.
    fn load_settings(&self) -> impl Future<Output = Result<SiteSettings, RepositoryError>> + Send;

    /// Store a setting. Existing keys are only replaced when `overwrite` is set.
    ///
    /// Returns whether a row was written.
    fn put_setting(
        &self,
        key: &str,
        value: &str,
        overwrite: bool,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send;
}

/// Maps request hosts to stores.
pub trait StoreDirectory {
    /// Find the active store serving `domain`.
    fn store_for_domain(
        &self,
        domain: &str,
    ) -> impl Future<Output = Result<Option<StoreId>, RepositoryError>> + Send;
}

/// Kinds of rows listed in the sitemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SitemapSource {
    Product,
    Category,
    Blog,
    Page,
    LandingPage,
}

impl SitemapSource {
    /// Every source, in sitemap order.
    pub const ALL: [Self; 5] = [
        Self::Page,
        Self::LandingPage,
        Self::Category,
        Self::Product,
        Self::Blog,
    ];

    /// Backing table.
    #[must_use]
    pub const fn table(&self) -> &'static str {
        match self {
            Self::Product => "products",
            Self::Category => "categories",
            Self::Blog => "blogs",
            Self::Page => "pages",
            Self::LandingPage => "landing_pages",
        }
    }

    /// SQL predicate selecting storefront-visible rows.
    #[must_use]
    pub const fn visible_predicate(&self) -> &'static str {
        match self {
            Self::LandingPage => "is_active",
            _ => "status = 'published'",
        }
    }
}

/// A slug listed in the sitemap with its last modification time.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SitemapRow {
    pub slug: String,
    pub store_id: Option<StoreId>,
    pub updated_at: DateTime<Utc>,
}

impl multishop_core::StoreScoped for SitemapRow {
    fn store_id(&self) -> Option<StoreId> {
        self.store_id
    }
}

/// Enumerates visible slugs for the sitemap.
pub trait SitemapCatalog {
    /// Visible rows of `source` for `store`, one per slug (store row preferred).
    fn sitemap_rows(
        &self,
        source: SitemapSource,
        store: Option<StoreId>,
    ) -> impl Future<Output = Result<Vec<SitemapRow>, RepositoryError>> + Send;
}

/// Parse a slug read back from the database.
fn stored_slug(raw: &str) -> Result<Slug, RepositoryError> {
    Slug::parse(raw)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid slug {raw:?} in database: {e}")))
}

/// Parse a content status read back from the database.
fn stored_status(raw: &str) -> Result<multishop_core::ContentStatus, RepositoryError> {
    raw.parse()
        .map_err(|e: String| RepositoryError::DataCorruption(e))
}
