//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home content (setting `homepage_slug`)
//! GET  /{slug}                 - Page, landing page or blog post
//!
//! # Blog
//! GET  /blog                   - Recent posts
//! GET  /blog.php?slug=...      - Single post
//!
//! # SEO
//! GET  /sitemap.xml            - XML sitemap
//! GET  /sitemap.php            - Same, legacy URL
//!
//! # API
//! GET  /api/site               - Site chrome (identity, menus, contact, currencies)
//! ```
//!
//! Health checks (`/health`, `/health/ready`) are mounted by the binary.
//! Every handler takes a [`RequestContext`](crate::middleware::RequestContext)
//! to know which store it serves.

pub mod blog;
pub mod content;
pub mod site;
pub mod sitemap;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the blog routes router.
pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/blog", get(blog::index))
        .route("/blog.php", get(blog::show))
}

/// Create all routes for the storefront.
///
/// Fixed paths are registered before the `/{slug}` catch-all; axum prefers
/// static segments, so `/blog` never reaches the content router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(content::home))
        .merge(blog_routes())
        .route("/sitemap.xml", get(sitemap::sitemap))
        .route("/sitemap.php", get(sitemap::sitemap))
        .route("/api/site", get(site::site))
        .route("/{slug}", get(content::show))
}
