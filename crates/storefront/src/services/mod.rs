//! Business logic services for storefront.
//!
//! Services are generic over the data-access traits in [`crate::db`] so they
//! run against [`Database`](crate::db::Database) in production and against
//! an in-memory double in tests.
//!
//! # Services
//!
//! - [`content_router`] - Resolve `/{slug}` to a page, landing page or blog post
//! - [`sitemap`] - Enumerate visible URLs and render `sitemap.xml`
//! - [`site`] - Site chrome (identity, menus, contact) from settings

pub mod content_router;
pub mod site;
pub mod sitemap;
