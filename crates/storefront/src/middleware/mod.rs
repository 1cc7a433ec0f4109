//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with `request_id` and `store_id` fields)
//! 3. Request ID (add unique ID to each request)
//! 4. Path normalization (`/about/` is served as `/about`)
//!
//! [`RequestContext`] is an extractor rather than a layer: handlers that
//! need the current store ask for it.

pub mod context;
pub mod request_id;

pub use context::RequestContext;
pub use request_id::request_id_middleware;
