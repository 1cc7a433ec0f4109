//! Multishop Core - Shared types and content composition.
//!
//! This crate provides the domain model used across all Multishop components:
//! - `storefront` - Public-facing content and catalog API
//! - `cli` - Command-line tools for schema evolution and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. Everything here can be tested without a database.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, slugs, statuses and store-scoping rules
//! - [`content`] - Pages, blog posts and slug resolution outcomes
//! - [`landing`] - Landing page sections and the composer
//! - [`settings`] - Site settings with JSON/legacy fallback and menus

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod content;
pub mod landing;
pub mod settings;
pub mod types;

pub use content::{BlogPost, Page, ResolvedContent};
pub use landing::{LandingPage, LandingPageModel, SectionKey};
pub use settings::SiteSettings;
pub use types::*;
