//! Core types for Multishop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod ident;
pub mod scope;
pub mod slug;
pub mod status;

pub use id::*;
pub use ident::{Identifier, IdentifierError};
pub use scope::{StoreScoped, is_visible_to, prefer_store_specific};
pub use slug::{Slug, SlugError};
pub use status::ContentStatus;
