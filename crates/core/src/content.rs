//! Storefront content entities.
//!
//! These are read-only views of rows owned by the admin side. Each one is
//! [`StoreScoped`] so lookups can apply the store-preference rule.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::landing::LandingPage;
use crate::types::{BlogId, ContentStatus, PageId, Slug, StoreId, StoreScoped};

/// A custom CMS page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub id: PageId,
    pub slug: Slug,
    pub store_id: Option<StoreId>,
    pub title: String,
    pub content: String,
    pub meta_description: Option<String>,
    pub status: ContentStatus,
    pub updated_at: DateTime<Utc>,
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogPost {
    pub id: BlogId,
    pub slug: Slug,
    pub store_id: Option<StoreId>,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub featured_image: Option<String>,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoreScoped for Page {
    fn store_id(&self) -> Option<StoreId> {
        self.store_id
    }
}

impl StoreScoped for BlogPost {
    fn store_id(&self) -> Option<StoreId> {
        self.store_id
    }
}

/// Outcome of resolving a slug for a store.
///
/// Candidates are checked in declaration order: a page shadows a landing
/// page with the same slug, which in turn shadows a blog post.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedContent {
    Page(Page),
    LandingPage(Box<LandingPage>),
    Blog(BlogPost),
    NotFound,
}

impl ResolvedContent {
    /// Short label used in logs and response bodies.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Page(_) => "page",
            Self::LandingPage(_) => "landing_page",
            Self::Blog(_) => "blog",
            Self::NotFound => "not_found",
        }
    }
}
