//! Slug resolution.
//!
//! A storefront URL `/{slug}` may name a custom page, a landing page or a
//! blog post. Candidates are tried in that order and the first visible match
//! wins, so a page shadows a landing page with the same slug.

use multishop_core::landing::compose;
use multishop_core::{
    BlogPost, LandingPageModel, Page, ResolvedContent, Slug, StoreId,
};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::db::{ContentSource, RepositoryError, SettingsSource};

/// Resolve a raw request slug for `store`.
///
/// The slug is sanitized first; if nothing valid is left the result is
/// [`ResolvedContent::NotFound`] without touching the database.
///
/// # Errors
///
/// Returns `RepositoryError` if a lookup fails.
#[instrument(skip(source))]
pub async fn resolve<S: ContentSource>(
    source: &S,
    raw_slug: &str,
    store: Option<StoreId>,
) -> Result<ResolvedContent, RepositoryError> {
    let slug = match Slug::sanitize(raw_slug) {
        Ok(slug) => slug,
        Err(e) => {
            debug!(error = %e, "Rejected slug");
            return Ok(ResolvedContent::NotFound);
        }
    };

    resolve_slug(source, &slug, store).await
}

/// Resolve an already valid slug for `store`.
///
/// # Errors
///
/// Returns `RepositoryError` if a lookup fails.
pub async fn resolve_slug<S: ContentSource>(
    source: &S,
    slug: &Slug,
    store: Option<StoreId>,
) -> Result<ResolvedContent, RepositoryError> {
    if let Some(page) = source.find_page(slug, store).await? {
        return Ok(ResolvedContent::Page(page));
    }
    if let Some(landing) = source.find_landing_page(slug, store).await? {
        return Ok(ResolvedContent::LandingPage(Box::new(landing)));
    }
    if let Some(blog) = source.find_blog(slug, store).await? {
        return Ok(ResolvedContent::Blog(blog));
    }
    Ok(ResolvedContent::NotFound)
}

/// Resolve the home page: the content named by the `homepage_slug` setting.
///
/// # Errors
///
/// Returns `RepositoryError` if settings or a lookup fail.
pub async fn resolve_home<S: ContentSource + SettingsSource>(
    source: &S,
    store: Option<StoreId>,
) -> Result<ResolvedContent, RepositoryError> {
    let settings = source.load_settings().await?;
    resolve(source, settings.homepage_slug(), store).await
}

/// Rendering model returned by the content routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentView {
    Page(Page),
    LandingPage(LandingPageModel),
    Blog(BlogPost),
}

impl ContentView {
    /// Build the rendering model; `None` for [`ResolvedContent::NotFound`].
    #[must_use]
    pub fn from_resolved(resolved: ResolvedContent) -> Option<Self> {
        match resolved {
            ResolvedContent::Page(page) => Some(Self::Page(page)),
            ResolvedContent::LandingPage(landing) => Some(Self::LandingPage(compose(&landing))),
            ResolvedContent::Blog(blog) => Some(Self::Blog(blog)),
            ResolvedContent::NotFound => None,
        }
    }
}
