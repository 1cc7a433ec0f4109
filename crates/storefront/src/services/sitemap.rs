//! XML sitemap generation.

use std::collections::HashSet;

use askama::Template;
use multishop_core::{Slug, StoreId};
use tracing::{instrument, warn};

use crate::db::{RepositoryError, SitemapCatalog, SitemapRow, SitemapSource};

/// Paths listed for every store.
pub const STATIC_PATHS: [&str; 4] = ["/", "/products", "/categories", "/blog"];

/// One `<url>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub loc: String,
    /// `YYYY-MM-DD`, empty when unknown.
    pub lastmod: String,
}

#[derive(Template)]
#[template(path = "sitemap.xml")]
struct SitemapTemplate<'a> {
    entries: &'a [SitemapEntry],
}

/// Storefront path for a row of `source`.
fn path_for(source: SitemapSource, slug: &Slug) -> String {
    match source {
        SitemapSource::Product => format!("/product/{slug}"),
        SitemapSource::Category => format!("/category/{slug}"),
        SitemapSource::Blog => format!("/blog.php?slug={slug}"),
        SitemapSource::Page | SitemapSource::LandingPage => format!("/{slug}"),
    }
}

/// Collect every URL visible to `store`.
///
/// A URL is listed once even when several rows map to it (a page and a
/// landing page sharing a slug); the first source in
/// [`SitemapSource::ALL`] order wins, matching the content router.
///
/// # Errors
///
/// Returns `RepositoryError` if a source cannot be read.
#[instrument(skip(catalog))]
pub async fn entries<C: SitemapCatalog>(
    catalog: &C,
    base_url: &str,
    store: Option<StoreId>,
) -> Result<Vec<SitemapEntry>, RepositoryError> {
    let base = base_url.trim_end_matches('/');
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for path in STATIC_PATHS {
        seen.insert(path.to_owned());
        entries.push(SitemapEntry {
            loc: format!("{base}{path}"),
            lastmod: String::new(),
        });
    }

    for source in SitemapSource::ALL {
        for row in catalog.sitemap_rows(source, store).await? {
            let Some(path) = row_path(source, &row) else {
                continue;
            };
            if seen.insert(path.clone()) {
                entries.push(SitemapEntry {
                    loc: format!("{base}{path}"),
                    lastmod: row.updated_at.format("%Y-%m-%d").to_string(),
                });
            }
        }
    }

    Ok(entries)
}

fn row_path(source: SitemapSource, row: &SitemapRow) -> Option<String> {
    match Slug::parse(&row.slug) {
        Ok(slug) => Some(path_for(source, &slug)),
        Err(e) => {
            warn!(table = source.table(), slug = %row.slug, error = %e, "Skipping unroutable slug");
            None
        }
    }
}

/// Render entries as a sitemap document.
///
/// # Errors
///
/// Returns `askama::Error` if rendering fails.
pub fn render(entries: &[SitemapEntry]) -> Result<String, askama::Error> {
    SitemapTemplate { entries }.render()
}
