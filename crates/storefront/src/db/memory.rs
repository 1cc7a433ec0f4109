//! In-memory stand-in for [`Database`](super::Database) used by unit tests.
//!
//! Applies the same visibility and store-preference rules as the SQL
//! queries and counts lookups so tests can assert when no query was made.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use multishop_core::{
    BlogId, BlogPost, ContentStatus, LandingPage, LandingPageId, Page, PageId, SiteSettings, Slug,
    StoreId, StoreScoped, prefer_store_specific,
};

use super::{
    ContentSource, RepositoryError, SettingsSource, SitemapCatalog, SitemapRow, SitemapSource,
    StoreDirectory,
};

/// Fixed timestamp for fixtures.
pub fn ts(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
}

/// A catalog row (product or category) as the sitemap sees it.
#[derive(Debug, Clone)]
pub struct CatalogRow {
    pub slug: String,
    pub store_id: Option<StoreId>,
    pub published: bool,
    pub updated_at: DateTime<Utc>,
}

impl StoreScoped for CatalogRow {
    fn store_id(&self) -> Option<StoreId> {
        self.store_id
    }
}

#[derive(Debug, Default)]
pub struct MemoryDatabase {
    pub pages: Vec<Page>,
    pub landing_pages: Vec<LandingPage>,
    pub blogs: Vec<BlogPost>,
    pub products: Vec<CatalogRow>,
    pub categories: Vec<CatalogRow>,
    pub stores: HashMap<String, StoreId>,
    pub settings: Mutex<HashMap<String, String>>,
    pub fail_reads: bool,
    pub lookups: AtomicUsize,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of content lookups performed so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn with_setting(self, key: &str, value: &str) -> Self {
        self.settings
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        self
    }

    fn touch(&self) -> Result<(), RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

/// A published page fixture.
pub fn page(id: i32, slug: &str, store: Option<i32>) -> Page {
    Page {
        id: PageId::new(id),
        slug: Slug::parse(slug).unwrap(),
        store_id: store.map(StoreId::new),
        title: format!("Page {slug}"),
        content: format!("<p>{slug}</p>"),
        meta_description: None,
        status: ContentStatus::Published,
        updated_at: ts(1),
    }
}

/// An active landing page fixture with no section data.
pub fn landing_page(id: i32, slug: &str, store: Option<i32>) -> LandingPage {
    LandingPage {
        id: LandingPageId::new(id),
        slug: Slug::parse(slug).unwrap(),
        store_id: store.map(StoreId::new),
        title: format!("Landing {slug}"),
        is_active: true,
        sections: std::collections::BTreeMap::new(),
        visibility: std::collections::BTreeMap::new(),
        section_order: None,
        legacy: multishop_core::landing::LegacyFields::new(),
        updated_at: ts(2),
    }
}

/// A published blog post fixture.
pub fn blog(id: i32, slug: &str, store: Option<i32>) -> BlogPost {
    BlogPost {
        id: BlogId::new(id),
        slug: Slug::parse(slug).unwrap(),
        store_id: store.map(StoreId::new),
        title: format!("Post {slug}"),
        excerpt: None,
        content: String::new(),
        featured_image: None,
        status: ContentStatus::Published,
        created_at: ts(3),
        updated_at: ts(3),
    }
}

/// A published catalog row fixture.
pub fn catalog(slug: &str, store: Option<i32>) -> CatalogRow {
    CatalogRow {
        slug: slug.to_owned(),
        store_id: store.map(StoreId::new),
        published: true,
        updated_at: ts(4),
    }
}

fn visible_match<T, F>(rows: &[T], slug: &Slug, store: Option<StoreId>, visible: F) -> Option<T>
where
    T: StoreScoped + Clone + HasSlug,
    F: Fn(&T) -> bool,
{
    let candidates = rows.iter().filter(|r| r.slug() == slug && visible(*r));
    prefer_store_specific(candidates, store).cloned()
}

trait HasSlug {
    fn slug(&self) -> &Slug;
}

impl HasSlug for Page {
    fn slug(&self) -> &Slug {
        &self.slug
    }
}

impl HasSlug for LandingPage {
    fn slug(&self) -> &Slug {
        &self.slug
    }
}

impl HasSlug for BlogPost {
    fn slug(&self) -> &Slug {
        &self.slug
    }
}

impl ContentSource for MemoryDatabase {
    async fn find_page(
        &self,
        slug: &Slug,
        store: Option<StoreId>,
    ) -> Result<Option<Page>, RepositoryError> {
        self.touch()?;
        Ok(visible_match(&self.pages, slug, store, |p| p.status.is_visible()))
    }

    async fn find_landing_page(
        &self,
        slug: &Slug,
        store: Option<StoreId>,
    ) -> Result<Option<LandingPage>, RepositoryError> {
        self.touch()?;
        Ok(visible_match(&self.landing_pages, slug, store, |p| p.is_active))
    }

    async fn find_blog(
        &self,
        slug: &Slug,
        store: Option<StoreId>,
    ) -> Result<Option<BlogPost>, RepositoryError> {
        self.touch()?;
        Ok(visible_match(&self.blogs, slug, store, |b| b.status.is_visible()))
    }

    async fn recent_blogs(
        &self,
        store: Option<StoreId>,
        limit: i64,
    ) -> Result<Vec<BlogPost>, RepositoryError> {
        self.touch()?;
        let mut posts: Vec<BlogPost> = self
            .blogs
            .iter()
            .filter(|b| b.status.is_visible())
            .filter(|b| multishop_core::is_visible_to(b.store_id, store))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        posts.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(posts)
    }
}

impl SettingsSource for MemoryDatabase {
    async fn load_settings(&self) -> Result<SiteSettings, RepositoryError> {
        if self.fail_reads {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        let values = self.settings.lock().unwrap().clone();
        Ok(SiteSettings::from_pairs(values))
    }

    async fn put_setting(
        &self,
        key: &str,
        value: &str,
        overwrite: bool,
    ) -> Result<bool, RepositoryError> {
        let mut settings = self.settings.lock().unwrap();
        if settings.contains_key(key) && !overwrite {
            return Ok(false);
        }
        settings.insert(key.to_owned(), value.to_owned());
        Ok(true)
    }
}

impl StoreDirectory for MemoryDatabase {
    async fn store_for_domain(&self, domain: &str) -> Result<Option<StoreId>, RepositoryError> {
        Ok(self.stores.get(&domain.to_lowercase()).copied())
    }
}

fn dedupe_rows<T, F>(rows: &[T], store: Option<StoreId>, project: F) -> Vec<SitemapRow>
where
    T: StoreScoped,
    F: Fn(&T) -> Option<SitemapRow>,
{
    let mut by_slug: HashMap<String, Vec<SitemapRow>> = HashMap::new();
    for row in rows {
        if let Some(projected) = project(row) {
            by_slug.entry(projected.slug.clone()).or_default().push(projected);
        }
    }
    let mut out: Vec<SitemapRow> = by_slug
        .into_values()
        .filter_map(|candidates| prefer_store_specific(candidates, store))
        .collect();
    out.sort_by(|a, b| a.slug.cmp(&b.slug));
    out
}

impl SitemapCatalog for MemoryDatabase {
    async fn sitemap_rows(
        &self,
        source: SitemapSource,
        store: Option<StoreId>,
    ) -> Result<Vec<SitemapRow>, RepositoryError> {
        if self.fail_reads {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        let rows = match source {
            SitemapSource::Page => dedupe_rows(&self.pages, store, |p| {
                p.status.is_visible().then(|| SitemapRow {
                    slug: p.slug.to_string(),
                    store_id: p.store_id,
                    updated_at: p.updated_at,
                })
            }),
            SitemapSource::LandingPage => dedupe_rows(&self.landing_pages, store, |p| {
                p.is_active.then(|| SitemapRow {
                    slug: p.slug.to_string(),
                    store_id: p.store_id,
                    updated_at: p.updated_at,
                })
            }),
            SitemapSource::Blog => dedupe_rows(&self.blogs, store, |b| {
                b.status.is_visible().then(|| SitemapRow {
                    slug: b.slug.to_string(),
                    store_id: b.store_id,
                    updated_at: b.updated_at,
                })
            }),
            SitemapSource::Product | SitemapSource::Category => {
                let rows = if source == SitemapSource::Product {
                    &self.products
                } else {
                    &self.categories
                };
                dedupe_rows(rows, store, |c| {
                    c.published.then(|| SitemapRow {
                        slug: c.slug.clone(),
                        store_id: c.store_id,
                        updated_at: c.updated_at,
                    })
                })
            }
        };
        Ok(rows)
    }
}
