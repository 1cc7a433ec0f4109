//! Page and blog post lookups.

use chrono::{DateTime, Utc};
use multishop_core::{BlogId, BlogPost, Page, PageId, Slug, StoreId};

use super::{ContentSource, Database, RepositoryError, stored_slug, stored_status};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct PageRow {
    id: i32,
    slug: String,
    store_id: Option<i32>,
    title: String,
    content: Option<String>,
    meta_description: Option<String>,
    status: String,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PageRow> for Page {
    type Error = RepositoryError;

    fn try_from(row: PageRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PageId::new(row.id),
            slug: stored_slug(&row.slug)?,
            store_id: row.store_id.map(StoreId::new),
            title: row.title,
            content: row.content.unwrap_or_default(),
            meta_description: row.meta_description.filter(|m| !m.trim().is_empty()),
            status: stored_status(&row.status)?,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BlogRow {
    id: i32,
    slug: String,
    store_id: Option<i32>,
    title: String,
    excerpt: Option<String>,
    content: Option<String>,
    featured_image: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BlogRow> for BlogPost {
    type Error = RepositoryError;

    fn try_from(row: BlogRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BlogId::new(row.id),
            slug: stored_slug(&row.slug)?,
            store_id: row.store_id.map(StoreId::new),
            title: row.title,
            excerpt: row.excerpt.filter(|e| !e.trim().is_empty()),
            content: row.content.unwrap_or_default(),
            featured_image: row.featured_image.filter(|f| !f.trim().is_empty()),
            status: stored_status(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const FIND_PAGE: &str = r"
    SELECT id, slug, store_id, title, content, meta_description, status, updated_at
    FROM pages
    WHERE slug = $1 AND status = 'published' AND (store_id = $2 OR store_id IS NULL)
    ORDER BY store_id NULLS LAST
    LIMIT 1
";

const FIND_BLOG: &str = r"
    SELECT id, slug, store_id, title, excerpt, content, featured_image, status,
           created_at, updated_at
    FROM blogs
    WHERE slug = $1 AND status = 'published' AND (store_id = $2 OR store_id IS NULL)
    ORDER BY store_id NULLS LAST
    LIMIT 1
";

const RECENT_BLOGS: &str = r"
    SELECT id, slug, store_id, title, excerpt, content, featured_image, status,
           created_at, updated_at
    FROM blogs
    WHERE status = 'published' AND (store_id = $1 OR store_id IS NULL)
    ORDER BY created_at DESC, id DESC
    LIMIT $2
";

impl ContentSource for Database {
    async fn find_page(
        &self,
        slug: &Slug,
        store: Option<StoreId>,
    ) -> Result<Option<Page>, RepositoryError> {
        let row = sqlx::query_as::<_, PageRow>(FIND_PAGE)
            .bind(slug.as_str())
            .bind(store.map(|s| s.as_i32()))
            .fetch_optional(self.pool())
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_landing_page(
        &self,
        slug: &Slug,
        store: Option<StoreId>,
    ) -> Result<Option<multishop_core::LandingPage>, RepositoryError> {
        super::landing_pages::find_active(self.pool(), slug, store).await
    }

    async fn find_blog(
        &self,
        slug: &Slug,
        store: Option<StoreId>,
    ) -> Result<Option<BlogPost>, RepositoryError> {
        let row = sqlx::query_as::<_, BlogRow>(FIND_BLOG)
            .bind(slug.as_str())
            .bind(store.map(|s| s.as_i32()))
            .fetch_optional(self.pool())
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn recent_blogs(
        &self,
        store: Option<StoreId>,
        limit: i64,
    ) -> Result<Vec<BlogPost>, RepositoryError> {
        let rows = sqlx::query_as::<_, BlogRow>(RECENT_BLOGS)
            .bind(store.map(|s| s.as_i32()))
            .bind(limit)
            .fetch_all(self.pool())
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
