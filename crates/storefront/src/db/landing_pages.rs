//! Landing page lookups.
//!
//! Landing pages span two schema generations: per-section JSON columns
//! (`hero_data`, `show_hero`, `section_order`, ...) and the older flat
//! columns (`hero_title`, `banner_image`, ...). A database may have either,
//! both, or a partially migrated mix, so rows are read with `SELECT *` and
//! every optional column is looked up by name, treating a missing column
//! like a `NULL`.

use chrono::{DateTime, Utc};
use multishop_core::landing::{LEGACY_COLUMNS, LegacyFields};
use multishop_core::{LandingPage, LandingPageId, SectionKey, Slug, StoreId};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{RepositoryError, stored_slug};

const FIND_ACTIVE: &str = r"
    SELECT *
    FROM landing_pages
    WHERE slug = $1 AND is_active AND (store_id = $2 OR store_id IS NULL)
    ORDER BY store_id NULLS LAST
    LIMIT 1
";

/// Find the active landing page for `slug`, preferring the store's own row.
pub(super) async fn find_active(
    pool: &PgPool,
    slug: &Slug,
    store: Option<StoreId>,
) -> Result<Option<LandingPage>, RepositoryError> {
    let row = sqlx::query(FIND_ACTIVE)
        .bind(slug.as_str())
        .bind(store.map(|s| s.as_i32()))
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(landing_page_from_row).transpose()
}

fn landing_page_from_row(row: &PgRow) -> Result<LandingPage, RepositoryError> {
    let id: i32 = row.try_get("id")?;
    let slug: String = row.try_get("slug")?;
    let store_id: Option<i32> = row.try_get("store_id")?;
    let title: Option<String> = optional_column(row, "title")?.flatten();
    let is_active: bool = row.try_get("is_active")?;
    let updated_at: Option<DateTime<Utc>> = optional_column(row, "updated_at")?.flatten();

    let mut sections = std::collections::BTreeMap::new();
    let mut visibility = std::collections::BTreeMap::new();
    for key in SectionKey::DEFAULT_ORDER {
        if let Some(Some(blob)) = optional_column::<Option<String>>(row, &key.data_column())? {
            sections.insert(key, blob);
        }
        if let Some(Some(shown)) = optional_column::<Option<bool>>(row, &key.toggle_column())? {
            visibility.insert(key, shown);
        }
    }

    let mut legacy = LegacyFields::new();
    for column in LEGACY_COLUMNS {
        legacy.set(column, optional_column::<Option<String>>(row, column)?.flatten());
    }

    Ok(LandingPage {
        id: LandingPageId::new(id),
        slug: stored_slug(&slug)?,
        store_id: store_id.map(StoreId::new),
        title: title.unwrap_or_default(),
        is_active,
        sections,
        visibility,
        section_order: optional_column::<Option<String>>(row, "section_order")?.flatten(),
        legacy,
        updated_at: updated_at.unwrap_or_else(Utc::now),
    })
}

/// Read a column that may not exist on older schemas.
///
/// Returns `Ok(None)` when the column is absent.
fn optional_column<T>(row: &PgRow, column: &str) -> Result<Option<T>, RepositoryError>
where
    T: for<'r> sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    match row.try_get::<T, _>(column) {
        Ok(value) => Ok(Some(value)),
        Err(sqlx::Error::ColumnNotFound(_)) => Ok(None),
        Err(e) => Err(RepositoryError::Database(e)),
    }
}
