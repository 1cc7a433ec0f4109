//! Slug enumeration for the sitemap.

use multishop_core::StoreId;

use super::{Database, RepositoryError, SitemapCatalog, SitemapRow, SitemapSource};

/// Visible rows of one source. `DISTINCT ON (slug)` with `store_id NULLS
/// LAST` keeps the store's own row when a global row shares its slug.
fn rows_query(source: SitemapSource) -> String {
    format!(
        r"
        SELECT DISTINCT ON (slug) slug, store_id, updated_at
        FROM {table}
        WHERE {visible} AND (store_id = $1 OR store_id IS NULL)
        ORDER BY slug, store_id NULLS LAST
        ",
        table = source.table(),
        visible = source.visible_predicate(),
    )
}

impl SitemapCatalog for Database {
    async fn sitemap_rows(
        &self,
        source: SitemapSource,
        store: Option<StoreId>,
    ) -> Result<Vec<SitemapRow>, RepositoryError> {
        let sql = rows_query(source);
        let rows = sqlx::query_as::<_, SitemapRow>(&sql)
            .bind(store.map(|s| s.as_i32()))
            .fetch_all(self.pool())
            .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_source_has_a_query() {
        for source in SitemapSource::ALL {
            let sql = rows_query(source);
            assert!(sql.contains(source.table()));
            assert!(sql.contains("NULLS LAST"));
        }
        assert!(rows_query(SitemapSource::LandingPage).contains("is_active"));
        assert!(rows_query(SitemapSource::Product).contains("status = 'published'"));
    }
}
