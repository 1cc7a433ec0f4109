//! Store (tenant) lookups.

use multishop_core::StoreId;

use super::{Database, RepositoryError, StoreDirectory};

impl StoreDirectory for Database {
    async fn store_for_domain(&self, domain: &str) -> Result<Option<StoreId>, RepositoryError> {
        let id: Option<i32> = sqlx::query_scalar(
            r"
            SELECT id FROM stores
            WHERE LOWER(domain) = LOWER($1) AND is_active
            ORDER BY id
            LIMIT 1
            ",
        )
        .bind(domain)
        .fetch_optional(self.pool())
        .await?;

        Ok(id.map(StoreId::new))
    }
}
