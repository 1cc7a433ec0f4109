//! Site settings storage.

use multishop_core::SiteSettings;

use super::{Database, RepositoryError, SettingsSource};

impl SettingsSource for Database {
    async fn load_settings(&self) -> Result<SiteSettings, RepositoryError> {
        let rows: Vec<(String, Option<String>)> =
            sqlx::query_as("SELECT key, value FROM site_settings")
                .fetch_all(self.pool())
                .await?;

        Ok(SiteSettings::from_pairs(
            rows.into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v))),
        ))
    }

    async fn put_setting(
        &self,
        key: &str,
        value: &str,
        overwrite: bool,
    ) -> Result<bool, RepositoryError> {
        let sql = if overwrite {
            r"
            INSERT INTO site_settings (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            "
        } else {
            r"
            INSERT INTO site_settings (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO NOTHING
            "
        };

        let result = sqlx::query(sql)
            .bind(key)
            .bind(value)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
