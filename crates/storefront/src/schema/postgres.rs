//! `PostgreSQL` implementation of [`SchemaCatalog`].
//!
//! Existence checks go through `information_schema` and `pg_indexes`, scoped
//! to `current_schema()`. DDL additionally uses `IF [NOT] EXISTS` so a
//! concurrent run racing past the check still succeeds.

use multishop_core::{Identifier, IdentifierError};

use super::{ColumnDef, IndexDef, SchemaCatalog, SchemaError, SeedRow, TableDef};
use crate::db::Database;

pub(super) fn create_table_sql(table: &TableDef) -> Result<String, IdentifierError> {
    let name = Identifier::parse(&table.name)?;
    let mut lines = Vec::with_capacity(table.columns.len() + table.constraints.len());
    for column in &table.columns {
        lines.push(format!(
            "    {} {}",
            Identifier::parse(&column.name)?,
            column.definition
        ));
    }
    for constraint in &table.constraints {
        lines.push(format!("    {constraint}"));
    }
    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {name} (\n{}\n)",
        lines.join(",\n")
    ))
}

pub(super) fn add_column_sql(table: &Identifier, column: &ColumnDef) -> Result<String, IdentifierError> {
    Ok(format!(
        "ALTER TABLE {table} ADD COLUMN IF NOT EXISTS {} {}",
        Identifier::parse(&column.name)?,
        column.definition
    ))
}

pub(super) fn create_index_sql(index: &IndexDef) -> Result<String, IdentifierError> {
    index.validate()?;
    Ok(format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
        index.name,
        index.table,
        index.columns.join(", ")
    ))
}

pub(super) fn drop_table_sql(table: &Identifier) -> String {
    format!("DROP TABLE IF EXISTS {table}")
}

pub(super) fn insert_row_sql(table: &Identifier, row: &SeedRow) -> Result<String, IdentifierError> {
    let columns = row
        .iter()
        .map(|(column, _)| Identifier::parse(column).map(|c| c.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    let placeholders = (1..=columns.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>();
    Ok(format!(
        "INSERT INTO {table} ({}) VALUES ({}) ON CONFLICT DO NOTHING",
        columns.join(", "),
        placeholders.join(", ")
    ))
}

impl SchemaCatalog for Database {
    async fn table_exists(&self, table: &Identifier) -> Result<bool, SchemaError> {
        let exists: bool = sqlx::query_scalar(
            r"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = current_schema() AND table_name = $1
            )
            ",
        )
        .bind(table.as_str())
        .fetch_one(self.pool())
        .await?;
        Ok(exists)
    }

    async fn column_exists(
        &self,
        table: &Identifier,
        column: &Identifier,
    ) -> Result<bool, SchemaError> {
        let exists: bool = sqlx::query_scalar(
            r"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.columns
                WHERE table_schema = current_schema()
                  AND table_name = $1 AND column_name = $2
            )
            ",
        )
        .bind(table.as_str())
        .bind(column.as_str())
        .fetch_one(self.pool())
        .await?;
        Ok(exists)
    }

    async fn index_exists(&self, index: &Identifier) -> Result<bool, SchemaError> {
        let exists: bool = sqlx::query_scalar(
            r"
            SELECT EXISTS (
                SELECT 1 FROM pg_indexes
                WHERE schemaname = current_schema() AND indexname = $1
            )
            ",
        )
        .bind(index.as_str())
        .fetch_one(self.pool())
        .await?;
        Ok(exists)
    }

    async fn create_table(&self, table: &TableDef) -> Result<(), SchemaError> {
        let sql = create_table_sql(table)?;
        sqlx::query(&sql).execute(self.pool()).await?;
        Ok(())
    }

    async fn add_column(&self, table: &Identifier, column: &ColumnDef) -> Result<(), SchemaError> {
        let sql = add_column_sql(table, column)?;
        sqlx::query(&sql).execute(self.pool()).await?;
        Ok(())
    }

    async fn create_index(&self, index: &IndexDef) -> Result<(), SchemaError> {
        let sql = create_index_sql(index)?;
        sqlx::query(&sql).execute(self.pool()).await?;
        Ok(())
    }

    async fn drop_table(&self, table: &Identifier) -> Result<(), SchemaError> {
        sqlx::query(&drop_table_sql(table))
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn insert_row(&self, table: &Identifier, row: &SeedRow) -> Result<bool, SchemaError> {
        let sql = insert_row_sql(table, row)?;
        let mut query = sqlx::query(&sql);
        for (_, value) in row {
            query = query.bind(value.as_str());
        }
        let result = query.execute(self.pool()).await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ident(s: &str) -> Identifier {
        Identifier::parse(s).unwrap()
    }

    #[test]
    fn test_create_table_sql() {
        let table = TableDef::new("pages")
            .column("id", "SERIAL PRIMARY KEY")
            .column("slug", "VARCHAR(255) NOT NULL")
            .constraint("UNIQUE NULLS NOT DISTINCT (slug, store_id)");
        assert_eq!(
            create_table_sql(&table).unwrap(),
            "CREATE TABLE IF NOT EXISTS pages (\n    id SERIAL PRIMARY KEY,\n    \
             slug VARCHAR(255) NOT NULL,\n    UNIQUE NULLS NOT DISTINCT (slug, store_id)\n)"
        );
    }

    #[test]
    fn test_add_column_sql() {
        let sql = add_column_sql(
            &ident("landing_pages"),
            &ColumnDef::new("show_hero", "BOOLEAN NOT NULL DEFAULT TRUE"),
        )
        .unwrap();
        assert_eq!(
            sql,
            "ALTER TABLE landing_pages ADD COLUMN IF NOT EXISTS show_hero BOOLEAN NOT NULL DEFAULT TRUE"
        );
    }

    #[test]
    fn test_create_index_sql() {
        let index = IndexDef::new("idx_pages_store_id", "pages", &["store_id", "slug"]);
        assert_eq!(
            create_index_sql(&index).unwrap(),
            "CREATE INDEX IF NOT EXISTS idx_pages_store_id ON pages (store_id, slug)"
        );
    }

    #[test]
    fn test_insert_row_sql_binds_values() {
        let row = vec![
            ("key".to_owned(), "site_name".to_owned()),
            ("value".to_owned(), "Robert'); DROP TABLE stores;--".to_owned()),
        ];
        let sql = insert_row_sql(&ident("site_settings"), &row).unwrap();
        assert_eq!(
            sql,
            "INSERT INTO site_settings (key, value) VALUES ($1, $2) ON CONFLICT DO NOTHING"
        );
    }

    #[test]
    fn test_invalid_names_never_render() {
        let table = TableDef::new("pages").column("bad name", "TEXT");
        assert!(create_table_sql(&table).is_err());
        let bad = vec![("value); --".to_owned(), "x".to_owned())];
        assert!(insert_row_sql(&ident("site_settings"), &bad).is_err());
    }
}
