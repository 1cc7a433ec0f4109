//! Schema evolution.
//!
//! Installations in the field run every generation of the storefront schema,
//! from the original flat `landing_pages` columns to the per-section JSON
//! layout. Instead of versioned migration files, each named migration is a
//! list of idempotent [`Step`]s that inspect the live schema and only change
//! what is missing:
//!
//! - [`Step::EnsureTable`] creates a table (and seeds it) if absent
//! - [`Step::EnsureColumn`] adds a column if absent
//! - [`Step::EnsureIndex`] creates an index if absent
//! - [`Step::SeedDefaults`] inserts rows, skipping keys that already exist
//! - [`Step::RecreateTable`] drops and re-creates a table (destructive)
//!
//! Steps are not wrapped in a transaction. The [`runner`] executes them best
//! effort and returns a [`MigrationReport`](runner::MigrationReport).
//!
//! Identifiers are spliced into DDL, so every name in a plan is validated as
//! an [`Identifier`] before any SQL is rendered. Values are always bound.

pub mod migrations;
mod postgres;
pub mod runner;

use std::fmt;
use std::future::Future;

use multishop_core::{Identifier, IdentifierError};
use thiserror::Error;

pub use migrations::{Migration, find, registry};
pub use runner::{MigrationReport, RunOptions, StepOutcome, StepReport, run};

/// Errors raised while inspecting or changing the schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid identifier: {0}")]
    Identifier(#[from] IdentifierError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("unknown migration: {0}")]
    UnknownMigration(String),
}

/// A column in a table definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    /// Type and constraints, e.g. `TEXT NOT NULL DEFAULT ''`.
    pub definition: String,
}

impl ColumnDef {
    #[must_use]
    pub fn new(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
        }
    }
}

/// A row inserted by a seed step: `(column, value)` pairs, values bound as text.
pub type SeedRow = Vec<(String, String)>;

/// A table definition with the rows seeded on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    /// Table-level constraints, e.g. `UNIQUE NULLS NOT DISTINCT (slug, store_id)`.
    pub constraints: Vec<String>,
    pub seeds: Vec<SeedRow>,
}

impl TableDef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            constraints: Vec::new(),
            seeds: Vec::new(),
        }
    }

    #[must_use]
    pub fn column(mut self, name: impl Into<String>, definition: impl Into<String>) -> Self {
        self.columns.push(ColumnDef::new(name, definition));
        self
    }

    #[must_use]
    pub fn constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    #[must_use]
    pub fn seed(mut self, row: SeedRow) -> Self {
        self.seeds.push(row);
        self
    }

    /// Validate every name in the definition.
    ///
    /// # Errors
    ///
    /// Returns the first invalid identifier.
    pub fn validate(&self) -> Result<(), IdentifierError> {
        Identifier::parse(&self.name)?;
        for column in &self.columns {
            Identifier::parse(&column.name)?;
        }
        validate_seeds(&self.seeds)
    }
}

/// An index definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDef {
    pub name: String,
    pub table: String,
    pub columns: Vec<String>,
}

impl IndexDef {
    #[must_use]
    pub fn new(name: &str, table: &str, columns: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            table: table.to_owned(),
            columns: columns.iter().map(|c| (*c).to_owned()).collect(),
        }
    }

    /// Validate every name in the definition.
    ///
    /// # Errors
    ///
    /// Returns the first invalid identifier.
    pub fn validate(&self) -> Result<(), IdentifierError> {
        Identifier::parse(&self.name)?;
        Identifier::parse(&self.table)?;
        if self.columns.is_empty() {
            return Err(IdentifierError::Empty);
        }
        for column in &self.columns {
            Identifier::parse(column)?;
        }
        Ok(())
    }
}

fn validate_seeds(rows: &[SeedRow]) -> Result<(), IdentifierError> {
    for row in rows {
        if row.is_empty() {
            return Err(IdentifierError::Empty);
        }
        for (column, _) in row {
            Identifier::parse(column)?;
        }
    }
    Ok(())
}

/// One idempotent unit of schema work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    EnsureTable(TableDef),
    EnsureColumn { table: String, column: ColumnDef },
    EnsureIndex(IndexDef),
    SeedDefaults { table: String, rows: Vec<SeedRow> },
    RecreateTable(TableDef),
}

impl Step {
    /// Whether running the step can lose data.
    #[must_use]
    pub const fn is_destructive(&self) -> bool {
        matches!(self, Self::RecreateTable(_))
    }

    /// Validate every identifier the step would splice into SQL.
    ///
    /// # Errors
    ///
    /// Returns the first invalid identifier.
    pub fn validate(&self) -> Result<(), IdentifierError> {
        match self {
            Self::EnsureTable(table) | Self::RecreateTable(table) => table.validate(),
            Self::EnsureColumn { table, column } => {
                Identifier::parse(table)?;
                Identifier::parse(&column.name)?;
                Ok(())
            }
            Self::EnsureIndex(index) => index.validate(),
            Self::SeedDefaults { table, rows } => {
                Identifier::parse(table)?;
                validate_seeds(rows)
            }
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnsureTable(table) => write!(f, "ensure table {}", table.name),
            Self::EnsureColumn { table, column } => {
                write!(f, "ensure column {table}.{}", column.name)
            }
            Self::EnsureIndex(index) => write!(f, "ensure index {}", index.name),
            Self::SeedDefaults { table, rows } => {
                write!(f, "seed {} default row(s) into {table}", rows.len())
            }
            Self::RecreateTable(table) => write!(f, "recreate table {}", table.name),
        }
    }
}

/// Live schema inspection and change operations.
///
/// Implementations receive definitions that already passed validation, but
/// must still only splice names obtained through [`Identifier`].
pub trait SchemaCatalog {
    fn table_exists(
        &self,
        table: &Identifier,
    ) -> impl Future<Output = Result<bool, SchemaError>> + Send;

    fn column_exists(
        &self,
        table: &Identifier,
        column: &Identifier,
    ) -> impl Future<Output = Result<bool, SchemaError>> + Send;

    fn index_exists(
        &self,
        index: &Identifier,
    ) -> impl Future<Output = Result<bool, SchemaError>> + Send;

    fn create_table(&self, table: &TableDef)
    -> impl Future<Output = Result<(), SchemaError>> + Send;

    fn add_column(
        &self,
        table: &Identifier,
        column: &ColumnDef,
    ) -> impl Future<Output = Result<(), SchemaError>> + Send;

    fn create_index(&self, index: &IndexDef)
    -> impl Future<Output = Result<(), SchemaError>> + Send;

    fn drop_table(&self, table: &Identifier)
    -> impl Future<Output = Result<(), SchemaError>> + Send;

    /// Insert a row unless it conflicts with an existing one.
    ///
    /// Returns whether the row was inserted.
    fn insert_row(
        &self,
        table: &Identifier,
        row: &SeedRow,
    ) -> impl Future<Output = Result<bool, SchemaError>> + Send;
}
