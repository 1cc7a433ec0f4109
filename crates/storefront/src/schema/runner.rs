//! Best-effort migration runner.
//!
//! Each step is checked, applied if needed, and its outcome recorded. A
//! failing step is logged and reported but never stops the remaining steps;
//! statements commit one by one, so a partial run leaves every successful
//! step in place and a re-run only retries what is still missing.

use std::fmt;

use multishop_core::Identifier;
use tracing::{error, info, warn};

use super::{Migration, SchemaCatalog, SchemaError, Step, TableDef};

/// Options controlling a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Execute steps that can lose data (table re-creation).
    pub allow_destructive: bool,
}

/// What happened to a single step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The schema was changed or rows were inserted.
    Applied,
    /// Nothing to do; the schema already had it.
    AlreadyPresent,
    /// Not executed (destructive step without permission).
    Skipped,
    /// The step errored; the reason is the error message.
    Failed(String),
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => f.write_str("applied"),
            Self::AlreadyPresent => f.write_str("already present"),
            Self::Skipped => f.write_str("skipped"),
            Self::Failed(reason) => write!(f, "FAILED: {reason}"),
        }
    }
}

/// Outcome of one step of one migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub migration: &'static str,
    pub step: String,
    pub outcome: StepOutcome,
}

/// Outcome of a whole run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub steps: Vec<StepReport>,
}

impl MigrationReport {
    /// Whether any step failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.steps
            .iter()
            .any(|s| matches!(s.outcome, StepOutcome::Failed(_)))
    }

    /// Number of steps with the given outcome kind.
    #[must_use]
    pub fn count(&self, outcome: &StepOutcome) -> usize {
        self.steps
            .iter()
            .filter(|s| std::mem::discriminant(&s.outcome) == std::mem::discriminant(outcome))
            .count()
    }

    fn record(&mut self, migration: &'static str, step: &Step, outcome: StepOutcome) {
        match &outcome {
            StepOutcome::Applied => info!(migration, step = %step, "Applied"),
            StepOutcome::AlreadyPresent => {
                tracing::debug!(migration, step = %step, "Already present");
            }
            StepOutcome::Skipped => {
                warn!(migration, step = %step, "Skipped destructive step");
            }
            StepOutcome::Failed(reason) => {
                error!(migration, step = %step, reason = %reason, "Migration step failed");
            }
        }
        self.steps.push(StepReport {
            migration,
            step: step.to_string(),
            outcome,
        });
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(f, "[{}] {}: {}", step.migration, step.step, step.outcome)?;
        }
        write!(
            f,
            "{} applied, {} already present, {} skipped, {} failed",
            self.count(&StepOutcome::Applied),
            self.count(&StepOutcome::AlreadyPresent),
            self.count(&StepOutcome::Skipped),
            self.count(&StepOutcome::Failed(String::new())),
        )
    }
}

/// Run `migrations` in order against `catalog`.
///
/// Never fails as a whole: per-step errors end up in the report.
pub async fn run<C: SchemaCatalog>(
    catalog: &C,
    migrations: &[Migration],
    options: RunOptions,
) -> MigrationReport {
    let mut report = MigrationReport::default();
    for migration in migrations {
        info!(migration = migration.name, steps = migration.steps.len(), "Running migration");
        for step in &migration.steps {
            let outcome = match run_step(catalog, step, options).await {
                Ok(outcome) => outcome,
                Err(e) => StepOutcome::Failed(e.to_string()),
            };
            report.record(migration.name, step, outcome);
        }
    }
    report
}

async fn run_step<C: SchemaCatalog>(
    catalog: &C,
    step: &Step,
    options: RunOptions,
) -> Result<StepOutcome, SchemaError> {
    step.validate()?;

    if step.is_destructive() && !options.allow_destructive {
        return Ok(StepOutcome::Skipped);
    }

    match step {
        Step::EnsureTable(table) => {
            let name = Identifier::parse(&table.name)?;
            if catalog.table_exists(&name).await? {
                return Ok(StepOutcome::AlreadyPresent);
            }
            create_and_seed(catalog, &name, table).await?;
            Ok(StepOutcome::Applied)
        }
        Step::EnsureColumn { table, column } => {
            let table = Identifier::parse(table)?;
            let name = Identifier::parse(&column.name)?;
            if catalog.column_exists(&table, &name).await? {
                return Ok(StepOutcome::AlreadyPresent);
            }
            catalog.add_column(&table, column).await?;
            Ok(StepOutcome::Applied)
        }
        Step::EnsureIndex(index) => {
            let name = Identifier::parse(&index.name)?;
            if catalog.index_exists(&name).await? {
                return Ok(StepOutcome::AlreadyPresent);
            }
            catalog.create_index(index).await?;
            Ok(StepOutcome::Applied)
        }
        Step::SeedDefaults { table, rows } => {
            let table = Identifier::parse(table)?;
            let mut inserted = 0_usize;
            for row in rows {
                if catalog.insert_row(&table, row).await? {
                    inserted += 1;
                }
            }
            if inserted == 0 {
                Ok(StepOutcome::AlreadyPresent)
            } else {
                info!(table = %table, inserted, "Seeded default rows");
                Ok(StepOutcome::Applied)
            }
        }
        Step::RecreateTable(table) => {
            let name = Identifier::parse(&table.name)?;
            catalog.drop_table(&name).await?;
            create_and_seed(catalog, &name, table).await?;
            Ok(StepOutcome::Applied)
        }
    }
}

async fn create_and_seed<C: SchemaCatalog>(
    catalog: &C,
    name: &Identifier,
    table: &TableDef,
) -> Result<(), SchemaError> {
    catalog.create_table(table).await?;
    for row in &table.seeds {
        catalog.insert_row(name, row).await?;
    }
    Ok(())
}
