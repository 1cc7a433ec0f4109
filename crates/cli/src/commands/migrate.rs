//! Schema evolution commands.
//!
//! # Usage
//!
//! ```bash
//! # List registered migrations
//! ms-cli migrate list
//!
//! # Run every non-destructive migration
//! ms-cli migrate run
//!
//! # Run selected migrations, allowing table re-creation
//! ms-cli migrate run recreate_site_settings --allow-destructive
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

use multishop_storefront::schema::{self, Migration, RunOptions, SchemaError};
use tracing::{info, warn};

/// Print the registry.
#[allow(clippy::print_stdout)]
pub fn list() {
    for migration in schema::registry() {
        let marker = if migration.destructive { " (destructive)" } else { "" };
        println!("{:<24} {}{marker}", migration.name, migration.description);
        for step in &migration.steps {
            println!("    - {step}");
        }
    }
}

/// Pick the migrations to run.
///
/// With no names every non-destructive migration runs, in registry order.
/// Named migrations run in the order given.
///
/// # Errors
///
/// Returns `SchemaError::UnknownMigration` for a name not in the registry.
pub fn select(names: &[String]) -> Result<Vec<Migration>, SchemaError> {
    if names.is_empty() {
        return Ok(schema::registry()
            .into_iter()
            .filter(|m| !m.destructive)
            .collect());
    }
    names
        .iter()
        .map(|name| schema::find(name).ok_or_else(|| SchemaError::UnknownMigration(name.clone())))
        .collect()
}

/// Run migrations and print the report.
///
/// # Errors
///
/// Returns an error if a name is unknown, the database is unreachable, or
/// any step failed (after every step has been attempted).
#[allow(clippy::print_stdout)]
pub async fn run(names: &[String], allow_destructive: bool) -> Result<(), Box<dyn std::error::Error>> {
    let migrations = select(names)?;
    if !allow_destructive && migrations.iter().any(|m| m.destructive) {
        warn!("Destructive steps will be skipped; pass --allow-destructive to run them");
    }

    let database = super::connect().await?;

    info!(count = migrations.len(), allow_destructive, "Running migrations");
    let report = schema::run(&database, &migrations, RunOptions { allow_destructive }).await;
    println!("{report}");

    if report.has_failures() {
        return Err(format!(
            "{} migration step(s) failed",
            report.count(&schema::StepOutcome::Failed(String::new()))
        )
        .into());
    }

    info!("Migrations complete!");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_select_defaults_to_safe_migrations() {
        let selected = select(&[]).unwrap();
        assert!(!selected.is_empty());
        assert!(selected.iter().all(|m| !m.destructive));
    }

    #[test]
    fn test_select_keeps_requested_order() {
        let names = vec!["landing_sections".to_string(), "content_tables".to_string()];
        let selected = select(&names).unwrap();
        let picked: Vec<&str> = selected.iter().map(|m| m.name).collect();
        assert_eq!(picked, ["landing_sections", "content_tables"]);
    }

    #[test]
    fn test_select_unknown_name() {
        let err = select(&["nope".to_string()]).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownMigration(name) if name == "nope"));
    }
}
