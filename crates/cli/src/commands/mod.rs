//! Subcommand implementations.

pub mod migrate;
pub mod seed;

use multishop_storefront::config::get_database_url;
use multishop_storefront::db::Database;
use tracing::info;

/// Connect to the storefront database named by the environment.
async fn connect() -> Result<Database, Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let database_url = get_database_url("STOREFRONT_DATABASE_URL")?;
    let database = Database::connect(&database_url).await?;
    info!("Connected to database");
    Ok(database)
}
