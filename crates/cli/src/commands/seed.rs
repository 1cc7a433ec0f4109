//! Seed site settings from a YAML file.
//!
//! The file is a flat map of setting keys. Scalars are stored as text;
//! mappings and sequences (menus, contact info, currencies) are stored
//! JSON-encoded, the format the storefront reads them back in.
//!
//! ```yaml
//! site_name: Mug Shop
//! homepage_slug: home
//! contact_info:
//!   email: hello@mugs.test
//! header_menu:
//!   - label: Shop
//!     url: /products
//! ```

use std::path::Path;

use multishop_storefront::db::SettingsSource;
use serde_yaml::Value;
use thiserror::Error;
use tracing::{info, warn};

/// Errors turning YAML values into setting values.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("settings file must be a mapping of keys to values")]
    NotAMapping,
    #[error("setting key must be a string, got {0:?}")]
    InvalidKey(Value),
    #[error("setting {key}: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

/// Convert a parsed YAML document into `(key, value)` pairs.
///
/// `null` values are dropped.
///
/// # Errors
///
/// Returns `SeedError` if the document is not a mapping, a key is not a
/// string, or a nested value cannot be expressed as JSON.
pub fn settings_from_yaml(doc: &Value) -> Result<Vec<(String, String)>, SeedError> {
    let Value::Mapping(map) = doc else {
        return Err(SeedError::NotAMapping);
    };

    let mut settings = Vec::with_capacity(map.len());
    for (key, value) in map {
        let Value::String(key) = key else {
            return Err(SeedError::InvalidKey(key.clone()));
        };
        if let Some(value) = setting_value(key, value)? {
            settings.push((key.clone(), value));
        }
    }
    Ok(settings)
}

fn setting_value(key: &str, value: &Value) -> Result<Option<String>, SeedError> {
    let encoded = match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(_) | Value::Mapping(_) => Some(
            serde_json::to_string(value).map_err(|source| SeedError::Encode {
                key: key.to_owned(),
                source,
            })?,
        ),
        Value::Tagged(tagged) => setting_value(key, &tagged.value)?,
    };
    Ok(encoded)
}

/// Seed settings from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML file
/// * `overwrite` - Replace values of keys that already exist
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or database
/// operations fail.
pub async fn settings(file_path: &str, overwrite: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Verify file exists
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading settings from file");

    // Read and validate YAML before connecting to database
    let content = tokio::fs::read_to_string(path).await?;
    let doc: Value = serde_yaml::from_str(&content)?;
    let settings = settings_from_yaml(&doc)?;

    info!(settings = settings.len(), "Parsed settings");

    let database = super::connect().await?;

    let mut written = 0_usize;
    let mut kept = 0_usize;
    for (key, value) in &settings {
        if database.put_setting(key, value, overwrite).await? {
            written += 1;
        } else {
            kept += 1;
            warn!(key, "Setting exists, keeping current value");
        }
    }

    // Print summary
    info!("Seeding complete!");
    info!("  Settings written: {written}");
    info!("  Settings kept (already exist): {kept}");

    Ok(())
}
