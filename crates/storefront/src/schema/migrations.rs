//! Registry of named migrations.
//!
//! | Name | Purpose |
//! |---|---|
//! | `content_tables` | stores, pages, landing pages (flat layout), blogs, settings |
//! | `catalog_tables` | products and categories |
//! | `landing_sections` | per-section JSON, `show_*` toggles, `section_order` |
//! | `site_settings_defaults` | default settings, keeping existing values |
//! | `recreate_site_settings` | drop and re-create `site_settings` (destructive) |

use multishop_core::landing::LEGACY_COLUMNS;
use multishop_core::settings::{MenuItem, default_footer_menu, default_header_menu};
use multishop_core::SectionKey;

use super::{IndexDef, SeedRow, Step, TableDef};

/// A named, ordered list of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub name: &'static str,
    pub description: &'static str,
    /// Contains steps that can lose data.
    pub destructive: bool,
    pub steps: Vec<Step>,
}

/// Every migration, in the order a fresh install should run them.
#[must_use]
pub fn registry() -> Vec<Migration> {
    vec![
        Migration {
            name: "content_tables",
            description: "Create stores, pages, landing_pages, blogs and site_settings",
            destructive: false,
            steps: content_tables(),
        },
        Migration {
            name: "catalog_tables",
            description: "Create products and categories",
            destructive: false,
            steps: catalog_tables(),
        },
        Migration {
            name: "landing_sections",
            description: "Add per-section JSON, visibility and ordering columns to landing_pages",
            destructive: false,
            steps: landing_sections(),
        },
        Migration {
            name: "site_settings_defaults",
            description: "Insert default site settings that are missing",
            destructive: false,
            steps: vec![Step::SeedDefaults {
                table: "site_settings".to_owned(),
                rows: default_settings(),
            }],
        },
        Migration {
            name: "recreate_site_settings",
            description: "Drop site_settings and re-create it with defaults (loses all settings)",
            destructive: true,
            steps: vec![Step::RecreateTable(site_settings_table())],
        },
    ]
}

/// Look up a migration by name.
#[must_use]
pub fn find(name: &str) -> Option<Migration> {
    registry().into_iter().find(|m| m.name == name)
}

const TIMESTAMPS: [(&str, &str); 2] = [
    ("created_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
    ("updated_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
];

const STATUS: &str =
    "VARCHAR(20) NOT NULL DEFAULT 'draft' CHECK (status IN ('published', 'draft', 'archived'))";

const STORE_REF: &str = "INTEGER REFERENCES stores(id) ON DELETE CASCADE";

const SLUG_PER_STORE: &str = "UNIQUE NULLS NOT DISTINCT (slug, store_id)";

/// Start a store-scoped table: id, slug, store_id.
fn scoped_table(name: &str) -> TableDef {
    TableDef::new(name)
        .column("id", "SERIAL PRIMARY KEY")
        .column("slug", "VARCHAR(255) NOT NULL")
        .column("store_id", STORE_REF)
}

fn with_timestamps(mut table: TableDef) -> TableDef {
    for (name, definition) in TIMESTAMPS {
        table = table.column(name, definition);
    }
    table.constraint(SLUG_PER_STORE)
}

fn store_index(table: &str) -> Step {
    Step::EnsureIndex(IndexDef::new(
        &format!("idx_{table}_store_id"),
        table,
        &["store_id"],
    ))
}

fn stores_table() -> TableDef {
    TableDef::new("stores")
        .column("id", "SERIAL PRIMARY KEY")
        .column("name", "VARCHAR(255) NOT NULL")
        .column("domain", "VARCHAR(255) NOT NULL UNIQUE")
        .column("is_active", "BOOLEAN NOT NULL DEFAULT TRUE")
        .column("created_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()")
}

fn landing_pages_table() -> TableDef {
    let mut table = scoped_table("landing_pages")
        .column("title", "VARCHAR(255) NOT NULL DEFAULT ''")
        .column("is_active", "BOOLEAN NOT NULL DEFAULT TRUE");
    for column in LEGACY_COLUMNS {
        table = table.column(*column, "TEXT");
    }
    with_timestamps(table)
}

fn site_settings_table() -> TableDef {
    let mut table = TableDef::new("site_settings")
        .column("key", "VARCHAR(100) PRIMARY KEY")
        .column("value", "TEXT")
        .column("updated_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()");
    for row in default_settings() {
        table = table.seed(row);
    }
    table
}

fn content_tables() -> Vec<Step> {
    vec![
        Step::EnsureTable(stores_table()),
        Step::EnsureTable(with_timestamps(
            scoped_table("pages")
                .column("title", "VARCHAR(255) NOT NULL DEFAULT ''")
                .column("content", "TEXT")
                .column("meta_description", "TEXT")
                .column("status", STATUS),
        )),
        store_index("pages"),
        Step::EnsureTable(landing_pages_table()),
        store_index("landing_pages"),
        Step::EnsureTable(with_timestamps(
            scoped_table("blogs")
                .column("title", "VARCHAR(255) NOT NULL DEFAULT ''")
                .column("excerpt", "TEXT")
                .column("content", "TEXT")
                .column("featured_image", "VARCHAR(500)")
                .column("status", STATUS),
        )),
        Step::EnsureIndex(IndexDef::new(
            "idx_blogs_store_status_created",
            "blogs",
            &["store_id", "status", "created_at"],
        )),
        Step::EnsureTable(site_settings_table()),
    ]
}

fn catalog_tables() -> Vec<Step> {
    ["products", "categories"]
        .into_iter()
        .flat_map(|name| {
            [
                Step::EnsureTable(with_timestamps(
                    scoped_table(name)
                        .column("name", "VARCHAR(255) NOT NULL DEFAULT ''")
                        .column("status", STATUS),
                )),
                store_index(name),
            ]
        })
        .collect()
}

fn landing_sections() -> Vec<Step> {
    let column = |name: String, definition: &str| Step::EnsureColumn {
        table: "landing_pages".to_owned(),
        column: super::ColumnDef::new(name, definition),
    };

    let mut steps: Vec<Step> = SectionKey::DEFAULT_ORDER
        .iter()
        .flat_map(|key| {
            [
                column(key.data_column(), "TEXT"),
                column(key.toggle_column(), "BOOLEAN NOT NULL DEFAULT TRUE"),
            ]
        })
        .collect();
    steps.push(column("section_order".to_owned(), "TEXT"));
    steps
}

fn menu_json(items: &[MenuItem]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_owned())
}

fn setting(key: &str, value: &str) -> SeedRow {
    vec![
        ("key".to_owned(), key.to_owned()),
        ("value".to_owned(), value.to_owned()),
    ]
}

/// Settings every install starts with.
fn default_settings() -> Vec<SeedRow> {
    vec![
        setting("site_name", "Store"),
        setting("site_tagline", ""),
        setting("homepage_slug", multishop_core::settings::DEFAULT_HOMEPAGE_SLUG),
        setting("currency_code", "USD"),
        setting("currency_symbol", "$"),
        setting("header_menu", &menu_json(&default_header_menu())),
        setting("footer_menu", &menu_json(&default_footer_menu())),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names_are_unique() {
        let names: Vec<&str> = registry().iter().map(|m| m.name).collect();
        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(names.len(), deduped.len());
        assert_eq!(
            names,
            [
                "content_tables",
                "catalog_tables",
                "landing_sections",
                "site_settings_defaults",
                "recreate_site_settings"
            ]
        );
    }

    #[test]
    fn test_every_step_validates() {
        for migration in registry() {
            for step in &migration.steps {
                assert!(step.validate().is_ok(), "{}: {step}", migration.name);
            }
        }
    }

    #[test]
    fn test_only_destructive_migrations_recreate() {
        for migration in registry() {
            let has_destructive = migration.steps.iter().any(Step::is_destructive);
            assert_eq!(has_destructive, migration.destructive, "{}", migration.name);
        }
    }

    #[test]
    fn test_landing_sections_cover_every_section() {
        let steps = landing_sections();
        assert_eq!(steps.len(), SectionKey::DEFAULT_ORDER.len() * 2 + 1);
        let described: Vec<String> = steps.iter().map(ToString::to_string).collect();
        assert!(described.contains(&"ensure column landing_pages.platforms_data".to_owned()));
        assert!(described.contains(&"ensure column landing_pages.show_newsletter".to_owned()));
    }

    fn column<'a>(row: &'a SeedRow, name: &str) -> Option<&'a str> {
        row.iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn test_default_menus_are_valid_json() {
        let row = default_settings()
            .into_iter()
            .find(|row| column(row, "key") == Some("header_menu"))
            .unwrap();
        let menu: Vec<MenuItem> = serde_json::from_str(column(&row, "value").unwrap()).unwrap();
        assert_eq!(menu, default_header_menu());
    }

    #[test]
    fn test_find() {
        assert!(find("landing_sections").is_some());
        assert!(find("nope").is_none());
    }
}
