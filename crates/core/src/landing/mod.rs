//! Landing page model and composition.
//!
//! A landing page is a stack of ten independently toggleable sections. Each
//! section is configured by a JSON blob; older rows carry the same data in
//! discrete legacy columns instead. [`compose`] turns a stored
//! [`LandingPage`] into a [`LandingPageModel`] ready for rendering:
//!
//! 1. Sections are ordered by the page's `section_order` JSON array, with
//!    unlisted sections appended in [`SectionKey::DEFAULT_ORDER`].
//! 2. Hidden sections (`show_<section> = false`) are dropped.
//! 3. Every field is resolved independently: a non-empty JSON value wins,
//!    then a non-empty legacy column, then the built-in default.

mod composer;
mod order;
pub mod sections;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{LandingPageId, Slug, StoreId, StoreScoped};

pub use composer::{LandingPageModel, compose};
pub use order::resolve_order;
pub use sections::{FieldSource, Section, SectionContent};

/// Identifies one landing page section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Header,
    Hero,
    Banner,
    Stats,
    Why,
    About,
    Testimonials,
    Newsletter,
    Platforms,
    Footer,
}

impl SectionKey {
    /// Render order used for sections not named in `section_order`.
    pub const DEFAULT_ORDER: [Self; 10] = [
        Self::Header,
        Self::Hero,
        Self::Banner,
        Self::Stats,
        Self::Why,
        Self::About,
        Self::Testimonials,
        Self::Newsletter,
        Self::Platforms,
        Self::Footer,
    ];

    /// Key as it appears in `section_order` and column names.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Hero => "hero",
            Self::Banner => "banner",
            Self::Stats => "stats",
            Self::Why => "why",
            Self::About => "about",
            Self::Testimonials => "testimonials",
            Self::Newsletter => "newsletter",
            Self::Platforms => "platforms",
            Self::Footer => "footer",
        }
    }

    /// Column holding the section's JSON blob.
    #[must_use]
    pub fn data_column(&self) -> String {
        format!("{}_data", self.as_str())
    }

    /// Column holding the section's visibility toggle.
    #[must_use]
    pub fn toggle_column(&self) -> String {
        format!("show_{}", self.as_str())
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SectionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::DEFAULT_ORDER
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown landing section: {s}"))
    }
}

/// Legacy scalar columns on `landing_pages`, named `<section>_<field>`.
pub const LEGACY_COLUMNS: &[&str] = &[
    "hero_title",
    "hero_subtitle",
    "hero_image",
    "hero_button_text",
    "hero_button_link",
    "banner_image",
    "banner_link",
    "about_title",
    "about_content",
    "about_image",
    "newsletter_title",
    "newsletter_text",
    "footer_text",
];

/// Values of the legacy per-field columns, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyFields(BTreeMap<String, String>);

impl LegacyFields {
    /// Create an empty set of legacy values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a legacy column value. `None` and blank values are ignored.
    pub fn set(&mut self, column: &str, value: Option<String>) {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.0.insert(column.to_owned(), value);
        }
    }

    /// Look up the legacy value backing `section.field`.
    #[must_use]
    pub fn get(&self, section: SectionKey, field: &str) -> Option<&str> {
        self.0
            .get(&format!("{}_{field}", section.as_str()))
            .map(String::as_str)
    }
}

/// A landing page row as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingPage {
    pub id: LandingPageId,
    pub slug: Slug,
    pub store_id: Option<StoreId>,
    pub title: String,
    pub is_active: bool,
    /// Raw JSON blobs, one per configured section.
    pub sections: BTreeMap<SectionKey, String>,
    /// `show_<section>` toggles. Missing entries count as shown.
    pub visibility: BTreeMap<SectionKey, bool>,
    /// Raw `section_order` JSON array.
    pub section_order: Option<String>,
    pub legacy: LegacyFields,
    pub updated_at: DateTime<Utc>,
}

impl LandingPage {
    /// Whether the section should be rendered.
    #[must_use]
    pub fn is_shown(&self, key: SectionKey) -> bool {
        self.visibility.get(&key).copied().unwrap_or(true)
    }

    /// Raw JSON blob for a section, if any.
    #[must_use]
    pub fn section_blob(&self, key: SectionKey) -> Option<&str> {
        self.sections.get(&key).map(String::as_str)
    }
}

impl StoreScoped for LandingPage {
    fn store_id(&self) -> Option<StoreId> {
        self.store_id
    }
}
