//! Section content schemas and per-field resolution.
//!
//! Every section type documents its JSON keys in `FIELDS`; serializing a
//! composed section yields exactly those keys, so a composed section can be
//! written back as the section's blob unchanged.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{LegacyFields, SectionKey};

/// Where a section's field values come from.
///
/// Resolution is per field: non-empty JSON value, then non-empty legacy
/// column, then the caller's default.
pub struct FieldSource<'a> {
    section: SectionKey,
    json: Option<Map<String, Value>>,
    legacy: &'a LegacyFields,
}

impl<'a> FieldSource<'a> {
    /// Build a source from a section's raw JSON blob and the legacy columns.
    ///
    /// A blob that is blank, malformed, or not a JSON object is treated as
    /// absent so every field falls through to legacy values and defaults.
    #[must_use]
    pub fn new(section: SectionKey, raw: Option<&str>, legacy: &'a LegacyFields) -> Self {
        Self {
            section,
            json: parse_blob(section, raw),
            legacy,
        }
    }

    /// The section this source feeds.
    #[must_use]
    pub const fn section(&self) -> SectionKey {
        self.section
    }

    /// Resolve a scalar text field.
    #[must_use]
    pub fn text(&self, field: &str, default: &str) -> String {
        if let Some(value) = self.json_text(field) {
            return value;
        }
        if let Some(value) = self.legacy.get(self.section, field) {
            return value.to_owned();
        }
        default.to_owned()
    }

    /// Resolve a list field.
    ///
    /// Entries that do not match the item schema are skipped. If the JSON
    /// list is missing or nothing usable remains, `default` is used.
    pub fn list<T, F>(&self, field: &str, default: F) -> Vec<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> Vec<T>,
    {
        let items: Vec<T> = self
            .json
            .as_ref()
            .and_then(|json| json.get(field))
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| match T::deserialize(entry) {
                        Ok(item) => Some(item),
                        Err(e) => {
                            tracing::warn!(
                                section = %self.section,
                                field,
                                error = %e,
                                "Skipping malformed list entry"
                            );
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        if items.is_empty() { default() } else { items }
    }

    fn json_text(&self, field: &str) -> Option<String> {
        match self.json.as_ref()?.get(field)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

fn parse_blob(section: SectionKey, raw: Option<&str>) -> Option<Map<String, Value>> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) if !map.is_empty() => Some(map),
        Ok(Value::Object(_) | Value::Null) => None,
        Ok(_) => {
            tracing::warn!(%section, "Section data is not a JSON object, using fallbacks");
            None
        }
        Err(e) => {
            tracing::warn!(%section, error = %e, "Malformed section JSON, using fallbacks");
            None
        }
    }
}

/// Accept strings, numbers and booleans for display values such as `"10K+"` or `500`.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

/// Content of one section type.
pub trait SectionContent: Serialize + Sized {
    /// Which section this type renders.
    const KEY: SectionKey;
    /// Documented JSON keys of the section blob.
    const FIELDS: &'static [&'static str];

    /// Resolve every field from `source`.
    fn compose(source: &FieldSource<'_>) -> Self;
}

// =============================================================================
// List item types
// =============================================================================

/// A labelled link (menus, footer links).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkItem {
    pub label: String,
    #[serde(default)]
    pub url: String,
}

/// A headline figure in the stats section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatItem {
    #[serde(deserialize_with = "lenient_string")]
    pub value: String,
    #[serde(default)]
    pub label: String,
}

/// A selling point in the "why choose us" section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureItem {
    #[serde(default)]
    pub icon: String,
    pub title: String,
    #[serde(default)]
    pub text: String,
}

/// A customer quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    #[serde(default)]
    pub role: String,
    pub quote: String,
    #[serde(default)]
    pub avatar: String,
}

/// A marketplace or app platform the store is available on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformItem {
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub url: String,
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderSection {
    pub logo: String,
    pub tagline: String,
    pub announcement: String,
    pub menu: Vec<LinkItem>,
}

impl SectionContent for HeaderSection {
    const KEY: SectionKey = SectionKey::Header;
    const FIELDS: &'static [&'static str] = &["logo", "tagline", "announcement", "menu"];

    fn compose(source: &FieldSource<'_>) -> Self {
        Self {
            logo: source.text("logo", ""),
            tagline: source.text("tagline", ""),
            announcement: source.text("announcement", ""),
            menu: source.list("menu", Vec::new),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroSection {
    pub title: String,
    pub subtitle: String,
    pub image: String,
    pub button_text: String,
    pub button_link: String,
}

impl SectionContent for HeroSection {
    const KEY: SectionKey = SectionKey::Hero;
    const FIELDS: &'static [&'static str] =
        &["title", "subtitle", "image", "button_text", "button_link"];

    fn compose(source: &FieldSource<'_>) -> Self {
        Self {
            title: source.text("title", "Welcome to our store"),
            subtitle: source.text("subtitle", "Discover our latest collection"),
            image: source.text("image", ""),
            button_text: source.text("button_text", "Shop Now"),
            button_link: source.text("button_link", "/products"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerSection {
    pub title: String,
    pub image: String,
    pub link: String,
}

impl SectionContent for BannerSection {
    const KEY: SectionKey = SectionKey::Banner;
    const FIELDS: &'static [&'static str] = &["title", "image", "link"];

    fn compose(source: &FieldSource<'_>) -> Self {
        Self {
            title: source.text("title", ""),
            image: source.text("image", ""),
            link: source.text("link", "/products"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSection {
    pub title: String,
    pub items: Vec<StatItem>,
}

impl SectionContent for StatsSection {
    const KEY: SectionKey = SectionKey::Stats;
    const FIELDS: &'static [&'static str] = &["title", "items"];

    fn compose(source: &FieldSource<'_>) -> Self {
        Self {
            title: source.text("title", ""),
            items: source.list("items", || {
                [
                    ("10K+", "Happy Customers"),
                    ("500+", "Products"),
                    ("24/7", "Support"),
                ]
                .into_iter()
                .map(|(value, label)| StatItem {
                    value: value.to_owned(),
                    label: label.to_owned(),
                })
                .collect()
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhySection {
    pub title: String,
    pub subtitle: String,
    pub items: Vec<FeatureItem>,
}

impl SectionContent for WhySection {
    const KEY: SectionKey = SectionKey::Why;
    const FIELDS: &'static [&'static str] = &["title", "subtitle", "items"];

    fn compose(source: &FieldSource<'_>) -> Self {
        Self {
            title: source.text("title", "Why Choose Us"),
            subtitle: source.text("subtitle", ""),
            items: source.list("items", || {
                [
                    ("truck", "Fast Shipping", "Orders ship within 24 hours."),
                    ("shield", "Secure Payments", "Your payment details are protected."),
                    ("refresh", "Easy Returns", "30-day hassle-free returns."),
                ]
                .into_iter()
                .map(|(icon, title, text)| FeatureItem {
                    icon: icon.to_owned(),
                    title: title.to_owned(),
                    text: text.to_owned(),
                })
                .collect()
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AboutSection {
    pub title: String,
    pub content: String,
    pub image: String,
}

impl SectionContent for AboutSection {
    const KEY: SectionKey = SectionKey::About;
    const FIELDS: &'static [&'static str] = &["title", "content", "image"];

    fn compose(source: &FieldSource<'_>) -> Self {
        Self {
            title: source.text("title", "About Us"),
            content: source.text("content", ""),
            image: source.text("image", ""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestimonialsSection {
    pub title: String,
    pub items: Vec<Testimonial>,
}

impl SectionContent for TestimonialsSection {
    const KEY: SectionKey = SectionKey::Testimonials;
    const FIELDS: &'static [&'static str] = &["title", "items"];

    fn compose(source: &FieldSource<'_>) -> Self {
        Self {
            title: source.text("title", "What Our Customers Say"),
            items: source.list("items", Vec::new),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsletterSection {
    pub title: String,
    pub text: String,
    pub button_text: String,
}

impl SectionContent for NewsletterSection {
    const KEY: SectionKey = SectionKey::Newsletter;
    const FIELDS: &'static [&'static str] = &["title", "text", "button_text"];

    fn compose(source: &FieldSource<'_>) -> Self {
        Self {
            title: source.text("title", "Subscribe to our newsletter"),
            text: source.text("text", "Get the latest updates and exclusive offers."),
            button_text: source.text("button_text", "Subscribe"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformsSection {
    pub title: String,
    pub items: Vec<PlatformItem>,
}

impl SectionContent for PlatformsSection {
    const KEY: SectionKey = SectionKey::Platforms;
    const FIELDS: &'static [&'static str] = &["title", "items"];

    fn compose(source: &FieldSource<'_>) -> Self {
        Self {
            title: source.text("title", "Also Available On"),
            items: source.list("items", Vec::new),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterSection {
    pub text: String,
    pub copyright: String,
    pub links: Vec<LinkItem>,
}

impl SectionContent for FooterSection {
    const KEY: SectionKey = SectionKey::Footer;
    const FIELDS: &'static [&'static str] = &["text", "copyright", "links"];

    fn compose(source: &FieldSource<'_>) -> Self {
        Self {
            text: source.text("text", ""),
            copyright: source.text("copyright", "All rights reserved."),
            links: source.list("links", Vec::new),
        }
    }
}

/// A composed section tagged with its key.
///
/// Serializes as `{"key": "<section>", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "key", content = "data", rename_all = "snake_case")]
pub enum Section {
    Header(HeaderSection),
    Hero(HeroSection),
    Banner(BannerSection),
    Stats(StatsSection),
    Why(WhySection),
    About(AboutSection),
    Testimonials(TestimonialsSection),
    Newsletter(NewsletterSection),
    Platforms(PlatformsSection),
    Footer(FooterSection),
}

impl Section {
    /// Compose the section named by `source`.
    #[must_use]
    pub fn compose(source: &FieldSource<'_>) -> Self {
        match source.section() {
            SectionKey::Header => Self::Header(HeaderSection::compose(source)),
            SectionKey::Hero => Self::Hero(HeroSection::compose(source)),
            SectionKey::Banner => Self::Banner(BannerSection::compose(source)),
            SectionKey::Stats => Self::Stats(StatsSection::compose(source)),
            SectionKey::Why => Self::Why(WhySection::compose(source)),
            SectionKey::About => Self::About(AboutSection::compose(source)),
            SectionKey::Testimonials => Self::Testimonials(TestimonialsSection::compose(source)),
            SectionKey::Newsletter => Self::Newsletter(NewsletterSection::compose(source)),
            SectionKey::Platforms => Self::Platforms(PlatformsSection::compose(source)),
            SectionKey::Footer => Self::Footer(FooterSection::compose(source)),
        }
    }

    /// Which section this is.
    #[must_use]
    pub const fn key(&self) -> SectionKey {
        match self {
            Self::Header(_) => SectionKey::Header,
            Self::Hero(_) => SectionKey::Hero,
            Self::Banner(_) => SectionKey::Banner,
            Self::Stats(_) => SectionKey::Stats,
            Self::Why(_) => SectionKey::Why,
            Self::About(_) => SectionKey::About,
            Self::Testimonials(_) => SectionKey::Testimonials,
            Self::Newsletter(_) => SectionKey::Newsletter,
            Self::Platforms(_) => SectionKey::Platforms,
            Self::Footer(_) => SectionKey::Footer,
        }
    }
}
