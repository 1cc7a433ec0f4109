//! Site settings resolution.
//!
//! `site_settings` is a flat key/value table. Newer settings are stored as
//! JSON blobs under one key (`contact_info`, `social_links`, `currencies`,
//! menus); older installations have the same data spread over discrete keys
//! (`contact_email`, `facebook_url`, ...). [`SiteSettings`] hides the
//! difference: composite getters read the JSON blob first and fill each
//! missing field from the legacy key, then from a default.

pub mod menu;

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use menu::{MenuItem, default_footer_menu, default_header_menu, normalize_menu};

/// Default value of the `homepage_slug` setting.
pub const DEFAULT_HOMEPAGE_SLUG: &str = "home";

/// Immutable snapshot of the `site_settings` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteSettings {
    values: HashMap<String, String>,
}

impl SiteSettings {
    /// Build a snapshot from raw key/value rows.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Get a scalar value. Blank values count as missing.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Get a scalar value or `default`.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Decode a JSON setting.
    ///
    /// Missing, blank, `null` and undecodable values all yield `None`; the
    /// last case is logged so a broken admin edit is visible.
    #[must_use]
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Null) => None,
            Ok(value) => match T::deserialize(value) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    tracing::warn!(key, error = %e, "Setting has unexpected JSON shape");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(key, error = %e, "Setting is not valid JSON");
                None
            }
        }
    }

    /// Resolve one field of a JSON-object setting with a legacy fallback key.
    fn field(&self, json: Option<&Map<String, Value>>, field: &str, legacy_key: &str) -> Option<String> {
        let from_json = json
            .and_then(|obj| obj.get(field))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned);
        from_json.or_else(|| self.get(legacy_key).map(str::to_owned))
    }

    /// Store identity (name, tagline, logo).
    #[must_use]
    pub fn identity(&self) -> SiteIdentity {
        SiteIdentity {
            name: self.get_or("site_name", "Store").to_owned(),
            tagline: self.get("site_tagline").map(str::to_owned),
            logo: self.get("site_logo").map(str::to_owned),
        }
    }

    /// Slug of the content shown at `/`.
    #[must_use]
    pub fn homepage_slug(&self) -> &str {
        self.get_or("homepage_slug", DEFAULT_HOMEPAGE_SLUG)
    }

    /// Contact details: `contact_info` JSON, falling back to
    /// `contact_email` / `contact_phone` / `contact_address`.
    #[must_use]
    pub fn contact(&self) -> ContactInfo {
        let json: Option<Map<String, Value>> = self.get_json("contact_info");
        ContactInfo {
            email: self.field(json.as_ref(), "email", "contact_email"),
            phone: self.field(json.as_ref(), "phone", "contact_phone"),
            address: self.field(json.as_ref(), "address", "contact_address"),
        }
    }

    /// Social profile links: `social_links` JSON, falling back to the
    /// per-network `<network>_url` keys.
    #[must_use]
    pub fn social_links(&self) -> SocialLinks {
        let json: Option<Map<String, Value>> = self.get_json("social_links");
        SocialLinks {
            facebook: self.field(json.as_ref(), "facebook", "facebook_url"),
            instagram: self.field(json.as_ref(), "instagram", "instagram_url"),
            twitter: self.field(json.as_ref(), "twitter", "twitter_url"),
            youtube: self.field(json.as_ref(), "youtube", "youtube_url"),
        }
    }

    /// Enabled currencies: `currencies` JSON list, falling back to the
    /// single `currency_code` / `currency_symbol` pair, then USD.
    #[must_use]
    pub fn currencies(&self) -> Vec<Currency> {
        if let Some(list) = self.get_json::<Vec<Currency>>("currencies") {
            let list: Vec<Currency> = list
                .into_iter()
                .filter(|c| !c.code.trim().is_empty())
                .collect();
            if !list.is_empty() {
                return list;
            }
        }

        let code = self.get_or("currency_code", "USD").to_uppercase();
        let symbol = self
            .get("currency_symbol")
            .map_or_else(|| default_symbol(&code).to_owned(), str::to_owned);
        vec![Currency {
            code,
            symbol,
            rate: 1.0,
        }]
    }

    /// Header navigation: `header_menu` JSON tree or the default menu.
    #[must_use]
    pub fn header_menu(&self, base_url: &str) -> Vec<MenuItem> {
        self.menu("header_menu", base_url, default_header_menu)
    }

    /// Footer navigation: `footer_menu` JSON tree or the default menu.
    #[must_use]
    pub fn footer_menu(&self, base_url: &str) -> Vec<MenuItem> {
        self.menu("footer_menu", base_url, default_footer_menu)
    }

    fn menu(&self, key: &str, base_url: &str, default: fn() -> Vec<MenuItem>) -> Vec<MenuItem> {
        let items = self
            .get_json::<Vec<MenuItem>>(key)
            .map(|items| normalize_menu(items, base_url))
            .filter(|items| !items.is_empty());
        items.unwrap_or_else(|| normalize_menu(default(), base_url))
    }
}

fn default_symbol(code: &str) -> &'static str {
    match code {
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "INR" => "₹",
        _ => "$",
    }
}

/// Store name, tagline and logo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteIdentity {
    pub name: String,
    pub tagline: Option<String>,
    pub logo: Option<String>,
}

/// Store contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Social network profile URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SocialLinks {
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub youtube: Option<String>,
}

/// A currency offered by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    #[serde(default)]
    pub symbol: String,
    /// Conversion rate from the base currency.
    #[serde(default = "default_rate")]
    pub rate: f64,
}

const fn default_rate() -> f64 {
    1.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_missing() {
        let settings = SiteSettings::from_pairs([("site_name", "  ")]);
        assert_eq!(settings.get("site_name"), None);
        assert_eq!(settings.identity().name, "Store");
    }

    #[test]
    fn test_contact_json_wins_per_field() {
        let settings = SiteSettings::from_pairs([
            ("contact_info", r#"{"email": "hello@shop.test", "phone": ""}"#),
            ("contact_email", "legacy@shop.test"),
            ("contact_phone", "+1 555 0100"),
        ]);
        let contact = settings.contact();
        assert_eq!(contact.email.as_deref(), Some("hello@shop.test"));
        assert_eq!(contact.phone.as_deref(), Some("+1 555 0100"));
        assert_eq!(contact.address, None);
    }

    #[test]
    fn test_contact_malformed_json_uses_legacy() {
        let settings = SiteSettings::from_pairs([
            ("contact_info", "{broken"),
            ("contact_email", "legacy@shop.test"),
        ]);
        assert_eq!(
            settings.contact().email.as_deref(),
            Some("legacy@shop.test")
        );
    }

    #[test]
    fn test_social_links_legacy_keys() {
        let settings = SiteSettings::from_pairs([
            ("social_links", r#"{"instagram": "https://instagram.com/shop"}"#),
            ("facebook_url", "https://facebook.com/shop"),
        ]);
        let social = settings.social_links();
        assert_eq!(social.instagram.as_deref(), Some("https://instagram.com/shop"));
        assert_eq!(social.facebook.as_deref(), Some("https://facebook.com/shop"));
        assert_eq!(social.twitter, None);
    }

    #[test]
    fn test_currencies_from_json() {
        let settings = SiteSettings::from_pairs([(
            "currencies",
            r#"[{"code": "EUR", "symbol": "€", "rate": 0.92}, {"code": ""}]"#,
        )]);
        let currencies = settings.currencies();
        assert_eq!(currencies.len(), 1);
        assert_eq!(currencies.first().unwrap().code, "EUR");
    }

    #[test]
    fn test_currencies_legacy_and_default() {
        let legacy = SiteSettings::from_pairs([("currency_code", "gbp")]);
        let currencies = legacy.currencies();
        assert_eq!(currencies.first().unwrap().code, "GBP");
        assert_eq!(currencies.first().unwrap().symbol, "£");

        let empty = SiteSettings::default();
        let currencies = empty.currencies();
        assert_eq!(currencies.first().unwrap().code, "USD");
        assert_eq!(currencies.first().unwrap().symbol, "$");
    }

    #[test]
    fn test_header_menu_json_or_default() {
        let base = "https://shop.test";
        let settings = SiteSettings::from_pairs([(
            "header_menu",
            r#"[{"label": "Deals", "url": "/deals"}]"#,
        )]);
        let menu = settings.header_menu(base);
        assert_eq!(menu.len(), 1);
        assert_eq!(menu.first().unwrap().url, "https://shop.test/deals");

        let empty_menu = SiteSettings::from_pairs([("header_menu", "[]")]);
        assert_eq!(empty_menu.header_menu(base).len(), default_header_menu().len());
    }

    #[test]
    fn test_homepage_slug_default() {
        assert_eq!(SiteSettings::default().homepage_slug(), "home");
        let settings = SiteSettings::from_pairs([("homepage_slug", "welcome")]);
        assert_eq!(settings.homepage_slug(), "welcome");
    }
}
