//! Site chrome shared by every storefront page.

use multishop_core::settings::{ContactInfo, Currency, MenuItem, SiteIdentity, SocialLinks};
use multishop_core::SiteSettings;
use serde::Serialize;

/// Everything a renderer needs around the page body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteView {
    pub base_url: String,
    #[serde(flatten)]
    pub identity: SiteIdentity,
    pub header_menu: Vec<MenuItem>,
    pub footer_menu: Vec<MenuItem>,
    pub contact: ContactInfo,
    pub social_links: SocialLinks,
    pub currencies: Vec<Currency>,
}

impl SiteView {
    /// Resolve the site chrome from a settings snapshot.
    #[must_use]
    pub fn from_settings(settings: &SiteSettings, base_url: &str) -> Self {
        Self {
            base_url: base_url.to_owned(),
            identity: settings.identity(),
            header_menu: settings.header_menu(base_url),
            footer_menu: settings.footer_menu(base_url),
            contact: settings.contact(),
            social_links: settings.social_links(),
            currencies: settings.currencies(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_empty_settings() {
        let view = SiteView::from_settings(&SiteSettings::default(), "https://shop.test");
        assert_eq!(view.identity.name, "Store");
        assert_eq!(view.header_menu.first().unwrap().url, "https://shop.test/");
        assert_eq!(view.currencies.first().unwrap().code, "USD");
        assert_eq!(view.contact, ContactInfo::default());
    }

    #[test]
    fn test_serialized_shape() {
        let settings = SiteSettings::from_pairs([
            ("site_name", "Mug Shop"),
            ("contact_info", r#"{"email": "hi@mugs.test"}"#),
        ]);
        let json = serde_json::to_value(SiteView::from_settings(&settings, "https://mugs.test"))
            .unwrap();
        assert_eq!(json["name"], "Mug Shop");
        assert_eq!(json["contact"]["email"], "hi@mugs.test");
        assert!(json["footer_menu"].is_array());
        assert!(json["social_links"]["facebook"].is_null());
    }
}
