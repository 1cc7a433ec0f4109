//! Navigation menu builder.
//!
//! Menus are stored as JSON trees of `{label, url, children?, new_tab?}`.

use serde::{Deserialize, Serialize};

/// Deepest nesting kept when normalizing a menu (top level is depth 1).
pub const MAX_MENU_DEPTH: usize = 3;

/// One entry of a navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
    #[serde(default)]
    pub new_tab: bool,
}

impl MenuItem {
    /// A leaf link.
    #[must_use]
    pub fn link(label: &str, url: &str) -> Self {
        Self {
            label: label.to_owned(),
            url: url.to_owned(),
            children: Vec::new(),
            new_tab: false,
        }
    }
}

/// Clean up a menu tree for rendering.
///
/// - Items with a blank label are dropped together with their children.
/// - Nesting below [`MAX_MENU_DEPTH`] is cut off.
/// - Site-relative URLs (`/path`) are made absolute against `base_url`;
///   absolute URLs, `#` anchors and other schemes are kept as-is.
#[must_use]
pub fn normalize_menu(items: Vec<MenuItem>, base_url: &str) -> Vec<MenuItem> {
    normalize_level(items, base_url.trim_end_matches('/'), 1)
}

fn normalize_level(items: Vec<MenuItem>, base: &str, depth: usize) -> Vec<MenuItem> {
    items
        .into_iter()
        .filter(|item| !item.label.trim().is_empty())
        .map(|item| {
            let children = if depth < MAX_MENU_DEPTH {
                normalize_level(item.children, base, depth + 1)
            } else {
                Vec::new()
            };
            MenuItem {
                label: item.label.trim().to_owned(),
                url: absolutize(&item.url, base),
                children,
                new_tab: item.new_tab,
            }
        })
        .collect()
}

/// Resolve a menu URL against the site base URL.
#[must_use]
pub fn absolutize(url: &str, base: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return "#".to_owned();
    }
    if url.starts_with("//") || !url.starts_with('/') {
        return url.to_owned();
    }
    format!("{}{url}", base.trim_end_matches('/'))
}

/// Header menu used when no `header_menu` setting exists.
#[must_use]
pub fn default_header_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::link("Home", "/"),
        MenuItem::link("Shop", "/products"),
        MenuItem::link("Categories", "/categories"),
        MenuItem::link("Blog", "/blog"),
    ]
}

/// Footer menu used when no `footer_menu` setting exists.
#[must_use]
pub fn default_footer_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::link("About", "/about"),
        MenuItem::link("Contact", "/contact"),
        MenuItem::link("Privacy Policy", "/privacy"),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const BASE: &str = "https://shop.example.com/";

    #[test]
    fn test_absolutize() {
        assert_eq!(absolutize("/sale", BASE), "https://shop.example.com/sale");
        assert_eq!(absolutize("https://other.test/x", BASE), "https://other.test/x");
        assert_eq!(absolutize("#top", BASE), "#top");
        assert_eq!(absolutize("mailto:hi@example.com", BASE), "mailto:hi@example.com");
        assert_eq!(absolutize("//cdn.example.com/a", BASE), "//cdn.example.com/a");
        assert_eq!(absolutize("  ", BASE), "#");
    }

    #[test]
    fn test_blank_labels_dropped_with_children() {
        let menu: Vec<MenuItem> = serde_json::from_str(
            r#"[
                {"label": "Shop", "url": "/products"},
                {"label": " ", "url": "/hidden", "children": [{"label": "Child", "url": "/c"}]}
            ]"#,
        )
        .unwrap();
        let menu = normalize_menu(menu, BASE);
        assert_eq!(menu.len(), 1);
        assert_eq!(menu.first().unwrap().url, "https://shop.example.com/products");
    }

    #[test]
    fn test_depth_is_capped() {
        let menu: Vec<MenuItem> = serde_json::from_str(
            r#"[{"label": "1", "children": [{"label": "2", "children": [
                {"label": "3", "children": [{"label": "4"}]}
            ]}]}]"#,
        )
        .unwrap();
        let menu = normalize_menu(menu, BASE);
        let level3 = menu
            .first()
            .and_then(|item| item.children.first())
            .and_then(|item| item.children.first())
            .unwrap();
        assert_eq!(level3.label, "3");
        assert!(level3.children.is_empty());
    }
}
