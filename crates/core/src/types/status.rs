//! Publication status for storefront content.

use serde::{Deserialize, Serialize};

/// Publication status shared by pages, blog posts, products and categories.
///
/// Stored as lowercase text. Only [`ContentStatus::Published`] rows are
/// visible on the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Published,
    #[default]
    Draft,
    Archived,
}

impl ContentStatus {
    /// Text form stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
            Self::Archived => "archived",
        }
    }

    /// Whether storefront visitors may see content with this status.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self, Self::Published)
    }
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "published" => Ok(Self::Published),
            "draft" => Ok(Self::Draft),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("invalid content status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_text_form() {
        for status in [
            ContentStatus::Published,
            ContentStatus::Draft,
            ContentStatus::Archived,
        ] {
            assert_eq!(status.as_str().parse::<ContentStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_only_published_is_visible() {
        assert!(ContentStatus::Published.is_visible());
        assert!(!ContentStatus::Draft.is_visible());
        assert!(!ContentStatus::Archived.is_visible());
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!("active".parse::<ContentStatus>().is_err());
    }
}
