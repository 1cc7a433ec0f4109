//! URL slug type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// Nothing usable was left after sanitization.
    #[error("slug cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[A-Za-z0-9_-]`.
    #[error("slug contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A URL-safe identifier for a page, landing page or blog post.
///
/// ## Constraints
///
/// - Length: 1-255 characters
/// - Only ASCII letters, digits, `-` and `_`
/// - Case is preserved
///
/// Two constructors exist: [`Slug::sanitize`] strips disallowed characters
/// from untrusted request input, [`Slug::parse`] rejects them.
///
/// ## Examples
///
/// ```
/// use multishop_core::Slug;
///
/// assert_eq!(Slug::sanitize("about<script>").unwrap().as_str(), "aboutscript");
/// assert!(Slug::sanitize("<>").is_err());
///
/// assert!(Slug::parse("summer-sale_2024").is_ok());
/// assert!(Slug::parse("summer sale").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug (matches the `VARCHAR(255)` columns).
    pub const MAX_LENGTH: usize = 255;

    /// Build a slug from untrusted input by dropping every character
    /// outside `[A-Za-z0-9_-]`.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError::Empty`] if nothing remains, or
    /// [`SlugError::TooLong`] if the result exceeds 255 characters.
    pub fn sanitize(raw: &str) -> Result<Self, SlugError> {
        let cleaned: String = raw.chars().filter(|c| is_slug_char(*c)).collect();
        Self::check_length(&cleaned)?;
        Ok(Self(cleaned))
    }

    /// Parse a slug that must already be clean.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, too long, or contains a
    /// character outside `[A-Za-z0-9_-]`.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if let Some(bad) = s.chars().find(|c| !is_slug_char(*c)) {
            return Err(SlugError::InvalidCharacter(bad));
        }
        Self::check_length(s)?;
        Ok(Self(s.to_owned()))
    }

    fn check_length(s: &str) -> Result<(), SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(())
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

const fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
