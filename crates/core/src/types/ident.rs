//! SQL identifier type for schema statements.

use core::fmt;

/// Errors that can occur when validating an [`Identifier`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("identifier cannot be empty")]
    Empty,
    #[error("identifier {0:?} is longer than {max} characters", max = Identifier::MAX_LENGTH)]
    TooLong(String),
    #[error("identifier {0:?} must match [a-z_][a-z0-9_]*")]
    Invalid(String),
}

/// A table, column or index name that is safe to splice into DDL.
///
/// Identifiers cannot be bound as query parameters, so schema statements
/// interpolate them. Only lowercase ASCII letters, digits and `_` are
/// allowed, and the first character must not be a digit. No quoting is ever
/// needed for such a name.
///
/// ```
/// use multishop_core::Identifier;
///
/// assert!(Identifier::parse("landing_pages").is_ok());
/// assert!(Identifier::parse("pages; DROP TABLE stores").is_err());
/// assert!(Identifier::parse("2fa").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// `PostgreSQL` truncates names beyond this length.
    pub const MAX_LENGTH: usize = 63;

    /// Validate an identifier.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentifierError`] if `s` is empty, too long, or contains
    /// anything outside `[a-z_][a-z0-9_]*`.
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        let mut chars = s.chars();
        let Some(first) = chars.next() else {
            return Err(IdentifierError::Empty);
        };
        if s.len() > Self::MAX_LENGTH {
            return Err(IdentifierError::TooLong(s.to_owned()));
        }
        let head_ok = first.is_ascii_lowercase() || first == '_';
        let tail_ok = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !(head_ok && tail_ok) {
            return Err(IdentifierError::Invalid(s.to_owned()));
        }
        Ok(Self(s.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        for name in ["pages", "_tmp", "show_hero", "idx_pages_store_id", "t2"] {
            assert!(Identifier::parse(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_rejects_unsafe_identifiers() {
        assert_eq!(Identifier::parse(""), Err(IdentifierError::Empty));
        for name in ["Pages", "9lives", "a-b", "a b", "pages;", "\"pages\"", "pagés"] {
            assert!(
                matches!(Identifier::parse(name), Err(IdentifierError::Invalid(_))),
                "{name}"
            );
        }
    }

    #[test]
    fn test_rejects_long_identifiers() {
        let name = "a".repeat(Identifier::MAX_LENGTH + 1);
        assert!(matches!(
            Identifier::parse(&name),
            Err(IdentifierError::TooLong(_))
        ));
        assert!(Identifier::parse(&"a".repeat(Identifier::MAX_LENGTH)).is_ok());
    }
}
