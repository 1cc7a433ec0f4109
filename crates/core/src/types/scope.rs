//! Store (tenant) scoping rules.
//!
//! Rows carry an optional store ID: `Some(store)` belongs to one store,
//! `None` is a global default shared by every store. A lookup for store `S`
//! sees rows for `S` and global rows, and prefers the former.

use super::id::StoreId;

/// Something that belongs to a store or is shared globally.
pub trait StoreScoped {
    /// The owning store, or `None` for a global row.
    fn store_id(&self) -> Option<StoreId>;
}

impl<T: StoreScoped> StoreScoped for &T {
    fn store_id(&self) -> Option<StoreId> {
        (*self).store_id()
    }
}

/// Whether a row with `row_store` is visible to a request for `current`.
///
/// Global rows are visible to everyone; store rows only to their own store.
#[must_use]
pub fn is_visible_to(row_store: Option<StoreId>, current: Option<StoreId>) -> bool {
    match row_store {
        None => true,
        Some(owner) => current == Some(owner),
    }
}

/// Pick the row a request for `current` should see.
///
/// Invisible rows are ignored; among the rest a store-specific row wins
/// over a global one. Ties keep the first candidate.
pub fn prefer_store_specific<T, I>(candidates: I, current: Option<StoreId>) -> Option<T>
where
    T: StoreScoped,
    I: IntoIterator<Item = T>,
{
    let mut global = None;
    for row in candidates {
        if !is_visible_to(row.store_id(), current) {
            continue;
        }
        if row.store_id().is_some() {
            return Some(row);
        }
        if global.is_none() {
            global = Some(row);
        }
    }
    global
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row(&'static str, Option<StoreId>);

    impl StoreScoped for Row {
        fn store_id(&self) -> Option<StoreId> {
            self.1
        }
    }

    const A: StoreId = StoreId::new(1);
    const B: StoreId = StoreId::new(2);

    #[test]
    fn test_store_row_beats_global_row() {
        let rows = vec![Row("global", None), Row("store-a", Some(A))];
        assert_eq!(
            prefer_store_specific(rows, Some(A)),
            Some(Row("store-a", Some(A)))
        );
    }

    #[test]
    fn test_other_store_sees_global_row() {
        let rows = vec![Row("store-a", Some(A)), Row("global", None)];
        assert_eq!(
            prefer_store_specific(rows, Some(B)),
            Some(Row("global", None))
        );
    }

    #[test]
    fn test_no_store_sees_only_global_rows() {
        let rows = vec![Row("store-a", Some(A))];
        assert_eq!(prefer_store_specific(rows, None), None);
    }

    #[test]
    fn test_visibility_rules() {
        assert!(is_visible_to(None, None));
        assert!(is_visible_to(None, Some(A)));
        assert!(is_visible_to(Some(A), Some(A)));
        assert!(!is_visible_to(Some(A), Some(B)));
        assert!(!is_visible_to(Some(A), None));
    }
}
