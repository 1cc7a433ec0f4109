//! Section ordering.

use serde_json::Value;

use super::SectionKey;

/// Resolve the full render order from a raw `section_order` JSON array.
///
/// Listed keys come first in listed order; unknown keys, non-string entries
/// and repeats are skipped. Every section not listed is appended in
/// [`SectionKey::DEFAULT_ORDER`]. A missing, blank or malformed value yields
/// the default order. The result always contains each section exactly once.
#[must_use]
pub fn resolve_order(raw: Option<&str>) -> Vec<SectionKey> {
    let mut order = Vec::with_capacity(SectionKey::DEFAULT_ORDER.len());

    for key in listed_keys(raw) {
        if !order.contains(&key) {
            order.push(key);
        }
    }

    for key in SectionKey::DEFAULT_ORDER {
        if !order.contains(&key) {
            order.push(key);
        }
    }

    order
}

fn listed_keys(raw: Option<&str>) -> Vec<SectionKey> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(|name| match name.trim().parse::<SectionKey>() {
                Ok(key) => Some(key),
                Err(_) => {
                    tracing::debug!(section = name, "Ignoring unknown section in section_order");
                    None
                }
            })
            .collect(),
        Ok(other) => {
            tracing::warn!(value = %other, "section_order is not a JSON array, using default order");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Malformed section_order JSON, using default order");
            Vec::new()
        }
    }
}
