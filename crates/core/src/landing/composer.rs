//! Landing page composition.

use serde::Serialize;

use super::order::resolve_order;
use super::sections::{FieldSource, Section};
use super::LandingPage;
use crate::types::{LandingPageId, Slug, StoreId};

/// Fully resolved landing page, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LandingPageModel {
    pub id: LandingPageId,
    pub slug: Slug,
    pub store_id: Option<StoreId>,
    pub title: String,
    /// Visible sections in render order.
    pub sections: Vec<Section>,
}

/// Compose a stored landing page into its rendering model.
#[must_use]
pub fn compose(page: &LandingPage) -> LandingPageModel {
    let sections = resolve_order(page.section_order.as_deref())
        .into_iter()
        .filter(|key| page.is_shown(*key))
        .map(|key| Section::compose(&FieldSource::new(key, page.section_blob(key), &page.legacy)))
        .collect();

    LandingPageModel {
        id: page.id,
        slug: page.slug.clone(),
        store_id: page.store_id,
        title: page.title.clone(),
        sections,
    }
}
