//! Content route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use multishop_core::ResolvedContent;
use tracing::{debug, instrument};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::RequestContext;
use crate::services::content_router::{self, ContentView};
use crate::state::AppState;

/// Resolve `/{slug}` to a page, landing page or blog post.
///
/// A slug axum cannot decode (invalid UTF-8 after percent-decoding) is
/// treated like any other unknown slug.
#[instrument(skip(state, ctx, slug), fields(store_id = ?ctx.store_id))]
pub async fn show(
    State(state): State<AppState>,
    ctx: RequestContext,
    slug: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<ContentView>> {
    let Path(slug) = slug.map_err(|rejection| {
        debug!(error = %rejection, "Undecodable slug");
        AppError::NotFound("content".to_owned())
    })?;

    let resolved = content_router::resolve(state.database(), &slug, ctx.store_id).await?;
    render(resolved, &slug)
}

/// Home page: the content named by the `homepage_slug` setting.
#[instrument(skip(state, ctx), fields(store_id = ?ctx.store_id))]
pub async fn home(State(state): State<AppState>, ctx: RequestContext) -> Result<Json<ContentView>> {
    let resolved = content_router::resolve_home(state.database(), ctx.store_id).await?;
    render(resolved, "/")
}

fn render(resolved: ResolvedContent, slug: &str) -> Result<Json<ContentView>> {
    add_breadcrumb("content", "Resolved slug", Some(&[("kind", resolved.kind())]));

    ContentView::from_resolved(resolved)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("content {slug:?}")))
}
