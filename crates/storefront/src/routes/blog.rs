//! Blog route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use multishop_core::{BlogPost, Slug};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::ContentSource;
use crate::error::{AppError, Result};
use crate::middleware::RequestContext;
use crate::state::AppState;

/// Number of posts listed on `/blog`.
const RECENT_POSTS_COUNT: i64 = 10;

/// Query string of `/blog.php`.
#[derive(Debug, Deserialize)]
pub struct BlogQuery {
    pub slug: Option<String>,
}

/// Body of `/blog`.
#[derive(Debug, Serialize)]
pub struct BlogIndex {
    pub posts: Vec<BlogPost>,
}

/// Recent published posts for the current store.
#[instrument(skip(state, ctx), fields(store_id = ?ctx.store_id))]
pub async fn index(State(state): State<AppState>, ctx: RequestContext) -> Result<Json<BlogIndex>> {
    let posts = state
        .database()
        .recent_blogs(ctx.store_id, RECENT_POSTS_COUNT)
        .await?;
    Ok(Json(BlogIndex { posts }))
}

/// A single published post: `/blog.php?slug=...`.
#[instrument(skip(state, ctx), fields(store_id = ?ctx.store_id))]
pub async fn show(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<BlogQuery>,
) -> Result<Json<BlogPost>> {
    let slug = query_slug(query.slug.as_deref())?;
    state
        .database()
        .find_blog(&slug, ctx.store_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("blog post {slug}")))
}

/// Validate the `slug` query parameter.
///
/// Missing or blank is a bad request; anything that sanitizes to nothing
/// cannot name a post.
fn query_slug(raw: Option<&str>) -> Result<Slug> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("missing slug parameter".to_string()))?;
    Slug::sanitize(raw).map_err(|e| AppError::NotFound(format!("blog post ({e})")))
}
