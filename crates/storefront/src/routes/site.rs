//! Site chrome API.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::SettingsSource;
use crate::error::Result;
use crate::middleware::RequestContext;
use crate::services::site::SiteView;
use crate::state::AppState;

/// Identity, menus, contact details, social links and currencies.
#[instrument(skip(state, ctx), fields(store_id = ?ctx.store_id))]
pub async fn site(State(state): State<AppState>, ctx: RequestContext) -> Result<Json<SiteView>> {
    let settings = state.database().load_settings().await?;
    Ok(Json(SiteView::from_settings(&settings, &ctx.base_url)))
}
