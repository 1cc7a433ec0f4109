//! Sitemap route handler.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequestContext;
use crate::services::sitemap;
use crate::state::AppState;

/// XML sitemap of every URL visible to the current store.
#[instrument(skip(state, ctx), fields(store_id = ?ctx.store_id))]
pub async fn sitemap(State(state): State<AppState>, ctx: RequestContext) -> Result<Response> {
    let entries = sitemap::entries(state.database(), &ctx.base_url, ctx.store_id).await?;
    let xml = sitemap::render(&entries).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(xml_response(xml))
}

fn xml_response(xml: String) -> Response {
    ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_content_type() {
        let response = xml_response("<urlset/>".to_string());
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/xml; charset=utf-8"
        );
    }
}
