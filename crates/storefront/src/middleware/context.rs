//! Per-request store context.
//!
//! Every storefront request is served on behalf of one store. The store is
//! chosen from the `Host` header (matched against `stores.domain`) and falls
//! back to `STOREFRONT_DEFAULT_STORE_ID`; with neither, only global content
//! is visible.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use multishop_core::StoreId;
use tracing::Span;

use crate::db::{RepositoryError, StoreDirectory};
use crate::error::AppError;
use crate::state::AppState;

/// The store and base URL a request is served for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// `None` when only global rows should be visible.
    pub store_id: Option<StoreId>,
    /// Public base URL without trailing slash.
    pub base_url: String,
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let host = request_host(&parts.headers);
        let store_id = resolve_store(
            state.database(),
            host.as_deref(),
            state.config().default_store_id,
        )
        .await?;

        if let Some(store) = store_id {
            Span::current().record("store_id", store.as_i32());
        }

        Ok(Self {
            store_id,
            base_url: state.base_url().to_owned(),
        })
    }
}

/// Host name of the request, lowercased and without port.
///
/// Prefers `X-Forwarded-Host` (set by the reverse proxy) over `Host`.
#[must_use]
pub fn request_host(headers: &HeaderMap) -> Option<String> {
    let raw = headers
        .get("x-forwarded-host")
        .or_else(|| headers.get(header::HOST))?
        .to_str()
        .ok()?;

    // First entry of a proxy chain, then strip the port (IPv6 literals keep brackets)
    let host = raw.split(',').next()?.trim();
    let host = match host.strip_prefix('[') {
        Some(bracketed) => bracketed.split(']').next().unwrap_or(bracketed),
        None => host.split(':').next().unwrap_or(host),
    };

    let host = host.trim().to_ascii_lowercase();
    (!host.is_empty()).then_some(host)
}

/// Pick the store for `host`, falling back to `default`.
///
/// # Errors
///
/// Returns `RepositoryError` if the store lookup fails.
pub async fn resolve_store<D: StoreDirectory>(
    directory: &D,
    host: Option<&str>,
    default: Option<StoreId>,
) -> Result<Option<StoreId>, RepositoryError> {
    let Some(host) = host else {
        return Ok(default);
    };
    Ok(directory.store_for_domain(host).await?.or(default))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;
    use crate::db::memory::MemoryDatabase;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_request_host_strips_port_and_case() {
        assert_eq!(
            request_host(&headers(&[("host", "Shop.Example.com:8080")])).as_deref(),
            Some("shop.example.com")
        );
        assert_eq!(
            request_host(&headers(&[("host", "[::1]:3000")])).as_deref(),
            Some("::1")
        );
        assert_eq!(request_host(&HeaderMap::new()), None);
    }

    #[test]
    fn test_forwarded_host_wins() {
        let map = headers(&[
            ("host", "127.0.0.1:3000"),
            ("x-forwarded-host", "mugs.test, proxy.internal"),
        ]);
        assert_eq!(request_host(&map).as_deref(), Some("mugs.test"));
    }

    #[tokio::test]
    async fn test_resolve_store_by_domain_then_default() {
        let mut db = MemoryDatabase::new();
        db.stores.insert("mugs.test".to_owned(), StoreId::new(2));
        let default = Some(StoreId::new(1));

        assert_eq!(
            resolve_store(&db, Some("mugs.test"), default).await.unwrap(),
            Some(StoreId::new(2))
        );
        assert_eq!(
            resolve_store(&db, Some("unknown.test"), default).await.unwrap(),
            default
        );
        assert_eq!(resolve_store(&db, None, None).await.unwrap(), None);
    }
}
