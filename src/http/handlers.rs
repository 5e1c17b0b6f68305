//! Request handlers.
//!
//! The layout endpoint mirrors the CMS REST layout service:
//! `GET /sitecore/api/layout/render/{configuration}?item=/about&sc_lang=en`.
//! Other query parameters the rendering host sends (`sc_apikey`, `sc_site`)
//! are accepted and ignored.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::request::request_id;
use crate::http::server::AppState;

/// Response header naming how the document was resolved.
pub const X_LAYOUT_OUTCOME: &str = "x-layout-outcome";

#[derive(Debug, Default, Deserialize)]
pub struct LayoutQuery {
    /// Page path; absent means the home page.
    pub item: Option<String>,
    /// Requested language.
    pub sc_lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// Resolve a page's layout data.
///
/// Found and fallback documents are 200; synthetic documents are 404 with
/// the "not found" layout as body so the renderer can still draw its 404 page.
pub async fn render_layout(
    State(state): State<AppState>,
    Path(configuration): Path<String>,
    Query(query): Query<LayoutQuery>,
    headers: HeaderMap,
) -> Response {
    let resolver = state.resolver.load_full();
    let item = query.item.as_deref().unwrap_or("/");

    let resolved = resolver
        .resolve_detailed(item, query.sc_lang.as_deref())
        .await;
    let outcome = resolved.resolution.as_str();

    tracing::debug!(
        request_id = %request_id(&headers),
        configuration = %configuration,
        item = %item,
        outcome,
        "Layout resolved"
    );

    let status = if resolved.resolution.is_found() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };

    (status, [(X_LAYOUT_OUTCOME, outcome)], Json(resolved.document)).into_response()
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
