//! Visa page link endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use crate::{
    routing::{CategoryTarget, RequestHost},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub url: String,
}

fn site_root(state: &AppState, host: &RequestHost) -> String {
    format!("{}://{}", state.config.scheme(), host.hostname)
}

/// Application form URL for a country; query parameters are forwarded
pub async fn application_url(
    State(state): State<AppState>,
    host: RequestHost,
    Path(country): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<UrlResponse> {
    let url = state
        .visa_routes
        .application_url(&site_root(&state, &host), &country, &params, None);

    Json(UrlResponse { url })
}

/// Default visa category page for a country
pub async fn category_url(
    State(state): State<AppState>,
    host: RequestHost,
    Path(country): Path<String>,
) -> Json<UrlResponse> {
    let url = state
        .visa_routes
        .category_url(&site_root(&state, &host), CategoryTarget::Country(&country));

    Json(UrlResponse { url })
}
