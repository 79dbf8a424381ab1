//! Locale and domain endpoints used by the front end

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use visasite_shared::{resolve_domain, TargetMode};

use crate::{
    currency::preferred_currency,
    error::ApiResult,
    routing::{LocaleLink, LocaleLinks, RequestHost},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct DomainQuery {
    /// `cookie` or a 2-letter locale code; defaults to `cookie`
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DomainResponse {
    pub hostname: String,
    pub mode: String,
    pub resolved: String,
    pub cookie_domain: String,
    pub client_ip: Option<String>,
}

/// Rewrite the request host for a locale or cookie scope
pub async fn resolve(
    State(state): State<AppState>,
    host: RequestHost,
    Query(query): Query<DomainQuery>,
) -> ApiResult<Json<DomainResponse>> {
    let mode: TargetMode = query.mode.as_deref().unwrap_or("cookie").parse()?;
    let resolved = resolve_domain(&host.hostname, &mode, &state.config.locales);

    tracing::debug!(host = %host.hostname, mode = %mode, resolved = %resolved, "resolved domain");

    Ok(Json(DomainResponse {
        hostname: host.hostname,
        mode: mode.to_string(),
        resolved,
        cookie_domain: host.cookie_domain,
        client_ip: host.client_ip,
    }))
}

#[derive(Debug, Serialize)]
pub struct LocalesResponse {
    pub current: String,
    pub locales: Vec<LocaleLink>,
}

/// Language switcher entries for the request host
pub async fn list_locales(
    State(state): State<AppState>,
    host: RequestHost,
) -> Json<LocalesResponse> {
    let links = LocaleLinks::for_host(state.config.scheme(), &host.hostname, &state.config.locales);

    Json(LocalesResponse {
        current: host.locale,
        locales: links.switcher().to_vec(),
    })
}

#[derive(Debug, Deserialize)]
pub struct PreferencesQuery {
    pub currency: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub locale: String,
    pub locale_name: String,
    pub currency: String,
    pub cookie_domain: String,
    pub client_ip: Option<String>,
}

/// Display preferences of the current visitor
pub async fn preferences(
    State(state): State<AppState>,
    host: RequestHost,
    headers: HeaderMap,
    Query(query): Query<PreferencesQuery>,
) -> Json<PreferencesResponse> {
    let config = &state.config;
    let currency = preferred_currency(
        query.currency.as_deref(),
        &headers,
        &config.default_currency,
    );

    Json(PreferencesResponse {
        locale_name: config.locales.pretty_locale_name(Some(&host.locale)),
        locale: host.locale,
        currency,
        cookie_domain: host.cookie_domain,
    })
}
