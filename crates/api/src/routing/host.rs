//! Request hostname derivation
//!
//! The hostname that drives locale links and cookie scoping comes from:
//! 1. the cookie-cutter override header set by the fronting proxy
//! 2. the Host header (port stripped, lowercased)
//! 3. the configured APP_URL host when neither is present

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::HOST, request::Parts, HeaderMap},
};
use visasite_shared::{cookie_domain, LocaleCatalog};

use crate::{error::ApiError, state::AppState};

/// Hostname of the current request, with the values derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHost {
    /// Normalized hostname, e.g. `es.ivisa.com`
    pub hostname: String,
    /// Cookie `Domain=` value, e.g. `.ivisa.com`
    pub cookie_domain: String,
    /// Locale the request is served in
    pub locale: String,
    /// Visitor address reported by the fronting proxy
    pub client_ip: Option<String>,
}

impl RequestHost {
    pub fn new(hostname: String, locales: &LocaleCatalog) -> Self {
        let cookie_domain = cookie_domain(&hostname, locales);
        let locale = locales.locale_from_host(&hostname).to_string();
        Self {
            hostname,
            cookie_domain,
            locale,
            client_ip: None,
        }
    }

    pub fn with_client_ip(mut self, client_ip: Option<String>) -> Self {
        self.client_ip = client_ip;
        self
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequestHost {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let config = &state.config;
        let hostname = request_hostname(
            &parts.headers,
            &config.cookie_cutter_header,
            config.app_host(),
        );
        let client_ip = extract_client_ip(&parts.headers);
        tracing::trace!(
            host = %hostname,
            client_ip = client_ip.as_deref().unwrap_or("-"),
            "resolved request host"
        );

        Ok(RequestHost::new(hostname, &config.locales).with_client_ip(client_ip))
    }
}

/// Hostname for a request: override header, then Host, then the fallback
pub fn request_hostname(headers: &HeaderMap, override_header: &str, fallback: &str) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|h| !h.is_empty())
    };

    header(override_header)
        .or_else(|| header(HOST.as_str()))
        .map(normalize_host)
        .unwrap_or_else(|| normalize_host(fallback))
}

/// Normalize a host header value
pub fn normalize_host(host: &str) -> String {
    // Bracketed IPv6 literal, optionally with a port
    if let Some(rest) = host.strip_prefix('[') {
        let inner = rest.split(']').next().unwrap_or(rest);
        return inner.to_lowercase();
    }

    // A bare IPv6 literal has several colons and no port
    if host.matches(':').count() > 1 {
        return host.to_lowercase();
    }

    let host = host.split(':').next().unwrap_or(host);
    host.to_lowercase()
}

/// Proxy headers carrying the visitor address, most trusted first
const CLIENT_IP_HEADERS: &[&str] = &["cf-connecting-ip", "x-real-ip", "x-forwarded-for"];

/// Visitor address from the first proxy header that has one. A forwarded-for
/// chain yields its first hop.
pub fn extract_client_ip(headers: &HeaderMap) -> Option<String> {
    CLIENT_IP_HEADERS.iter().find_map(|name| {
        let value = headers.get(*name)?.to_str().ok()?;
        let first = value.split(',').next()?.trim();
        (!first.is_empty()).then(|| first.to_string())
    })
}
