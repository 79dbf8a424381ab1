//! Response headers derived from the request host

use axum::{
    body::Body,
    extract::State,
    http::{header::CONTENT_LANGUAGE, HeaderValue, Request, Response},
    middleware::Next,
};

use crate::{routing::request_hostname, state::AppState};

/// Sets `Content-Language` to the locale of the language subdomain serving the request
pub async fn locale_headers_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let config = &state.config;
    let host = request_hostname(
        request.headers(),
        &config.cookie_cutter_header,
        config.app_host(),
    );
    let locale = config.locales.locale_from_host(&host).to_string();

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&locale) {
        response.headers_mut().insert(CONTENT_LANGUAGE, value);
    }
    response
}
