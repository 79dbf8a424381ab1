//! Request cookie lookup

use axum::http::{header::COOKIE, HeaderMap};
use cookie::Cookie;

/// Cookie carrying the visitor's session id
pub const SESSION_COOKIE: &str = "visasite_session";

/// Percent-decoded value of the first cookie named `name`
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|header| {
            Cookie::split_parse_encoded(header)
                .filter_map(Result::ok)
                .find(|cookie| cookie.name() == name)
                .map(|cookie| cookie.value().to_string())
        })
}
