//! Currency preference of the current visitor

use axum::http::HeaderMap;
use visasite_shared::json::decode_object;

use crate::cookies::cookie_value;

/// Cookie holding the front-end store; settings.currency is the visitor's pick
const STORE_COOKIE: &str = "vuex";

/// Currency to display prices in: the `currency` query parameter, then the
/// front-end store cookie, then `default`. Any non-empty query value is taken
/// as given.
pub fn preferred_currency(
    query_currency: Option<&str>,
    headers: &HeaderMap,
    default: &str,
) -> String {
    if let Some(currency) = query_currency.filter(|c| !c.is_empty()) {
        return currency.to_string();
    }

    cookie_value(headers, STORE_COOKIE)
        .and_then(|store| currency_from_store(&store))
        .unwrap_or_else(|| default.to_string())
}

fn currency_from_store(store: &str) -> Option<String> {
    match decode_object(Some(store)) {
        Ok(state) => state
            .get("settings")
            .and_then(|settings| settings.get("currency"))
            .and_then(|currency| currency.as_str())
            .filter(|currency| !currency.is_empty())
            .map(str::to_string),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring unreadable store cookie");
            None
        }
    }
}
