//! Flash message endpoint polled by the page shell

use axum::{extract::State, http::HeaderMap, Json};
use serde::Serialize;

use crate::{
    cookies::{cookie_value, SESSION_COOKIE},
    flash::FlashMessage,
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct FlashResponse {
    pub flash: Option<FlashMessage>,
}

/// Return and clear the pending flash message of the session
pub async fn pull_flash(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<FlashResponse> {
    let flash =
        cookie_value(&headers, SESSION_COOKIE).and_then(|session| state.flash.pull(&session));

    Json(FlashResponse { flash })
}
