//! API routes

pub mod flash;
pub mod health;
pub mod locale;
pub mod visa;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{middleware::locale_headers_middleware, state::AppState};

/// Create all API routes
pub fn create_router(state: AppState) -> Router {
    // Health check routes (at root level for infrastructure monitoring)
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness));

    let api_routes = Router::new()
        .route("/domain", get(locale::resolve))
        .route("/locales", get(locale::list_locales))
        .route("/preferences", get(locale::preferences))
        .route("/flash", get(flash::pull_flash))
        .route("/apply-url/:country", get(visa::application_url))
        .route("/category-url/:country", get(visa::category_url));

    Router::new()
        .merge(health_routes)
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            locale_headers_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
