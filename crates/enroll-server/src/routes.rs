// ABOUTME: Route definitions for the enroll editor service.
// ABOUTME: Assembles page and API routes, the Basic auth gate and request tracing into one Router.

use axum::Router;
use axum::routing::{get, post};
use enroll_core::WebAuth;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;
use crate::auth::gate;
use crate::web;

/// Build the complete router. `auth` is fixed for the lifetime of the router;
/// credential changes saved through the editor apply on the next start.
pub fn create_router(state: SharedState, auth: &WebAuth) -> Router {
    let router = Router::new()
        .route("/", get(web::index))
        .route("/getConfig", get(api::config::get_config))
        .route("/saveConfig", post(api::config::save_config))
        .fallback(web::index)
        .with_state(state);

    gate(router, auth).layer(TraceLayer::new_for_http())
}
