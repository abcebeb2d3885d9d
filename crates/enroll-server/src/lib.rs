// ABOUTME: HTTP server for enroll, letting an operator edit the agent configuration in a browser.
// ABOUTME: Uses Axum with a Basic auth gate, request-scoped config access and contention-tolerant bind.

pub mod api;
pub mod app_state;
pub mod auth;
pub mod error;
pub mod routes;
pub mod startup;
pub mod web;

pub use app_state::{AppState, SharedState};
pub use auth::{BasicAuthLayer, gate};
pub use error::ApiError;
pub use routes::create_router;
pub use startup::{BindError, bind_with_fallback, editor_url, startup_web_config};
pub use web::PageSource;
