// ABOUTME: Shared application state for the enroll HTTP server.
// ABOUTME: Holds the config store, the page source and the lock serialising config file access.

use std::sync::Arc;

use enroll_store::ConfigStore;
use tokio::sync::Mutex;

use crate::web::PageSource;

/// Shared application state accessible by all Axum handlers.
///
/// No configuration is cached here: handlers load from `store` on every
/// request. `config_lock` is held across each load or load-apply-save so a
/// fetch never sees a half-applied save and two saves never interleave.
pub struct AppState {
    pub store: ConfigStore,
    pub page: PageSource,
    pub config_lock: Mutex<()>,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(store: ConfigStore, page: PageSource) -> Self {
        Self {
            store,
            page,
            config_lock: Mutex::new(()),
        }
    }
}
