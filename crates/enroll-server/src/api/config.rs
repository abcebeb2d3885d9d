// ABOUTME: Configuration fetch and save handlers.
// ABOUTME: Fetch always re-reads the file; save applies, validates, then persists atomically.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use enroll_core::{EnrollConfig, TransferConfig};

use crate::app_state::SharedState;
use crate::error::ApiError;

/// Body returned after a successful save.
pub const SAVED_MESSAGE: &str = "configuration saved";

/// GET /getConfig - Current on-disk configuration in transfer form.
pub async fn get_config(State(state): State<SharedState>) -> Result<Json<TransferConfig>, ApiError> {
    let _guard = state.config_lock.lock().await;
    let cfg = state.store.load().map_err(ApiError::Load)?;
    Ok(Json(TransferConfig::from(&cfg)))
}

/// POST /saveConfig - Replace the web-editable configuration.
///
/// Nothing is written unless the merged configuration validates.
pub async fn save_config(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let transfer: TransferConfig = serde_json::from_slice(&body).map_err(ApiError::Decode)?;

    let _guard = state.config_lock.lock().await;
    let mut cfg = match state.store.load() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::debug!("saving over defaults, current configuration unreadable: {}", e);
            EnrollConfig::default()
        }
    };
    transfer.apply_to(&mut cfg);

    cfg.validate().map_err(ApiError::Invalid)?;
    state.store.save(&cfg).map_err(ApiError::Save)?;

    tracing::info!(
        courses = cfg.course.len(),
        path = %state.store.path().display(),
        "configuration saved"
    );
    Ok(SAVED_MESSAGE)
}
