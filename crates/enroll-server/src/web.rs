// ABOUTME: Serves the single-page configuration editor.
// ABOUTME: The page is embedded at build time, or read from disk when a path is configured.

use std::path::PathBuf;

use axum::extract::State;
use axum::response::Html;

use crate::app_state::SharedState;
use crate::error::ApiError;

static EDITOR_PAGE: &str = include_str!("../static/index.html");

/// Where the editor page comes from.
#[derive(Debug, Clone, Default)]
pub enum PageSource {
    #[default]
    Embedded,
    /// Read on every request, so edits show up without a restart.
    File(PathBuf),
}

impl PageSource {
    pub fn read(&self) -> std::io::Result<Vec<u8>> {
        match self {
            PageSource::Embedded => Ok(EDITOR_PAGE.as_bytes().to_vec()),
            PageSource::File(path) => std::fs::read(path),
        }
    }
}

/// GET / - The editor page.
pub async fn index(State(state): State<SharedState>) -> Result<Html<Vec<u8>>, ApiError> {
    state.page.read().map(Html).map_err(ApiError::Page)
}
