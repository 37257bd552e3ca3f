//! Color-mode preference endpoints.
//!
//! The store is hydrated at startup; if that failed, the first read retries
//! before answering so the client never sees the default over a saved value
//! that is merely slow to load.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use dashkit_core::{ColorMode, Hydration};

use super::AppState;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorModeResponse {
    pub mode: ColorMode,
    pub hydration: Hydration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetColorModeRequest {
    pub mode: ColorMode,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleColorModeRequest {
    /// OS preference, used to resolve `system` before flipping.
    #[serde(default)]
    pub system_prefers_dark: bool,
}

fn snapshot(state: &AppState) -> ColorModeResponse {
    let store = state.color_mode.lock();
    ColorModeResponse {
        mode: store.mode(),
        hydration: store.hydration(),
    }
}

/// `GET /api/preferences/color-mode`
pub async fn get_color_mode_handler(State(state): State<AppState>) -> Json<ColorModeResponse> {
    {
        let mut store = state.color_mode.lock();
        if !store.is_hydrated() {
            if let Err(error) = store.hydrate_from(state.preferences.as_ref()) {
                warn!(%error, "color mode still unhydrated");
            }
        }
    }
    Json(snapshot(&state))
}

/// `PUT /api/preferences/color-mode` with `{ "mode": "dark" }`.
///
/// # Errors
///
/// Returns [`ApiError::Preference`] if the preference cannot be persisted.
/// The in-memory mode is updated either way.
pub async fn put_color_mode_handler(
    State(state): State<AppState>,
    Json(request): Json<SetColorModeRequest>,
) -> Result<Json<ColorModeResponse>, ApiError> {
    state
        .color_mode
        .lock()
        .set(request.mode, state.preferences.as_ref())?;
    info!(mode = %request.mode, "color mode set");
    Ok(Json(snapshot(&state)))
}

/// `POST /api/preferences/color-mode/toggle`
///
/// # Errors
///
/// Returns [`ApiError::Preference`] if the preference cannot be persisted.
pub async fn toggle_color_mode_handler(
    State(state): State<AppState>,
    Json(request): Json<ToggleColorModeRequest>,
) -> Result<Json<ColorModeResponse>, ApiError> {
    let mode = state
        .color_mode
        .lock()
        .toggle(request.system_prefers_dark, state.preferences.as_ref())?;
    info!(%mode, "color mode toggled");
    Ok(Json(snapshot(&state)))
}
