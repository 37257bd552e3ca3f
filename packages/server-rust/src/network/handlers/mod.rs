//! HTTP handlers for the Dashkit server.
//!
//! This module defines `AppState` (the shared state carried through axum
//! extractors) and re-exports every handler for router assembly.

pub mod badges;
pub mod health;
pub mod highlight;
pub mod preferences;
pub mod records;
pub mod stats;

pub use badges::badge_handler;
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use highlight::highlight_handler;
pub use preferences::{get_color_mode_handler, put_color_mode_handler, toggle_color_mode_handler};
pub use records::{data_users_handler, orders_handler, products_handler, users_handler};
pub use stats::stats_handler;

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use dashkit_core::{ColorModeStore, PreferenceBackend};

use super::{NetworkConfig, ShutdownController};
use crate::dataset::Dataset;

/// Shared state handed to every handler. Cloning copies `Arc`s only.
#[derive(Clone)]
pub struct AppState {
    /// Records served by the list and stats endpoints. Read-only.
    pub dataset: Arc<Dataset>,
    /// The one color-mode store for this server.
    pub color_mode: Arc<Mutex<ColorModeStore>>,
    /// Where the color mode is persisted.
    pub preferences: Arc<dyn PreferenceBackend>,
    /// Health state and in-flight tracking.
    pub shutdown: Arc<ShutdownController>,
    pub config: Arc<NetworkConfig>,
    /// Used for uptime reporting.
    pub start_time: Instant,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use dashkit_core::MemoryBackend;

    use crate::dataset::fixtures;

    pub fn state_with(dataset: Dataset) -> AppState {
        AppState {
            dataset: Arc::new(dataset),
            color_mode: Arc::new(Mutex::new(ColorModeStore::new())),
            preferences: Arc::new(MemoryBackend::default()),
            shutdown: Arc::new(ShutdownController::new()),
            config: Arc::new(NetworkConfig::default()),
            start_time: Instant::now(),
        }
    }

    pub fn sample_state() -> AppState {
        state_with(fixtures::sample())
    }
}
