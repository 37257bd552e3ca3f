//! Dashkit Server — axum HTTP API over the dashkit-core record, stats,
//! badge, highlighting, and color-mode utilities.

pub mod dataset;
pub mod error;
pub mod network;
pub mod preferences;

pub use dataset::Dataset;
pub use error::ApiError;
pub use network::{NetworkConfig, NetworkModule, ServerConfig};
pub use preferences::FilePreferenceBackend;
