//! Server lifecycle: construct, bind, serve, drain.
//!
//! `new()` allocates shared state, `start()` binds the listener, and
//! `serve()` runs until the shutdown future resolves. Keeping the steps
//! apart lets the caller hydrate preferences and log the bound port
//! before traffic arrives.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::routing::{get, post};
use axum::Router;
use parking_lot::Mutex;
use tokio::net::TcpListener;
use tracing::{info, warn};

use dashkit_core::{ColorModeError, ColorModeStore, MemoryBackend, PreferenceBackend};

use super::config::{NetworkConfig, ServerConfig};
use super::handlers::{
    badge_handler, data_users_handler, get_color_mode_handler, health_handler, highlight_handler,
    liveness_handler, orders_handler, products_handler, put_color_mode_handler, readiness_handler,
    stats_handler, toggle_color_mode_handler, users_handler, AppState,
};
use super::middleware::{build_http_layers, track_in_flight};
use super::shutdown::ShutdownController;
use crate::dataset::Dataset;
use crate::preferences::FilePreferenceBackend;

/// Owns the listener and the state shared by every handler.
pub struct NetworkModule {
    config: NetworkConfig,
    listener: Option<TcpListener>,
    state: AppState,
}

impl NetworkModule {
    /// Creates the module without binding any port. The color-mode store
    /// starts unhydrated.
    #[must_use]
    pub fn new(config: NetworkConfig, dataset: Dataset, preferences: Arc<dyn PreferenceBackend>) -> Self {
        let state = AppState {
            dataset: Arc::new(dataset),
            color_mode: Arc::new(Mutex::new(ColorModeStore::new())),
            preferences,
            shutdown: Arc::new(ShutdownController::new()),
            config: Arc::new(config.clone()),
            start_time: Instant::now(),
        };
        Self {
            config,
            listener: None,
            state,
        }
    }

    /// Loads the dataset and picks the preference backend named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured dataset cannot be read or parsed.
    pub fn from_server_config(config: ServerConfig) -> anyhow::Result<Self> {
        let dataset = match &config.data_path {
            Some(path) => Dataset::load(path)?,
            None => {
                warn!("no dataset configured, serving empty collections");
                Dataset::default()
            }
        };
        let preferences: Arc<dyn PreferenceBackend> = match config.preferences_path {
            Some(path) => Arc::new(FilePreferenceBackend::new(path)),
            None => Arc::new(MemoryBackend::default()),
        };
        Ok(Self::new(config.network, dataset, preferences))
    }

    #[must_use]
    pub fn shutdown_controller(&self) -> Arc<ShutdownController> {
        Arc::clone(&self.state.shutdown)
    }

    /// Applies the persisted color mode.
    ///
    /// # Errors
    ///
    /// Returns [`ColorModeError::Load`] if the backend cannot be read; the
    /// store stays unhydrated and the next read retries.
    pub fn hydrate_color_mode(&self) -> Result<bool, ColorModeError> {
        let mut store = self.state.color_mode.lock();
        let applied = store.hydrate_from(self.state.preferences.as_ref())?;
        info!(mode = %store.mode(), "color mode ready");
        Ok(applied)
    }

    /// Assembles the router.
    ///
    /// Routes:
    /// - `GET /health`, `/health/live`, `/health/ready`
    /// - `GET /api/products`, `/api/orders`, `/api/users`, `/api/data-users`
    /// - `GET /api/stats`
    /// - `GET /api/badges/{kind}/{value}`
    /// - `POST /api/highlight`
    /// - `GET|PUT /api/preferences/color-mode`, `POST .../toggle`
    ///
    /// Health routes bypass in-flight tracking so probes keep answering
    /// while draining.
    pub fn build_router(&self) -> Router {
        let state = self.state.clone();

        let api = Router::new()
            .route("/products", get(products_handler))
            .route("/orders", get(orders_handler))
            .route("/users", get(users_handler))
            .route("/data-users", get(data_users_handler))
            .route("/stats", get(stats_handler))
            .route("/badges/{kind}/{value}", get(badge_handler))
            .route("/highlight", post(highlight_handler))
            .route(
                "/preferences/color-mode",
                get(get_color_mode_handler).put(put_color_mode_handler),
            )
            .route("/preferences/color-mode/toggle", post(toggle_color_mode_handler))
            .route_layer(axum::middleware::from_fn_with_state(state.clone(), track_in_flight));

        Router::new()
            .route("/health", get(health_handler))
            .route("/health/live", get(liveness_handler))
            .route("/health/ready", get(readiness_handler))
            .nest("/api", api)
            .layer(build_http_layers(&self.config))
            .with_state(state)
    }

    /// Binds the listener and returns the actual port (useful with port 0).
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves until `shutdown` resolves, then drains in-flight requests for
    /// up to `drain_timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if `start()` was not called or the server hits a
    /// fatal I/O error.
    pub async fn serve(mut self, shutdown: impl Future<Output = ()> + Send + 'static) -> anyhow::Result<()> {
        let listener = self
            .listener
            .take()
            .ok_or_else(|| anyhow::anyhow!("start() must be called before serve()"))?;
        let router = self.build_router();
        let controller = self.shutdown_controller();
        let drain_timeout = self.config.drain_timeout;

        controller.set_ready();
        info!("serving HTTP");

        let signal_controller = Arc::clone(&controller);
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                signal_controller.trigger_shutdown();
            })
            .await?;

        if controller.wait_for_drain(drain_timeout).await {
            info!("all requests drained");
        } else {
            warn!(
                in_flight = controller.in_flight_count(),
                "drain timeout expired with requests still in flight"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use dashkit_core::ColorMode;
    use tower::ServiceExt;

    use crate::dataset::fixtures;

    fn module() -> NetworkModule {
        NetworkModule::new(
            NetworkConfig::default(),
            fixtures::sample(),
            Arc::new(MemoryBackend::with_mode(ColorMode::Dark)),
        )
    }

    async fn call(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn json_req(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn new_does_not_bind() {
        assert!(module().listener.is_none());
    }

    #[test]
    fn shutdown_controller_is_shared() {
        let m = module();
        assert!(Arc::ptr_eq(&m.shutdown_controller(), &m.shutdown_controller()));
    }

    #[test]
    fn hydrate_applies_persisted_mode_once() {
        let m = module();
        assert!(m.hydrate_color_mode().unwrap());
        assert!(!m.hydrate_color_mode().unwrap());
        assert_eq!(m.state.color_mode.lock().mode(), ColorMode::Dark);
    }

    #[test]
    fn from_server_config_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.json");
        let prefs = dir.path().join("prefs.json");
        std::fs::write(&data, fixtures::SAMPLE).unwrap();
        std::fs::write(&prefs, r#"{"colorMode":"dark"}"#).unwrap();

        let m = NetworkModule::from_server_config(ServerConfig {
            data_path: Some(data),
            preferences_path: Some(prefs),
            ..ServerConfig::default()
        })
        .unwrap();
        assert_eq!(m.state.dataset.orders.len(), 3);
        assert!(m.hydrate_color_mode().unwrap());
        assert_eq!(m.state.color_mode.lock().mode(), ColorMode::Dark);
    }

    #[test]
    fn from_server_config_without_files_is_empty() {
        let m = NetworkModule::from_server_config(ServerConfig::default()).unwrap();
        assert_eq!(*m.state.dataset, Dataset::default());
        assert!(m.hydrate_color_mode().unwrap());
        assert_eq!(m.state.color_mode.lock().mode(), ColorMode::Light);
    }

    #[test]
    fn from_server_config_rejects_bad_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.json");
        std::fs::write(&data, "{\"products\": 7}").unwrap();
        let result = NetworkModule::from_server_config(ServerConfig {
            data_path: Some(data),
            ..ServerConfig::default()
        });
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn start_binds_to_os_assigned_port() {
        let mut m = NetworkModule::new(
            NetworkConfig {
                host: "127.0.0.1".to_string(),
                ..NetworkConfig::default()
            },
            Dataset::default(),
            Arc::new(MemoryBackend::default()),
        );
        let port = m.start().await.unwrap();
        assert!(port > 0);
        assert!(m.listener.is_some());
    }

    #[tokio::test]
    async fn serve_without_start_is_an_error() {
        let err = module().serve(std::future::pending::<()>()).await.unwrap_err();
        assert!(err.to_string().contains("start()"));
    }

    #[tokio::test]
    async fn list_endpoint_filters_and_paginates() {
        let (status, body) = call(
            module().build_router(),
            get_req("/api/users?search=sarah&role=all&pageSize=1"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalItems"], 2);
        assert_eq!(body["totalPages"], 2);
        assert_eq!(body["items"][0]["id"], "u1");
    }

    #[tokio::test]
    async fn bad_page_size_is_json_400() {
        let (status, body) = call(module().build_router(), get_req("/api/orders?pageSize=0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("pageSize"));
    }

    #[tokio::test]
    async fn stats_endpoint() {
        let (status, body) = call(module().build_router(), get_req("/api/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["products"]["outOfStock"], 1);
        assert_eq!(body["users"]["total"], 3);
    }

    #[tokio::test]
    async fn badge_endpoint() {
        let router = module().build_router();
        let (status, body) = call(router.clone(), get_req("/api/badges/order-status/shipped")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["label"], "Shipped");

        let (status, body) = call(router, get_req("/api/badges/nope/shipped")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not found: unknown badge kind: nope");
    }

    #[tokio::test]
    async fn highlight_endpoint() {
        let (status, body) = call(
            module().build_router(),
            json_req("POST", "/api/highlight", r#"{"source":"a < b","language":"plain"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["html"], "a &lt; b");
    }

    #[tokio::test]
    async fn color_mode_round_trip() {
        let router = module().build_router();
        let (status, body) = call(router.clone(), get_req("/api/preferences/color-mode")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "dark");
        assert_eq!(body["hydration"], "hydrated");

        let (status, body) = call(
            router.clone(),
            json_req("PUT", "/api/preferences/color-mode", r#"{"mode":"system"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "system");

        let (status, body) = call(
            router,
            json_req(
                "POST",
                "/api/preferences/color-mode/toggle",
                r#"{"systemPrefersDark":true}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "light");
    }

    #[tokio::test]
    async fn draining_refuses_api_but_not_health() {
        let m = module();
        let router = m.build_router();
        m.shutdown_controller().set_ready();
        m.shutdown_controller().trigger_shutdown();

        let (status, body) = call(router.clone(), get_req("/api/stats")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "server is shutting down");

        let (status, _) = call(router.clone(), get_req("/health/live")).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(router, get_req("/health/ready")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let response = module()
            .build_router()
            .oneshot(get_req("/health/live"))
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn serve_stops_on_shutdown_signal() {
        let mut m = NetworkModule::new(
            NetworkConfig {
                host: "127.0.0.1".to_string(),
                ..NetworkConfig::default()
            },
            Dataset::default(),
            Arc::new(MemoryBackend::default()),
        );
        m.start().await.unwrap();
        let controller = m.shutdown_controller();

        m.serve(async {}).await.unwrap();
        assert_eq!(controller.health_state(), crate::network::HealthState::Stopped);
    }
}
