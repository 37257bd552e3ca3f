//! Health, liveness, and readiness endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use super::AppState;
use crate::network::HealthState;

/// Detailed health JSON.
///
/// Always 200; the `state` field says whether the server is actually ready.
pub async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let dataset = &state.dataset;
    Json(json!({
        "state": state.shutdown.health_state().as_str(),
        "in_flight": state.shutdown.in_flight_count(),
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "color_mode_hydrated": state.color_mode.lock().is_hydrated(),
        "records": {
            "products": dataset.products.len(),
            "orders": dataset.orders.len(),
            "users": dataset.users.len(),
            "dataUsers": dataset.data_users.len(),
        },
    }))
}

/// Liveness probe: 200 whenever the process can answer.
pub async fn liveness_handler() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe: 200 only in `Ready`, 503 while starting or draining.
pub async fn readiness_handler(State(state): State<AppState>) -> StatusCode {
    if state.shutdown.health_state() == HealthState::Ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::handlers::test_support::sample_state;

    #[tokio::test]
    async fn health_reports_state_and_record_counts() {
        let state = sample_state();
        state.shutdown.set_ready();

        let json = health_handler(State(state)).await.0;
        assert_eq!(json["state"], "ready");
        assert_eq!(json["in_flight"], 0);
        assert!(json["uptime_secs"].is_number());
        assert_eq!(json["color_mode_hydrated"], false);
        assert_eq!(json["records"]["products"], 3);
        assert_eq!(json["records"]["dataUsers"], 2);
    }

    #[tokio::test]
    async fn health_reports_draining_and_in_flight() {
        let state = sample_state();
        let _guard = state.shutdown.in_flight_guard();
        state.shutdown.trigger_shutdown();

        let json = health_handler(State(state)).await.0;
        assert_eq!(json["state"], "draining");
        assert_eq!(json["in_flight"], 1);
    }

    #[tokio::test]
    async fn liveness_always_ok() {
        assert_eq!(liveness_handler().await, StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_follows_health_state() {
        let state = sample_state();
        assert_eq!(
            readiness_handler(State(state.clone())).await,
            StatusCode::SERVICE_UNAVAILABLE
        );

        state.shutdown.set_ready();
        assert_eq!(readiness_handler(State(state.clone())).await, StatusCode::OK);

        state.shutdown.trigger_shutdown();
        assert_eq!(
            readiness_handler(State(state)).await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
