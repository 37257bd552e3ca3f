//! Dashboard summary numbers.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use dashkit_core::{order_stats, product_stats, user_stats, OrderStats, ProductStats, UserStats};

use super::AppState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsResponse {
    pub products: ProductStats,
    pub orders: OrderStats,
    pub users: UserStats,
}

/// `GET /api/stats` over the whole dataset.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let dataset = &state.dataset;
    Json(StatsResponse {
        products: product_stats(&dataset.products),
        orders: order_stats(&dataset.orders),
        users: user_stats(&dataset.users),
    })
}
