//! Filtered, paginated record listings.
//!
//! Facet parameters take the raw dropdown value; a missing parameter,
//! `all`, or an `All …` label selects everything.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use dashkit_core::{
    filter_data_users, filter_orders, filter_products, filter_users, paginate, DataUser, Order, Page,
    Product, TableUser,
};

use super::AppState;
use crate::error::ApiError;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// Query string accepted by every list endpoint. Each endpoint reads only
/// the facets its records have.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    /// 1-based page number.
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ListQuery {
    fn search(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }

    fn page_params(&self) -> Result<(usize, usize), ApiError> {
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(ApiError::BadRequest(format!(
                "pageSize must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok((self.page.unwrap_or(1), page_size))
    }
}

fn facet(value: Option<&str>) -> &str {
    value.unwrap_or("all")
}

fn page_of<R: Clone>(kind: &str, rows: &[R], query: &ListQuery) -> Result<Json<Page<R>>, ApiError> {
    let (page, page_size) = query.page_params()?;
    let result = paginate(rows, page, page_size);
    debug!(
        kind,
        matched = result.total_items,
        page = result.page,
        "listed records"
    );
    Ok(Json(result))
}

/// `GET /api/products?search=&status=&category=&page=&pageSize=`
///
/// # Errors
///
/// Returns [`ApiError::BadRequest`] for an out-of-range `pageSize`.
pub async fn products_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Product>>, ApiError> {
    let rows = filter_products(
        &state.dataset.products,
        query.search(),
        facet(query.status.as_deref()),
        facet(query.category.as_deref()),
    );
    page_of("products", &rows, &query)
}

/// `GET /api/orders?search=&status=&page=&pageSize=`
///
/// # Errors
///
/// Returns [`ApiError::BadRequest`] for an out-of-range `pageSize`.
pub async fn orders_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Order>>, ApiError> {
    let rows = filter_orders(&state.dataset.orders, query.search(), facet(query.status.as_deref()));
    page_of("orders", &rows, &query)
}

/// `GET /api/users?search=&role=&status=&page=&pageSize=`
///
/// # Errors
///
/// Returns [`ApiError::BadRequest`] for an out-of-range `pageSize`.
pub async fn users_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<TableUser>>, ApiError> {
    let rows = filter_users(
        &state.dataset.users,
        query.search(),
        facet(query.role.as_deref()),
        facet(query.status.as_deref()),
    );
    page_of("users", &rows, &query)
}

/// `GET /api/data-users?search=&department=&status=&page=&pageSize=`
///
/// # Errors
///
/// Returns [`ApiError::BadRequest`] for an out-of-range `pageSize`.
pub async fn data_users_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<DataUser>>, ApiError> {
    let rows = filter_data_users(
        &state.dataset.data_users,
        query.search(),
        facet(query.department.as_deref()),
        facet(query.status.as_deref()),
    );
    page_of("data-users", &rows, &query)
}
