//! Aggregate statistics for the dashboard stat cards.
//!
//! Every function is a single pass over its input.

use serde::{Deserialize, Serialize};

use crate::types::{Order, OrderStatus, Product, ProductStatus, TableUser, UserRole, UserStatus};

/// Products with fewer units than this (but more than zero) count as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 20;

/// Number of records satisfying `pred`.
#[must_use]
pub fn count_where<R>(records: &[R], pred: impl Fn(&R) -> bool) -> usize {
    records.iter().filter(|r| pred(r)).count()
}

/// Sum of `f` over all records.
#[must_use]
pub fn sum_by<R>(records: &[R], f: impl Fn(&R) -> f64) -> f64 {
    records.iter().map(f).sum()
}

/// Whether a product is running low but not yet out.
#[must_use]
pub fn is_low_stock(product: &Product) -> bool {
    product.stock > 0 && product.stock < LOW_STOCK_THRESHOLD
}

/// Inventory value of a single product row.
#[must_use]
pub fn inventory_value(product: &Product) -> f64 {
    product.price * f64::from(product.stock)
}

/// Summary numbers for the products page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total: usize,
    pub active: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    /// Sum of price times stock across every product.
    pub total_value: f64,
}

/// Computes [`ProductStats`] in one pass.
#[must_use]
pub fn product_stats(products: &[Product]) -> ProductStats {
    products.iter().fold(ProductStats::default(), |mut acc, p| {
        acc.total += 1;
        if p.status == ProductStatus::Active {
            acc.active += 1;
        }
        if is_low_stock(p) {
            acc.low_stock += 1;
        }
        if p.stock == 0 {
            acc.out_of_stock += 1;
        }
        acc.total_value += inventory_value(p);
        acc
    })
}

/// Summary numbers for the orders page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total: usize,
    /// Sum of totals over orders that were not cancelled.
    pub revenue: f64,
    pub pending: usize,
    pub delivered: usize,
    /// Revenue divided by the number of non-cancelled orders, 0 when none.
    pub average_order_value: f64,
}

/// Computes [`OrderStats`] in one pass.
#[must_use]
pub fn order_stats(orders: &[Order]) -> OrderStats {
    let mut stats = OrderStats::default();
    let mut billable = 0_u32;
    for order in orders {
        stats.total += 1;
        match order.status {
            OrderStatus::Cancelled => continue,
            OrderStatus::Pending => stats.pending += 1,
            OrderStatus::Delivered => stats.delivered += 1,
            OrderStatus::Processing | OrderStatus::Shipped => {}
        }
        billable += 1;
        stats.revenue += order.total;
    }
    if billable > 0 {
        stats.average_order_value = stats.revenue / f64::from(billable);
    }
    stats
}

/// Summary numbers for the users page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub admins: usize,
    pub pending: usize,
}

/// Computes [`UserStats`] in one pass.
#[must_use]
pub fn user_stats(users: &[TableUser]) -> UserStats {
    users.iter().fold(UserStats::default(), |mut acc, u| {
        acc.total += 1;
        if u.status == UserStatus::Active {
            acc.active += 1;
        }
        if u.status == UserStatus::Pending {
            acc.pending += 1;
        }
        if u.role == UserRole::Admin {
            acc.admins += 1;
        }
        acc
    })
}
