//! Record types displayed by the dashboard tables and cards.
//!
//! Every record is a flat snapshot: an identifier, a handful of scalar
//! fields, and one or more closed enums. Records serialize with camelCase
//! field names and kebab-case enum values so a JSON dataset written for the
//! front end deserializes unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known enum value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct ParseEnumError {
    /// Which enum was being parsed (e.g. `"product status"`).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Availability of a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductStatus {
    Active,
    Inactive,
    OutOfStock,
}

impl ProductStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::OutOfStock];

    /// Wire value, identical to the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::OutOfStock => "out-of-stock",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// Permission level of a dashboard user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    Admin,
    Editor,
    Viewer,
    Moderator,
}

impl UserRole {
    pub const ALL: [Self; 4] = [Self::Admin, Self::Editor, Self::Viewer, Self::Moderator];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
            Self::Moderator => "moderator",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Editor => "Editor",
            Self::Viewer => "Viewer",
            Self::Moderator => "Moderator",
        }
    }
}

/// Account state of a dashboard user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
    Suspended,
}

impl UserStatus {
    pub const ALL: [Self; 4] = [Self::Active, Self::Inactive, Self::Pending, Self::Suspended];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
            Self::Suspended => "suspended",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Pending => "Pending",
            Self::Suspended => "Suspended",
        }
    }
}

/// Parses `value` against the wire names of `candidates`, ignoring ASCII case
/// and surrounding whitespace. Spaces and underscores are accepted in place
/// of dashes so `"Out of Stock"` and `"out_of_stock"` both resolve.
fn parse_by_name<T: Copy>(
    kind: &'static str,
    value: &str,
    candidates: &[T],
    name: fn(T) -> &'static str,
) -> Result<T, ParseEnumError> {
    let normalized: String = value
        .trim()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c.to_ascii_lowercase() })
        .collect();
    candidates
        .iter()
        .copied()
        .find(|c| name(*c) == normalized)
        .ok_or_else(|| ParseEnumError {
            kind,
            value: value.to_string(),
        })
}

impl FromStr for ProductStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name("product status", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for OrderStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name("order status", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for UserRole {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name("user role", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for UserStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name("user status", s, &Self::ALL, Self::as_str)
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A catalog product row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Unit price in the store currency.
    pub price: f64,
    /// Units on hand.
    pub stock: u32,
    pub status: ProductStatus,
    /// ISO `YYYY-MM-DD` creation date.
    pub created_at: String,
}

/// A customer order row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer: String,
    pub email: String,
    /// Order total in the store currency.
    pub total: f64,
    pub status: OrderStatus,
    /// Number of line items.
    #[serde(default)]
    pub items: u32,
    /// ISO `YYYY-MM-DD` order date.
    pub date: String,
}

/// A row of the user-management table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    /// ISO `YYYY-MM-DD` date of the last login, absent if never logged in.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_login: Option<String>,
}

/// A row of the employee data table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub status: UserStatus,
    /// Annual salary in the store currency.
    pub salary: f64,
    /// ISO `YYYY-MM-DD` hire date.
    pub join_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_status_serializes_kebab_case() {
        let json = serde_json::to_string(&ProductStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"out-of-stock\"");
        let back: ProductStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ProductStatus::OutOfStock);
    }

    #[test]
    fn as_str_matches_serde_for_every_variant() {
        for v in ProductStatus::ALL {
            assert_eq!(serde_json::to_string(&v).unwrap(), format!("\"{}\"", v.as_str()));
        }
        for v in OrderStatus::ALL {
            assert_eq!(serde_json::to_string(&v).unwrap(), format!("\"{}\"", v.as_str()));
        }
        for v in UserRole::ALL {
            assert_eq!(serde_json::to_string(&v).unwrap(), format!("\"{}\"", v.as_str()));
        }
        for v in UserStatus::ALL {
            assert_eq!(serde_json::to_string(&v).unwrap(), format!("\"{}\"", v.as_str()));
        }
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("ACTIVE".parse::<ProductStatus>(), Ok(ProductStatus::Active));
        assert_eq!("Out of Stock".parse::<ProductStatus>(), Ok(ProductStatus::OutOfStock));
        assert_eq!(" shipped ".parse::<OrderStatus>(), Ok(OrderStatus::Shipped));
        assert_eq!("Admin".parse::<UserRole>(), Ok(UserRole::Admin));
        assert_eq!("suspended".parse::<UserStatus>(), Ok(UserStatus::Suspended));
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "archived".parse::<ProductStatus>().unwrap_err();
        assert_eq!(err.kind, "product status");
        assert_eq!(err.value, "archived");
        assert_eq!(err.to_string(), "unknown product status value: \"archived\"");
    }

    #[test]
    fn product_deserializes_camel_case() {
        let json = r#"{
            "id": "PRD-001",
            "name": "Wireless Mouse",
            "category": "Electronics",
            "price": 29.99,
            "stock": 15,
            "status": "active",
            "createdAt": "2024-01-15"
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.created_at, "2024-01-15");
        assert_eq!(p.stock, 15);
        assert_eq!(p.status, ProductStatus::Active);
    }

    #[test]
    fn table_user_omits_missing_last_login() {
        let user = TableUser {
            id: "USR-1".to_string(),
            name: "Sarah Johnson".to_string(),
            email: "sarah@example.com".to_string(),
            role: UserRole::Admin,
            status: UserStatus::Active,
            last_login: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("lastLogin").is_none());
        assert_eq!(json["role"], "admin");
    }

    #[test]
    fn order_items_defaults_to_zero() {
        let json = r#"{
            "id": "ORD-7",
            "customer": "Mike Chen",
            "email": "mike@example.com",
            "total": 120.5,
            "status": "delivered",
            "date": "2024-02-01"
        }"#;
        let o: Order = serde_json::from_str(json).unwrap();
        assert_eq!(o.items, 0);
    }
}
