//! Status and role badge lookups.
//!
//! Each lookup is a total function over arbitrary strings: known values map
//! to a fixed descriptor from a compile-time table, anything else maps to
//! [`FALLBACK_BADGE`]. Icons are a closed enum, so there is no runtime
//! icon-by-name resolution to fail.

use serde::{Serialize, Serializer};

use crate::types::{OrderStatus, ProductStatus, UserRole, UserStatus};

/// Visual style of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
    Outline,
    Success,
    Warning,
}

/// Icon shown next to a badge label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    CheckCircle,
    XCircle,
    AlertTriangle,
    Clock,
    Loader,
    Truck,
    PackageCheck,
    Ban,
    Shield,
    PenLine,
    Eye,
    UserCheck,
    UserX,
    HelpCircle,
}

impl Icon {
    /// Icon name as understood by the front-end icon set.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CheckCircle => "check-circle",
            Self::XCircle => "x-circle",
            Self::AlertTriangle => "alert-triangle",
            Self::Clock => "clock",
            Self::Loader => "loader",
            Self::Truck => "truck",
            Self::PackageCheck => "package-check",
            Self::Ban => "ban",
            Self::Shield => "shield",
            Self::PenLine => "pen-line",
            Self::Eye => "eye",
            Self::UserCheck => "user-check",
            Self::UserX => "user-x",
            Self::HelpCircle => "help-circle",
        }
    }
}

impl Serialize for Icon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Everything needed to render a status or role badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BadgeDescriptor {
    pub variant: BadgeVariant,
    pub label: &'static str,
    pub icon: Icon,
}

const fn badge(variant: BadgeVariant, label: &'static str, icon: Icon) -> BadgeDescriptor {
    BadgeDescriptor {
        variant,
        label,
        icon,
    }
}

/// Returned for any value not present in a lookup table.
pub const FALLBACK_BADGE: BadgeDescriptor = badge(BadgeVariant::Outline, "Unknown", Icon::HelpCircle);

const PRODUCT_STATUS_BADGES: [(ProductStatus, BadgeDescriptor); 3] = [
    (ProductStatus::Active, badge(BadgeVariant::Success, "Active", Icon::CheckCircle)),
    (ProductStatus::Inactive, badge(BadgeVariant::Secondary, "Inactive", Icon::XCircle)),
    (ProductStatus::OutOfStock, badge(BadgeVariant::Destructive, "Out of Stock", Icon::AlertTriangle)),
];

const ORDER_STATUS_BADGES: [(OrderStatus, BadgeDescriptor); 5] = [
    (OrderStatus::Pending, badge(BadgeVariant::Warning, "Pending", Icon::Clock)),
    (OrderStatus::Processing, badge(BadgeVariant::Default, "Processing", Icon::Loader)),
    (OrderStatus::Shipped, badge(BadgeVariant::Secondary, "Shipped", Icon::Truck)),
    (OrderStatus::Delivered, badge(BadgeVariant::Success, "Delivered", Icon::PackageCheck)),
    (OrderStatus::Cancelled, badge(BadgeVariant::Destructive, "Cancelled", Icon::Ban)),
];

const USER_ROLE_BADGES: [(UserRole, BadgeDescriptor); 4] = [
    (UserRole::Admin, badge(BadgeVariant::Default, "Admin", Icon::Shield)),
    (UserRole::Editor, badge(BadgeVariant::Secondary, "Editor", Icon::PenLine)),
    (UserRole::Viewer, badge(BadgeVariant::Outline, "Viewer", Icon::Eye)),
    (UserRole::Moderator, badge(BadgeVariant::Warning, "Moderator", Icon::UserCheck)),
];

const USER_STATUS_BADGES: [(UserStatus, BadgeDescriptor); 4] = [
    (UserStatus::Active, badge(BadgeVariant::Success, "Active", Icon::CheckCircle)),
    (UserStatus::Inactive, badge(BadgeVariant::Secondary, "Inactive", Icon::XCircle)),
    (UserStatus::Pending, badge(BadgeVariant::Warning, "Pending", Icon::Clock)),
    (UserStatus::Suspended, badge(BadgeVariant::Destructive, "Suspended", Icon::UserX)),
];

fn lookup<K: PartialEq>(table: &[(K, BadgeDescriptor)], key: &K) -> BadgeDescriptor {
    table
        .iter()
        .find(|(k, _)| k == key)
        .map_or(FALLBACK_BADGE, |(_, d)| *d)
}

/// Descriptor for a typed product status.
#[must_use]
pub fn product_status_descriptor(status: ProductStatus) -> BadgeDescriptor {
    lookup(&PRODUCT_STATUS_BADGES, &status)
}

/// Descriptor for a typed order status.
#[must_use]
pub fn order_status_descriptor(status: OrderStatus) -> BadgeDescriptor {
    lookup(&ORDER_STATUS_BADGES, &status)
}

/// Descriptor for a typed user role.
#[must_use]
pub fn user_role_descriptor(role: UserRole) -> BadgeDescriptor {
    lookup(&USER_ROLE_BADGES, &role)
}

/// Descriptor for a typed user status.
#[must_use]
pub fn user_status_descriptor(status: UserStatus) -> BadgeDescriptor {
    lookup(&USER_STATUS_BADGES, &status)
}

/// Badge for a raw product status string; unknown values get the fallback.
#[must_use]
pub fn product_status_badge(value: &str) -> BadgeDescriptor {
    value
        .parse::<ProductStatus>()
        .map_or(FALLBACK_BADGE, product_status_descriptor)
}

/// Badge for a raw order status string; unknown values get the fallback.
#[must_use]
pub fn order_status_badge(value: &str) -> BadgeDescriptor {
    value
        .parse::<OrderStatus>()
        .map_or(FALLBACK_BADGE, order_status_descriptor)
}

/// Badge for a raw user role string; unknown values get the fallback.
#[must_use]
pub fn user_role_badge(value: &str) -> BadgeDescriptor {
    value.parse::<UserRole>().map_or(FALLBACK_BADGE, user_role_descriptor)
}

/// Badge for a raw user status string; unknown values get the fallback.
#[must_use]
pub fn user_status_badge(value: &str) -> BadgeDescriptor {
    value
        .parse::<UserStatus>()
        .map_or(FALLBACK_BADGE, user_status_descriptor)
}

/// Which lookup table a badge request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    ProductStatus,
    OrderStatus,
    UserRole,
    UserStatus,
}

impl BadgeKind {
    /// Parses the kebab-case kind name used in URLs, e.g. `"order-status"`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "product-status" => Some(Self::ProductStatus),
            "order-status" => Some(Self::OrderStatus),
            "user-role" => Some(Self::UserRole),
            "user-status" => Some(Self::UserStatus),
            _ => None,
        }
    }

    /// Resolves `value` in this kind's table.
    #[must_use]
    pub fn badge(self, value: &str) -> BadgeDescriptor {
        match self {
            Self::ProductStatus => product_status_badge(value),
            Self::OrderStatus => order_status_badge(value),
            Self::UserRole => user_role_badge(value),
            Self::UserStatus => user_status_badge(value),
        }
    }
}
