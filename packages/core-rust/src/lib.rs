//! Dashkit Core — record filters, derived stats, status badges, display
//! formatting, color-mode state, and syntax highlighting.

pub mod badge;
pub mod color_mode;
pub mod filter;
pub mod format;
pub mod highlight;
pub mod stats;
pub mod types;

pub use badge::{BadgeDescriptor, BadgeKind, BadgeVariant, Icon, FALLBACK_BADGE};
pub use color_mode::{ColorMode, ColorModeError, ColorModeStore, Hydration, MemoryBackend, PreferenceBackend};
pub use filter::{
    filter_data_users, filter_orders, filter_products, filter_records, filter_users, paginate, Facet,
    FilterCriteria, Filterable, Page, Selection, SortDirection,
};
pub use highlight::{highlight, highlight_code, HighlightError, HighlightOptions};
pub use stats::{order_stats, product_stats, user_stats, OrderStats, ProductStats, UserStats};
pub use types::{
    DataUser, Order, OrderStatus, ParseEnumError, Product, ProductStatus, TableUser, UserRole, UserStatus,
};
