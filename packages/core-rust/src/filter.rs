//! Search, enum-facet filtering, sorting, and pagination over record slices.
//!
//! All functions are pure: they read their arguments and return freshly
//! allocated collections. Filtering is a stable AND of every criterion, so
//! surviving records keep their original relative order.
//!
//! Comparison is case-insensitive everywhere, for both the free-text search
//! and the enum facets.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{DataUser, Order, Product, TableUser};

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// An enumerated attribute a record can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Status,
    Role,
    Category,
    Department,
}

/// A single facet selection coming from a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// The "match all" sentinel.
    #[default]
    All,
    /// Only records whose facet equals this value (case-insensitive).
    Only(String),
}

impl Selection {
    /// Interprets a raw dropdown value.
    ///
    /// Empty input, `"all"`, and any label starting with `"all "` (such as
    /// `"All Status"` or `"All Categories"`) are the sentinel.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_lowercase();
        if lower.is_empty() || lower == "all" || lower.starts_with("all ") {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }

    /// Whether a record with facet value `value` passes this selection.
    ///
    /// A record with no value for the facet only passes `All`.
    #[must_use]
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => value.is_some_and(|v| fold(v) == fold(wanted)),
        }
    }
}

/// Case-folds a facet value and treats spaces and underscores as dashes, so
/// the label `"Out of Stock"` selects the value `"out-of-stock"`.
fn fold(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Free-text search plus zero or more facet selections.
///
/// `FilterCriteria::default()` matches every record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring searched across the record's search fields.
    pub search: String,
    /// Facet selections, all of which must match.
    pub facets: Vec<(Facet, Selection)>,
}

impl FilterCriteria {
    /// Creates criteria with the given search text and no facets.
    #[must_use]
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            facets: Vec::new(),
        }
    }

    /// Adds a facet selection parsed from a raw dropdown value.
    #[must_use]
    pub fn with_facet(mut self, facet: Facet, raw: &str) -> Self {
        self.facets.push((facet, Selection::parse(raw)));
        self
    }

    /// Whether `record` passes every criterion.
    #[must_use]
    pub fn matches<R: Filterable>(&self, record: &R) -> bool {
        matches_search(record, &self.search)
            && self
                .facets
                .iter()
                .all(|(facet, selection)| selection.matches(record.facet(*facet)))
    }
}

// ---------------------------------------------------------------------------
// Filterable records
// ---------------------------------------------------------------------------

/// A record that exposes searchable text fields and facet values.
pub trait Filterable {
    /// Fields the free-text search looks at.
    fn search_fields(&self) -> Vec<&str>;

    /// Value of `facet` for this record, or `None` if the record has no such
    /// attribute.
    fn facet(&self, facet: Facet) -> Option<&str>;
}

impl Filterable for Product {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.id.as_str(), self.category.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.status.as_str()),
            Facet::Category => Some(self.category.as_str()),
            Facet::Role | Facet::Department => None,
        }
    }
}

impl Filterable for Order {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.customer.as_str(), self.email.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.status.as_str()),
            Facet::Role | Facet::Category | Facet::Department => None,
        }
    }
}

impl Filterable for TableUser {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.id.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.status.as_str()),
            Facet::Role => Some(self.role.as_str()),
            Facet::Category | Facet::Department => None,
        }
    }
}

impl Filterable for DataUser {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.department.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.status.as_str()),
            Facet::Department => Some(self.department.as_str()),
            Facet::Role | Facet::Category => None,
        }
    }
}

/// Case-insensitive substring match of `term` against the record's search
/// fields. A blank term matches everything.
#[must_use]
pub fn matches_search<R: Filterable>(record: &R, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Returns the records passing `criteria`, in their original order.
#[must_use]
pub fn filter_records<R: Filterable + Clone>(records: &[R], criteria: &FilterCriteria) -> Vec<R> {
    let out: Vec<R> = records
        .iter()
        .filter(|r| criteria.matches(*r))
        .cloned()
        .collect();
    debug!(
        total = records.len(),
        matched = out.len(),
        facets = criteria.facets.len(),
        "filtered records"
    );
    out
}

// ---------------------------------------------------------------------------
// Entity conveniences (raw dropdown strings in, filtered rows out)
// ---------------------------------------------------------------------------

/// Filters products by search text, status, and category.
#[must_use]
pub fn filter_products(products: &[Product], search: &str, status: &str, category: &str) -> Vec<Product> {
    let criteria = FilterCriteria::search(search)
        .with_facet(Facet::Status, status)
        .with_facet(Facet::Category, category);
    filter_records(products, &criteria)
}

/// Filters orders by search text and status.
#[must_use]
pub fn filter_orders(orders: &[Order], search: &str, status: &str) -> Vec<Order> {
    let criteria = FilterCriteria::search(search).with_facet(Facet::Status, status);
    filter_records(orders, &criteria)
}

/// Filters management-table users by search text, role, and status.
#[must_use]
pub fn filter_users(users: &[TableUser], search: &str, role: &str, status: &str) -> Vec<TableUser> {
    let criteria = FilterCriteria::search(search)
        .with_facet(Facet::Role, role)
        .with_facet(Facet::Status, status);
    filter_records(users, &criteria)
}

/// Filters data-table users by search text, department, and status.
#[must_use]
pub fn filter_data_users(
    users: &[DataUser],
    search: &str,
    department: &str,
    status: &str,
) -> Vec<DataUser> {
    let criteria = FilterCriteria::search(search)
        .with_facet(Facet::Department, department)
        .with_facet(Facet::Status, status);
    filter_records(users, &criteria)
}

/// Distinct facet values in first-seen order, for populating a dropdown.
#[must_use]
pub fn distinct_facet_values<R: Filterable>(records: &[R], facet: Facet) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in records.iter().filter_map(|r| r.facet(facet)) {
        if !seen.iter().any(|s| s.eq_ignore_ascii_case(value)) {
            seen.push(value.to_string());
        }
    }
    seen
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Sort direction for table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Total order over a partially ordered key. Values that are not
/// comparable to themselves (float NaN) sort after every other value and
/// equal to each other.
fn total_order<K: PartialOrd>(a: &K, b: &K) -> Ordering {
    a.partial_cmp(b).unwrap_or_else(|| {
        let a_unordered = a.partial_cmp(a).is_none();
        let b_unordered = b.partial_cmp(b).is_none();
        a_unordered.cmp(&b_unordered)
    })
}

/// Returns `records` stably sorted by `key`.
///
/// Ties keep their original order in both directions. NaN keys sort last
/// ascending and first descending.
#[must_use]
pub fn sort_records<R, K, F>(records: &[R], key: F, direction: SortDirection) -> Vec<R>
where
    R: Clone,
    K: PartialOrd,
    F: Fn(&R) -> K,
{
    let mut out = records.to_vec();
    out.sort_by(|a, b| {
        let ord = total_order(&key(a), &key(b));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    out
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// One page of a record collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<R> {
    pub items: Vec<R>,
    /// 1-based page number actually returned.
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slices `records` into the 1-based `page` of `page_size` items.
///
/// Page 0 is treated as page 1 and pages past the end clamp to the last
/// page. A zero `page_size` yields an empty page.
#[must_use]
pub fn paginate<R: Clone>(records: &[R], page: usize, page_size: usize) -> Page<R> {
    let total_items = records.len();
    if page_size == 0 {
        return Page {
            items: Vec::new(),
            page: 1,
            page_size,
            total_items,
            total_pages: 0,
        };
    }
    let total_pages = total_items.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    Page {
        items: records.get(start..end).map(<[R]>::to_vec).unwrap_or_default(),
        page,
        page_size,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderStatus, ProductStatus, UserRole, UserStatus};
    use proptest::prelude::*;

    fn user(id: &str, name: &str, email: &str, role: UserRole, status: UserStatus) -> TableUser {
        TableUser {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            status,
            last_login: None,
        }
    }

    fn users() -> Vec<TableUser> {
        vec![
            user("USR-1", "Sarah Johnson", "sarah.j@example.com", UserRole::Admin, UserStatus::Active),
            user("USR-2", "Mike Chen", "mike@example.com", UserRole::Editor, UserStatus::Active),
            user("USR-3", "Emily Davis", "emily@sarahco.io", UserRole::Viewer, UserStatus::Inactive),
            user("USR-4", "James Wilson", "james@example.com", UserRole::Admin, UserStatus::Pending),
        ]
    }

    fn product(id: &str, name: &str, category: &str, price: f64, stock: u32, status: ProductStatus) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            price,
            stock,
            status,
            created_at: "2024-01-15".to_string(),
        }
    }

    fn ids<R, F: Fn(&R) -> &str>(rows: &[R], f: F) -> Vec<&str> {
        rows.iter().map(f).collect()
    }

    // ---- Selection ----

    #[test]
    fn selection_parse_sentinels() {
        assert_eq!(Selection::parse(""), Selection::All);
        assert_eq!(Selection::parse("all"), Selection::All);
        assert_eq!(Selection::parse("All"), Selection::All);
        assert_eq!(Selection::parse("All Status"), Selection::All);
        assert_eq!(Selection::parse("all categories"), Selection::All);
        assert_eq!(Selection::parse("  "), Selection::All);
    }

    #[test]
    fn selection_parse_value_is_trimmed() {
        assert_eq!(Selection::parse(" admin "), Selection::Only("admin".to_string()));
        // "allocated" is a value, not the sentinel
        assert_eq!(Selection::parse("allocated"), Selection::Only("allocated".to_string()));
    }

    #[test]
    fn selection_matches_case_insensitively() {
        let sel = Selection::parse("Electronics");
        assert!(sel.matches(Some("electronics")));
        assert!(sel.matches(Some("ELECTRONICS")));
        assert!(!sel.matches(Some("Books")));
        assert!(!sel.matches(None));
        assert!(Selection::All.matches(None));

        let label = Selection::parse("Out of Stock");
        assert!(label.matches(Some("out-of-stock")));
    }

    // ---- Users ----

    #[test]
    fn filter_users_defaults_return_everything_in_order() {
        let all = users();
        let out = filter_users(&all, "", "all", "all");
        assert_eq!(out, all);
    }

    #[test]
    fn filter_users_search_matches_name_or_email() {
        let out = filter_users(&users(), "sarah", "all", "all");
        assert_eq!(ids(&out, |u| u.id.as_str()), vec!["USR-1", "USR-3"]);
    }

    #[test]
    fn filter_users_search_is_case_insensitive() {
        let out = filter_users(&users(), "SARAH", "all", "all");
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn filter_users_by_role_and_status() {
        let out = filter_users(&users(), "", "Admin", "all");
        assert_eq!(ids(&out, |u| u.id.as_str()), vec!["USR-1", "USR-4"]);

        let out = filter_users(&users(), "", "admin", "pending");
        assert_eq!(ids(&out, |u| u.id.as_str()), vec!["USR-4"]);
    }

    #[test]
    fn filter_users_search_by_id() {
        let out = filter_users(&users(), "usr-2", "all", "all");
        assert_eq!(ids(&out, |u| u.id.as_str()), vec!["USR-2"]);
    }

    #[test]
    fn filter_empty_input_yields_empty_output() {
        let out = filter_users(&[], "sarah", "admin", "active");
        assert!(out.is_empty());
    }

    // ---- Products / orders / data users ----

    #[test]
    fn filter_products_by_status_and_category() {
        let products = vec![
            product("P1", "Mouse", "Electronics", 10.0, 5, ProductStatus::Active),
            product("P2", "Desk", "Furniture", 200.0, 0, ProductStatus::OutOfStock),
            product("P3", "Keyboard", "Electronics", 50.0, 0, ProductStatus::OutOfStock),
        ];
        let out = filter_products(&products, "", "Out-of-Stock", "All Categories");
        assert_eq!(ids(&out, |p| p.id.as_str()), vec!["P2", "P3"]);

        let out = filter_products(&products, "", "out-of-stock", "electronics");
        assert_eq!(ids(&out, |p| p.id.as_str()), vec!["P3"]);

        let out = filter_products(&products, "key", "All Status", "all");
        assert_eq!(ids(&out, |p| p.id.as_str()), vec!["P3"]);
    }

    #[test]
    fn filter_orders_by_status() {
        let order = |id: &str, status| Order {
            id: id.to_string(),
            customer: "Ann Lee".to_string(),
            email: "ann@example.com".to_string(),
            total: 10.0,
            status,
            items: 1,
            date: "2024-03-01".to_string(),
        };
        let orders = vec![
            order("ORD-1", OrderStatus::Pending),
            order("ORD-2", OrderStatus::Shipped),
            order("ORD-3", OrderStatus::Pending),
        ];
        let out = filter_orders(&orders, "", "PENDING");
        assert_eq!(ids(&out, |o| o.id.as_str()), vec!["ORD-1", "ORD-3"]);
        let out = filter_orders(&orders, "ord-2", "all");
        assert_eq!(ids(&out, |o| o.id.as_str()), vec!["ORD-2"]);
    }

    #[test]
    fn filter_data_users_by_department() {
        let du = |id: &str, dept: &str| DataUser {
            id: id.to_string(),
            name: format!("Person {id}"),
            email: format!("{id}@example.com"),
            department: dept.to_string(),
            status: UserStatus::Active,
            salary: 1000.0,
            join_date: "2023-05-01".to_string(),
        };
        let rows = vec![du("1", "Engineering"), du("2", "Sales"), du("3", "engineering")];
        let out = filter_data_users(&rows, "", "Engineering", "all");
        assert_eq!(ids(&out, |u| u.id.as_str()), vec!["1", "3"]);
    }

    #[test]
    fn facet_absent_on_record_never_matches_specific_value() {
        let products = vec![product("P1", "Mouse", "Electronics", 10.0, 5, ProductStatus::Active)];
        let criteria = FilterCriteria::default().with_facet(Facet::Role, "admin");
        assert!(filter_records(&products, &criteria).is_empty());
        let criteria = FilterCriteria::default().with_facet(Facet::Role, "all");
        assert_eq!(filter_records(&products, &criteria).len(), 1);
    }

    #[test]
    fn distinct_facet_values_first_seen_order() {
        let products = vec![
            product("P1", "A", "Electronics", 1.0, 1, ProductStatus::Active),
            product("P2", "B", "Books", 1.0, 1, ProductStatus::Active),
            product("P3", "C", "electronics", 1.0, 1, ProductStatus::Active),
        ];
        assert_eq!(
            distinct_facet_values(&products, Facet::Category),
            vec!["Electronics".to_string(), "Books".to_string()]
        );
        assert!(distinct_facet_values(&products, Facet::Role).is_empty());
    }

    // ---- Sorting ----

    #[test]
    fn sort_records_is_stable() {
        let products = vec![
            product("P1", "A", "X", 10.0, 1, ProductStatus::Active),
            product("P2", "B", "X", 5.0, 1, ProductStatus::Active),
            product("P3", "C", "X", 10.0, 1, ProductStatus::Active),
        ];
        let asc = sort_records(&products, |p| p.price, SortDirection::Asc);
        assert_eq!(ids(&asc, |p| p.id.as_str()), vec!["P2", "P1", "P3"]);
        let desc = sort_records(&products, |p| p.price, SortDirection::Desc);
        assert_eq!(ids(&desc, |p| p.id.as_str()), vec!["P1", "P3", "P2"]);
    }

    #[test]
    fn sort_records_places_nan_keys_last() {
        let prices = [3.0, f64::NAN, 1.0, f64::NAN, 2.0];
        let products: Vec<Product> = (0..100)
            .map(|i| {
                let id = format!("P{i}");
                product(&id, "A", "X", prices[i % prices.len()], 1, ProductStatus::Active)
            })
            .collect();
        let asc = sort_records(&products, |p| p.price, SortDirection::Asc);
        assert_eq!(asc.len(), 100);
        let finite: Vec<f64> = asc.iter().map(|p| p.price).take_while(|p| !p.is_nan()).collect();
        assert_eq!(finite.len(), 60);
        assert!(finite.windows(2).all(|w| w[0] <= w[1]));
        assert!(asc[60..].iter().all(|p| p.price.is_nan()));
        // NaN ties keep input order.
        assert_eq!(asc[60].id, "P1");
        assert_eq!(asc[61].id, "P3");

        let desc = sort_records(&products, |p| p.price, SortDirection::Desc);
        assert!(desc[..40].iter().all(|p| p.price.is_nan()));
        assert!((desc[40].price - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sort_records_by_name_case_folded() {
        let products = vec![
            product("P1", "banana", "X", 1.0, 1, ProductStatus::Active),
            product("P2", "Apple", "X", 1.0, 1, ProductStatus::Active),
        ];
        let out = sort_records(&products, |p| p.name.to_lowercase(), SortDirection::Asc);
        assert_eq!(ids(&out, |p| p.id.as_str()), vec!["P2", "P1"]);
    }

    // ---- Pagination ----

    #[test]
    fn paginate_middle_and_last_pages() {
        let rows: Vec<u32> = (1..=7).collect();
        let p = paginate(&rows, 2, 3);
        assert_eq!(p.items, vec![4, 5, 6]);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.total_items, 7);

        let last = paginate(&rows, 3, 3);
        assert_eq!(last.items, vec![7]);
    }

    #[test]
    fn paginate_clamps_out_of_range_pages() {
        let rows: Vec<u32> = (1..=7).collect();
        let p = paginate(&rows, 99, 3);
        assert_eq!(p.page, 3);
        assert_eq!(p.items, vec![7]);

        let p = paginate(&rows, 0, 3);
        assert_eq!(p.page, 1);
        assert_eq!(p.items, vec![1, 2, 3]);
    }

    #[test]
    fn paginate_empty_and_zero_size() {
        let empty: Vec<u32> = Vec::new();
        let p = paginate(&empty, 1, 10);
        assert!(p.items.is_empty());
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.page, 1);

        let rows = vec![1, 2];
        let p = paginate(&rows, 1, 0);
        assert!(p.items.is_empty());
        assert_eq!(p.total_items, 2);
    }

    // ---- Properties ----

    fn arb_user() -> impl Strategy<Value = TableUser> {
        (
            "[a-zA-Z ]{0,12}",
            "[a-z]{1,8}@[a-z]{1,6}\\.com",
            prop::sample::select(UserRole::ALL.to_vec()),
            prop::sample::select(UserStatus::ALL.to_vec()),
            0u32..10_000,
        )
            .prop_map(|(name, email, role, status, n)| TableUser {
                id: format!("USR-{n}"),
                name,
                email,
                role,
                status,
                last_login: None,
            })
    }

    proptest! {
        #[test]
        fn filter_is_order_preserving_subset(
            rows in prop::collection::vec(arb_user(), 0..30),
            search in "[a-z]{0,3}",
            role in prop::sample::select(vec!["all", "admin", "Editor", "viewer", "moderator"]),
            status in prop::sample::select(vec!["All Status", "active", "Inactive", "pending"]),
        ) {
            let out = filter_users(&rows, &search, role, status);
            // Every output row appears in the input, in the same relative order.
            let mut cursor = 0;
            for row in &out {
                let pos = rows[cursor..].iter().position(|r| r == row);
                prop_assert!(pos.is_some());
                cursor += pos.unwrap_or(0) + 1;
            }
        }

        #[test]
        fn filter_includes_exactly_the_matching_rows(
            rows in prop::collection::vec(arb_user(), 0..30),
            search in "[a-z]{0,2}",
            role in prop::sample::select(UserRole::ALL.to_vec()),
        ) {
            let out = filter_users(&rows, &search, role.as_str(), "all");
            let expected: Vec<TableUser> = rows
                .iter()
                .filter(|u| u.role == role && matches_search(*u, &search))
                .cloned()
                .collect();
            prop_assert_eq!(out, expected);
        }

        #[test]
        fn empty_criteria_is_identity(rows in prop::collection::vec(arb_user(), 0..30)) {
            prop_assert_eq!(filter_records(&rows, &FilterCriteria::default()), rows);
        }
    }
}
