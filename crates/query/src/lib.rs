//! # Symposia Query Crate
//!
//! The query-shaping component shared by every list endpoint. It turns the
//! raw textual `page` / `limit` / `sortBy` / `sortOrder` parameters of a
//! request into a validated, bounded query description, and computes the
//! pagination metadata reported back to clients.
//!
//! ## Architectural Principles
//!
//! - **Pure:** nothing here touches the database or the web framework. The
//!   output is a description (`ListQuery`) that the database crate renders
//!   into SQL.
//! - **Allow-listed sorting:** a raw field name is never forwarded into a
//!   query. Each entity declares a [`SortField`] enum mapping external names
//!   to internal column references; anything outside the map is rejected.
//! - **Reject, don't clamp:** a non-positive or malformed `page`/`limit` is
//!   a validation error surfaced as a 400, not silently corrected. The one
//!   exception is the upper bound on `limit`, which is clamped to
//!   [`MAX_LIMIT`] to bound the work a single request can ask for.

pub mod error;
pub mod pagination;
pub mod params;

// Re-export the key components to create a clean, public-facing API.
pub use error::QueryError;
pub use pagination::{PageInfo, Pagination};
pub use params::{ListParams, ListQuery, PageQuery, MAX_LIMIT};

/// Sort direction accepted by every list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parses the external `sortOrder` value. Anything outside
    /// `{asc, desc}` (case-insensitive) is a validation error.
    pub fn from_name(name: &str) -> Result<Self, QueryError> {
        if name.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if name.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(QueryError::InvalidSortOrder(name.to_string()))
        }
    }

    /// The SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// The per-entity allow-list of sortable fields.
///
/// Implementations are plain enums living next to the entity's repository:
/// `from_name` recognizes the external camelCase names and nothing else,
/// `column` yields the internal column reference pushed into the ORDER BY
/// clause. Because the clause is assembled from `column()` output only, an
/// arbitrary request value can never reach the SQL text.
pub trait SortField: Copy + Sized {
    /// The field used when the request does not name one.
    const DEFAULT: Self;
    /// The direction used when the request does not name one.
    const DEFAULT_ORDER: SortOrder;

    /// Maps an external field name to a member of the allow-list.
    fn from_name(name: &str) -> Option<Self>;

    /// The internal column reference for this field.
    fn column(&self) -> &'static str;
}

/// Builds the `%needle%` pattern for a case-insensitive contains-filter,
/// escaping the LIKE metacharacters so a filter value of `100%` matches the
/// literal text rather than acting as a wildcard.
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_accepts_both_cases() {
        assert_eq!(SortOrder::from_name("asc").unwrap(), SortOrder::Asc);
        assert_eq!(SortOrder::from_name("DESC").unwrap(), SortOrder::Desc);
    }

    #[test]
    fn sort_order_rejects_anything_else() {
        assert!(matches!(
            SortOrder::from_name("ascending"),
            Err(QueryError::InvalidSortOrder(_))
        ));
    }

    #[test]
    fn like_pattern_wraps_and_escapes() {
        assert_eq!(like_pattern("berlin"), "%berlin%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c\\d"), "%c\\\\d%");
    }
}
