use serde::Serialize;
use utoipa::ToSchema;

/// The pagination block of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    /// Matching rows across all pages (same filter predicate, no offset).
    pub total: i64,
    /// `ceil(total / limit)`. Zero matching rows report `pages: 0`, not 1.
    pub pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if total == 0 {
            0
        } else {
            (total + limit - 1) / limit
        };
        Pagination {
            page,
            limit,
            total,
            pages,
        }
    }
}

/// Pagination block for read paths that do not compute a total (the
/// metadata search): page and limit only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageInfo {
    pub page: i64,
    pub limit: i64,
}

impl PageInfo {
    pub fn new(page: i64, limit: i64) -> Self {
        PageInfo { page, limit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_is_ceiling_of_total_over_limit() {
        assert_eq!(Pagination::new(1, 10, 100).pages, 10);
        assert_eq!(Pagination::new(1, 10, 101).pages, 11);
        assert_eq!(Pagination::new(1, 10, 9).pages, 1);
        assert_eq!(Pagination::new(1, 7, 7).pages, 1);
        assert_eq!(Pagination::new(1, 7, 8).pages, 2);
    }

    #[test]
    fn zero_total_reports_zero_pages() {
        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.total, 0);
        assert_eq!(p.pages, 0);
    }
}
