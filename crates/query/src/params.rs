use crate::error::QueryError;
use crate::{SortField, SortOrder};
use serde::Deserialize;

/// Upper bound applied to `limit` so one request cannot ask for an
/// unbounded page.
pub const MAX_LIMIT: i64 = 100;

/// The raw pagination/sort parameters of a list request, exactly as they
/// arrive on the query string. All values are text at this point; parsing
/// and validation happen in [`ListParams::parse`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// A validated, bounded list query: which page, how many rows, ordered by
/// which allow-listed field in which direction. The database crate renders
/// this into the ORDER BY / LIMIT / OFFSET tail of the page query; the
/// matching count query ignores it entirely.
#[derive(Debug, Clone, Copy)]
pub struct ListQuery<S> {
    pub page: i64,
    pub limit: i64,
    pub sort: S,
    pub order: SortOrder,
}

impl<S> ListQuery<S> {
    /// Rows to skip: `(page - 1) * limit`. Representability is checked
    /// during parsing; the saturating form keeps a hand-built value from
    /// wrapping.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// A validated page/limit pair for paths that paginate but do not sort,
/// such as the metadata search.
#[derive(Debug, Clone, Copy)]
pub struct PageQuery {
    pub page: i64,
    pub limit: i64,
}

impl PageQuery {
    /// Rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl ListParams {
    /// Parses and validates `page` and `limit` only, ignoring any sort
    /// parameters the request may carry.
    ///
    /// Defaults: page `"1"`, limit `"10"`. A `page` or `limit` below 1 or
    /// malformed is rejected, as is a page so deep that its row offset
    /// cannot be represented.
    pub fn parse_page(&self) -> Result<PageQuery, QueryError> {
        let raw_page = self.page.as_deref().unwrap_or("1");
        let page: i64 = raw_page
            .trim()
            .parse()
            .map_err(|_| QueryError::InvalidPage(raw_page.to_string()))?;
        if page < 1 {
            return Err(QueryError::InvalidPage(raw_page.to_string()));
        }

        let raw_limit = self.limit.as_deref().unwrap_or("10");
        let limit: i64 = raw_limit
            .trim()
            .parse()
            .map_err(|_| QueryError::InvalidLimit(raw_limit.to_string()))?;
        if limit < 1 {
            return Err(QueryError::InvalidLimit(raw_limit.to_string()));
        }
        let limit = limit.min(MAX_LIMIT);

        // No rows can ever sit behind a page whose offset overflows i64;
        // reject it rather than let the arithmetic wrap.
        if page
            .checked_sub(1)
            .and_then(|p| p.checked_mul(limit))
            .is_none()
        {
            return Err(QueryError::InvalidPage(raw_page.to_string()));
        }

        Ok(PageQuery { page, limit })
    }

    /// Parses and validates the raw parameters against the sort allow-list
    /// of entity `S`.
    ///
    /// Defaults: page `"1"`, limit `"10"`, sort field and direction from
    /// the entity (`S::DEFAULT`, `S::DEFAULT_ORDER`). A `page` or `limit`
    /// below 1, a malformed number, an unknown `sortBy`, or a `sortOrder`
    /// outside `{asc, desc}` are all rejected.
    pub fn parse<S: SortField>(&self) -> Result<ListQuery<S>, QueryError> {
        let PageQuery { page, limit } = self.parse_page()?;

        let sort = match self.sort_by.as_deref() {
            Some(name) => {
                S::from_name(name).ok_or_else(|| QueryError::UnknownSortField(name.to_string()))?
            }
            None => S::DEFAULT,
        };

        let order = match self.sort_order.as_deref() {
            Some(name) => SortOrder::from_name(name)?,
            None => S::DEFAULT_ORDER,
        };

        Ok(ListQuery {
            page,
            limit,
            sort,
            order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestSort {
        Id,
        Name,
    }

    impl SortField for TestSort {
        const DEFAULT: Self = TestSort::Id;
        const DEFAULT_ORDER: SortOrder = SortOrder::Asc;

        fn from_name(name: &str) -> Option<Self> {
            match name {
                "id" => Some(TestSort::Id),
                "name" => Some(TestSort::Name),
                _ => None,
            }
        }

        fn column(&self) -> &'static str {
            match self {
                TestSort::Id => "id",
                TestSort::Name => "name",
            }
        }
    }

    fn params(
        page: Option<&str>,
        limit: Option<&str>,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
    ) -> ListParams {
        ListParams {
            page: page.map(String::from),
            limit: limit.map(String::from),
            sort_by: sort_by.map(String::from),
            sort_order: sort_order.map(String::from),
        }
    }

    #[test]
    fn defaults_apply_when_everything_is_absent() {
        let q: ListQuery<TestSort> = ListParams::default().parse().unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 10);
        assert_eq!(q.sort, TestSort::Id);
        assert_eq!(q.order, SortOrder::Asc);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        let q: ListQuery<TestSort> = params(Some("3"), Some("25"), None, None).parse().unwrap();
        assert_eq!(q.offset(), 50);
        let q: ListQuery<TestSort> = params(Some("7"), Some("10"), None, None).parse().unwrap();
        assert_eq!(q.offset(), 60);
    }

    #[test]
    fn page_zero_and_negatives_are_rejected_not_clamped() {
        for bad in ["0", "-1", "-42"] {
            let err = params(Some(bad), None, None, None)
                .parse::<TestSort>()
                .unwrap_err();
            assert!(matches!(err, QueryError::InvalidPage(_)), "page={bad}");
        }
    }

    #[test]
    fn malformed_numbers_are_validation_errors() {
        assert!(matches!(
            params(Some("abc"), None, None, None).parse::<TestSort>(),
            Err(QueryError::InvalidPage(_))
        ));
        assert!(matches!(
            params(None, Some("ten"), None, None).parse::<TestSort>(),
            Err(QueryError::InvalidLimit(_))
        ));
        assert!(matches!(
            params(None, Some("0"), None, None).parse::<TestSort>(),
            Err(QueryError::InvalidLimit(_))
        ));
    }

    #[test]
    fn a_page_whose_offset_cannot_be_represented_is_rejected() {
        let err = params(Some("9223372036854775807"), Some("50"), None, None)
            .parse::<TestSort>()
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidPage(_)));

        // With limit 1 the offset stays representable, so the request is
        // merely a very deep (empty) page, not an error.
        let q: ListQuery<TestSort> = params(Some("9223372036854775807"), Some("1"), None, None)
            .parse()
            .unwrap();
        assert_eq!(q.offset(), i64::MAX - 1);
    }

    #[test]
    fn page_only_parse_ignores_sort_parameters() {
        let q = params(Some("2"), Some("10"), Some("bogus"), Some("sideways"))
            .parse_page()
            .unwrap();
        assert_eq!(q.page, 2);
        assert_eq!(q.limit, 10);
        assert_eq!(q.offset(), 10);
    }

    #[test]
    fn limit_is_clamped_to_max() {
        let q: ListQuery<TestSort> = params(None, Some("5000"), None, None).parse().unwrap();
        assert_eq!(q.limit, MAX_LIMIT);
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let err = params(None, None, Some("password"), None)
            .parse::<TestSort>()
            .unwrap_err();
        assert_eq!(err, QueryError::UnknownSortField("password".to_string()));
    }

    #[test]
    fn explicit_sort_overrides_defaults() {
        let q: ListQuery<TestSort> = params(None, None, Some("name"), Some("desc"))
            .parse()
            .unwrap();
        assert_eq!(q.sort, TestSort::Name);
        assert_eq!(q.order, SortOrder::Desc);
        assert_eq!(q.sort.column(), "name");
    }
}
