//! Pagination and text-search helpers shared by every list endpoint.
//!
//! List endpoints take `page` (1-based) and `limit`, run one `COUNT(*)`
//! and one page query with the same filter predicate, and report the
//! result as a [`Pagination`] block.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default page size when the caller omits `limit`.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Hard upper bound on `limit` for any list endpoint.
pub const MAX_PAGE_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Clamping
// ---------------------------------------------------------------------------

/// Clamp a user-provided limit to `[1, max]`, using `default` if absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided 1-based page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Number of pages needed to show `total` rows at `limit` rows per page.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

// ---------------------------------------------------------------------------
// Page request / response
// ---------------------------------------------------------------------------

/// A resolved page request: `page >= 1`, `1 <= limit <= MAX_PAGE_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Resolve raw query values with the resource's default page size.
    pub fn new(page: Option<i64>, limit: Option<i64>, default_limit: i64) -> Self {
        Self {
            page: clamp_page(page),
            limit: clamp_limit(limit, default_limit, MAX_PAGE_LIMIT),
        }
    }

    /// Row offset for the `OFFSET` clause. Saturates for absurd pages, which
    /// then simply return no rows.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Build the pagination block for a result set of `total` rows.
    pub fn paginate(&self, total: i64) -> Pagination {
        Pagination {
            total,
            page: self.page,
            limit: self.limit,
            total_pages: total_pages(total, self.limit),
        }
    }
}

/// The `pagination` block of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

// ---------------------------------------------------------------------------
// Text search
// ---------------------------------------------------------------------------

/// Build an `ILIKE` pattern (`%term%`) from a raw search term.
///
/// Returns `None` for a missing or blank term so callers can skip the
/// predicate entirely. `%`, `_` and `\` in the term match literally.
pub fn like_pattern(term: Option<&str>) -> Option<String> {
    let term = term.map(str::trim).filter(|t| !t.is_empty())?;
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- clamping ------------------------------------------------------------

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(clamp_limit(None, 10, 50), 10);
        assert_eq!(clamp_limit(Some(0), 10, 50), 1);
        assert_eq!(clamp_limit(Some(-5), 10, 50), 1);
        assert_eq!(clamp_limit(Some(500), 10, 50), 50);
    }

    #[test]
    fn page_is_at_least_one() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(4)), 4);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    // -- PageRequest ---------------------------------------------------------

    #[test]
    fn offset_follows_page() {
        let req = PageRequest::new(Some(3), Some(15), DEFAULT_PAGE_LIMIT);
        assert_eq!(req.offset(), 30);
    }

    #[test]
    fn huge_page_saturates_instead_of_overflowing() {
        let req = PageRequest::new(Some(i64::MAX), Some(50), DEFAULT_PAGE_LIMIT);
        assert_eq!(req.page, i64::MAX);
        assert_eq!(req.offset(), i64::MAX);
        assert_eq!(req.paginate(3).total_pages, 1);
    }

    #[test]
    fn paginate_reports_total_pages() {
        let req = PageRequest::new(Some(2), None, 6);
        let p = req.paginate(13);
        assert_eq!(p.total, 13);
        assert_eq!(p.page, 2);
        assert_eq!(p.limit, 6);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn pagination_serializes_camel_case_total_pages() {
        let p = PageRequest::new(None, None, 10).paginate(25);
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert!(json.get("total_pages").is_none());
    }

    // -- like_pattern --------------------------------------------------------

    #[test]
    fn blank_search_is_none() {
        assert_eq!(like_pattern(None), None);
        assert_eq!(like_pattern(Some("   ")), None);
    }

    #[test]
    fn search_is_wrapped_and_trimmed() {
        assert_eq!(like_pattern(Some("  water ")), Some("%water%".to_string()));
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(like_pattern(Some("50%_off")), Some("%50\\%\\_off%".to_string()));
    }
}
