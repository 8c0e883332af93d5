//! Shared query parameter types for API handlers.
//!
//! Numeric parameters are parsed leniently: a malformed value behaves as
//! if it were absent instead of rejecting the request.

use portfolio_core::search::{like_pattern, PageRequest};
use serde::{Deserialize, Deserializer};

/// `?page=&limit=&search=` accepted by every list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl ListParams {
    pub fn page_request(&self, default_limit: i64) -> PageRequest {
        PageRequest::new(self.page, self.limit, default_limit)
    }

    /// `ILIKE` pattern for `search`, or `None` when blank.
    pub fn pattern(&self) -> Option<String> {
        like_pattern(self.search.as_deref())
    }
}

/// Deserialize an optional number from a query string, treating blank or
/// malformed input as `None`.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}

/// Deserialize an optional boolean flag (`true`/`false`/`1`/`0`).
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str) -> ListParams {
        let uri: axum::http::Uri = format!("/x?{query}").parse().unwrap();
        axum::extract::Query::<ListParams>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        let params = parse("page=abc&limit=");
        assert_eq!(params.page, None);
        assert_eq!(params.limit, None);
        assert_eq!(params.page_request(10), PageRequest { page: 1, limit: 10 });
    }

    #[test]
    fn limit_is_clamped() {
        let params = parse("page=0&limit=500");
        assert_eq!(params.page_request(10), PageRequest { page: 1, limit: 50 });
    }

    #[test]
    fn search_becomes_pattern() {
        assert_eq!(parse("search=road").pattern(), Some("%road%".to_string()));
        assert_eq!(parse("search=%20").pattern(), None);
    }
}
