//! The `admin_token` session cookie.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Name of the cookie holding the session token.
pub const COOKIE_NAME: &str = "admin_token";

/// `Set-Cookie` value that stores `token` for `max_age_secs`.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie =
        format!("{COOKIE_NAME}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={max_age_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that clears the session cookie.
pub fn clear_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Read the session token from the request's `Cookie` headers.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(values: &[&str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for v in values {
            map.append(COOKIE, HeaderValue::from_str(v).unwrap());
        }
        map
    }

    #[test]
    fn session_cookie_attributes() {
        let c = session_cookie("abc", 604800, false);
        assert_eq!(
            c,
            "admin_token=abc; HttpOnly; SameSite=Strict; Path=/; Max-Age=604800"
        );
        assert!(session_cookie("abc", 1, true).ends_with("; Secure"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        assert!(clear_cookie(false).starts_with("admin_token=;"));
        assert!(clear_cookie(false).contains("Max-Age=0"));
    }

    #[test]
    fn finds_token_among_other_cookies() {
        let h = headers(&["theme=dark; admin_token=tok123; lang=en"]);
        assert_eq!(token_from_headers(&h).as_deref(), Some("tok123"));
    }

    #[test]
    fn finds_token_in_second_header() {
        let h = headers(&["theme=dark", "admin_token=tok456"]);
        assert_eq!(token_from_headers(&h).as_deref(), Some("tok456"));
    }

    #[test]
    fn missing_or_empty_token_is_none() {
        assert_eq!(token_from_headers(&headers(&["theme=dark"])), None);
        assert_eq!(token_from_headers(&headers(&["admin_token="])), None);
        assert_eq!(token_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn similar_names_do_not_match() {
        let h = headers(&["x_admin_token=nope"]);
        assert_eq!(token_from_headers(&h), None);
    }
}
