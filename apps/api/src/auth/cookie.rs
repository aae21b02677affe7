//! `rr_token` cookie handling.

use axum::http::{header, HeaderMap};

use crate::auth::token::TOKEN_TTL_SECS;

pub const AUTH_COOKIE: &str = "rr_token";

/// `Set-Cookie` value carrying a fresh session token.
pub fn session_cookie(token: &str, secure: bool) -> String {
    build_cookie(token, TOKEN_TTL_SECS, secure)
}

/// `Set-Cookie` value that expires the session immediately.
pub fn cleared_cookie(secure: bool) -> String {
    build_cookie("", 0, secure)
}

fn build_cookie(value: &str, max_age: i64, secure: bool) -> String {
    let mut cookie =
        format!("{AUTH_COOKIE}={value}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Reads the session token from the `rr_token` cookie, falling back to a
/// `Bearer` Authorization header.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == AUTH_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc.def", false);
        assert_eq!(
            cookie,
            "rr_token=abc.def; HttpOnly; SameSite=Lax; Path=/; Max-Age=604800"
        );
        assert!(session_cookie("abc.def", true).ends_with("; Secure"));
    }

    #[test]
    fn test_cleared_cookie_has_zero_max_age() {
        assert!(cleared_cookie(false).contains("rr_token=;"));
        assert!(cleared_cookie(false).contains("Max-Age=0"));
    }

    #[test]
    fn test_token_read_from_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; rr_token=tok.sig; lang=en"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("tok.sig"));
    }

    #[test]
    fn test_token_read_from_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok.sig"));
        assert_eq!(token_from_headers(&headers).as_deref(), Some("tok.sig"));
    }

    #[test]
    fn test_empty_cookie_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("rr_token="));
        assert!(token_from_headers(&headers).is_none());
    }
}
