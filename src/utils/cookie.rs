// src/utils/cookie.rs

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Reads one cookie value from the request's `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(name)
        .map(|cookie| cookie.value().to_string())
}

/// HttpOnly session cookie living for `max_age` seconds.
pub fn session_cookie(name: &str, value: &str, max_age: u64, secure: bool) -> Cookie<'static> {
    Cookie::build((name.to_string(), value.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(i64::try_from(max_age).unwrap_or(i64::MAX)))
        .secure(secure)
        .build()
}

/// A cookie that expires the session cookie immediately.
pub fn clear_cookie(name: &str, secure: bool) -> Cookie<'static> {
    session_cookie(name, "", 0, secure)
}
