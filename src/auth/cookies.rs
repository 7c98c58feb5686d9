//! Session cookie encoding.

use axum::http::{header, HeaderMap};
use cookie::{Cookie, SameSite};
use time::Duration;

use crate::config::CookieConfig;

/// `Set-Cookie` value carrying a freshly issued session token.
pub fn session_cookie(cfg: &CookieConfig, token: &str, max_age: std::time::Duration) -> String {
    Cookie::build((cfg.name.clone(), token.to_owned()))
        .path("/")
        .http_only(true)
        .secure(cfg.secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age.as_secs() as i64))
        .build()
        .to_string()
}

/// `Set-Cookie` value that makes the browser drop the session cookie.
pub fn removal_cookie(cfg: &CookieConfig) -> String {
    Cookie::build((cfg.name.clone(), ""))
        .path("/")
        .http_only(true)
        .secure(cfg.secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .build()
        .to_string()
}

/// Token from the named cookie, if the request carries one.
pub fn token_from_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| Cookie::parse(pair.trim()).ok())
        .find(|c| c.name() == name && !c.value().is_empty())
        .map(|c| c.value().to_string())
}

/// Token from `Authorization: Bearer <token>`.
pub fn token_from_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(str::to_string)
}
