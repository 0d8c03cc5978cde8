use axum::http::{HeaderMap, header::AUTHORIZATION};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use vidhub_core::TokenPair;

use crate::config::{ACCESS_TOKEN_COOKIE_NAME, REFRESH_TOKEN_COOKIE_NAME};

// Create cookie and set the value to the passed-in token string
pub fn create_auth_cookie(cookie_name: &'static str, token: String) -> Cookie<'static> {
    Cookie::build((cookie_name, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn create_removal_cookie(cookie_name: &'static str) -> Cookie<'static> {
    let mut cookie = create_auth_cookie(cookie_name, String::new());
    cookie.make_removal();
    cookie
}

/// Adds both tokens of `tokens` to the jar.
pub fn with_auth_cookies(jar: CookieJar, tokens: &TokenPair) -> CookieJar {
    jar.add(create_auth_cookie(
        ACCESS_TOKEN_COOKIE_NAME,
        tokens.access_token.clone(),
    ))
    .add(create_auth_cookie(
        REFRESH_TOKEN_COOKIE_NAME,
        tokens.refresh_token.clone(),
    ))
}

/// Expires both auth cookies, whether or not the request carried them.
pub fn without_auth_cookies(jar: CookieJar) -> CookieJar {
    [ACCESS_TOKEN_COOKIE_NAME, REFRESH_TOKEN_COOKIE_NAME]
        .into_iter()
        .fold(jar, |jar, name| jar.add(create_removal_cookie(name)))
}

/// Access token from the `accessToken` cookie, falling back to a bearer header.
pub fn extract_access_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    jar.get(ACCESS_TOKEN_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(|token| token.trim().to_owned())
        })
        .filter(|token| !token.is_empty())
}
