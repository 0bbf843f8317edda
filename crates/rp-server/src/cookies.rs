//! Cookie adapter for the relying party's persisted client state
//!
//! The only module that names or constructs the persisted cookies. Four
//! well-known names exist: the single-slot CSRF state and the three token
//! cookies. Everything is HttpOnly + SameSite=Lax + Path=/; `Secure` is
//! driven by configuration (on in production-equivalent environments).

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// CSRF state, single-use, short-lived
pub const OAUTH_STATE: &str = "oauth_state";

pub const ID_TOKEN: &str = "id_token";
pub const ACCESS_TOKEN: &str = "access_token";
pub const REFRESH_TOKEN: &str = "refresh_token";

/// The three token cookie names, in the order they are written
pub const TOKEN_COOKIES: &[&str] = &[ID_TOKEN, ACCESS_TOKEN, REFRESH_TOKEN];

/// State cookie lifetime: long enough to finish a login round trip
const STATE_MAX_AGE: Duration = Duration::minutes(10);

/// Token cookie lifetime
const TOKEN_MAX_AGE: Duration = Duration::hours(24);

/// Build the CSRF state cookie
pub fn state_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((OAUTH_STATE, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(STATE_MAX_AGE)
        .build()
}

/// Build one of the token cookies
pub fn token_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(TOKEN_MAX_AGE)
        .build()
}

/// Build a cookie suitable for `CookieJar::remove`
///
/// Path must match the original write or the browser keeps the old cookie.
pub fn removal(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").build()
}
