//! Route handlers

pub mod auth;
pub mod pages;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// 302 Found redirect
///
/// Axum's `Redirect` helpers emit 303/307/308; the original OAuth surface
/// uses a plain 302, which every user agent follows for these GET-to-GET
/// hops.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
