//! Shared helpers for the integration tests
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use http_body_util::BodyExt;
use tower::ServiceExt;

use rp_config::OidcConfig;
use rp_server::AppState;

/// Build the app against explicit provider and catalog base URLs
/// (usually wiremock servers).
pub fn app(issuer: &str, catalog_url: &str) -> Router {
    let issuer = issuer.to_string();
    let catalog_url = catalog_url.to_string();
    let config = OidcConfig::from_lookup(|name| match name {
        "OIDC_ISSUER" => Some(issuer.clone()),
        "MOCK_IDP_INTERNAL_URL" => Some(catalog_url.clone()),
        _ => None,
    })
    .expect("test config");
    rp_server::build_app(AppState::new(config))
}

/// One GET request through the router, optionally with a Cookie header
pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// All Set-Cookie header values of a response
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().expect("cookie str").to_string())
        .collect()
}

/// The Set-Cookie value for a given cookie name, if any
pub fn set_cookie_for(response: &Response<Body>, name: &str) -> Option<String> {
    set_cookies(response)
        .into_iter()
        .find(|c| c.starts_with(&format!("{}=", name)))
}

/// The value part of a Set-Cookie header (between `name=` and the first `;`)
pub fn cookie_value(set_cookie: &str) -> String {
    set_cookie
        .split_once('=')
        .map(|(_, rest)| rest.split(';').next().unwrap_or(rest).to_string())
        .unwrap_or_default()
}

/// The Location header of a redirect response
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .expect("location str")
        .to_string()
}

/// Collect the response body as a string
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// An unsigned three-segment JWT with the given payload
pub fn unsigned_token(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).unwrap());
    format!("{}.{}.sig", header, body)
}
