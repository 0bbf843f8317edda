//! Authorization code flow handlers: login, callback, logout
//!
//! The callback handler is the security-critical state machine of this
//! service. Its checks run strictly in order and short-circuit: upstream
//! error, missing code, missing state, CSRF state comparison, token
//! exchange. The persisted state cookie is single-use: it is deleted on
//! every terminal transition, whether or not validation succeeded.

use axum::extract::{Query, State};
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::{info, warn};

use rp_oidc::generate_state;

use super::found;
use crate::cookies;
use crate::state::AppState;

/// Query parameters for `GET /login`
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Pre-selected identity, forwarded as `login_hint`
    pub login_hint: Option<String>,
    /// Legacy alias for `login_hint`
    pub email: Option<String>,
    /// Forwarded `prompt` value (e.g. `login`, `none`)
    pub prompt: Option<String>,
}

/// Query parameters for `GET /callback`
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// GET /login - initiate the authorization code flow
///
/// Issues a fresh CSRF state, persists it in the single-slot state cookie
/// (last write wins across concurrent logins), and redirects the browser to
/// the provider's authorization endpoint. No network calls happen here.
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
    jar: CookieJar,
) -> (CookieJar, Response) {
    let config = &state.config;
    let csrf_state = generate_state();

    let jar = jar.add(cookies::state_cookie(
        csrf_state.clone(),
        config.secure_cookies,
    ));

    // Browser-reachable endpoint; the server-reachable issuer must never
    // leak into a URL the browser has to follow.
    let mut auth_url = format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
        config.authorization_endpoint(),
        urlencoding::encode(&config.client_id),
        urlencoding::encode(&config.redirect_uri),
        urlencoding::encode(&config.scope_param()),
        urlencoding::encode(&csrf_state),
    );

    if let Some(hint) = query.login_hint.or(query.email) {
        auth_url.push_str(&format!("&login_hint={}", urlencoding::encode(&hint)));
    }
    if let Some(prompt) = query.prompt {
        auth_url.push_str(&format!("&prompt={}", urlencoding::encode(&prompt)));
    }

    info!("Redirecting to authorization endpoint");
    (jar, found(&auth_url))
}

/// GET /callback - authorization code callback
///
/// Validates the callback parameters and the CSRF state, exchanges the code
/// for tokens and persists them. Every failure becomes a redirect to the
/// entry view with `error` and `error_description` query parameters; token
/// cookies are written only after a fully successful exchange.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackQuery>,
    jar: CookieJar,
) -> (CookieJar, Response) {
    // Upstream reported an error (e.g. access_denied). The state cookie is
    // cleared here too: every terminal transition consumes it.
    if let Some(error) = params.error {
        let description = params.error_description.unwrap_or_else(|| error.clone());
        warn!("Authorization callback carried an error: {}", error);
        let jar = jar.remove(cookies::removal(cookies::OAUTH_STATE));
        return (jar, failure_redirect(&error, &description));
    }

    let Some(code) = params.code else {
        let jar = jar.remove(cookies::removal(cookies::OAUTH_STATE));
        return (
            jar,
            failure_redirect("missing_code", "Authorization code not provided"),
        );
    };

    let Some(received_state) = params.state else {
        let jar = jar.remove(cookies::removal(cookies::OAUTH_STATE));
        return (
            jar,
            failure_redirect("missing_state", "State parameter not provided"),
        );
    };

    // Read and unconditionally delete the persisted state: single-use,
    // consumed whether or not the comparison below succeeds.
    let stored_state = jar
        .get(cookies::OAUTH_STATE)
        .map(|cookie| cookie.value().to_string());
    let jar = jar.remove(cookies::removal(cookies::OAUTH_STATE));

    match stored_state {
        Some(stored) if stored == received_state => {}
        _ => {
            warn!("State mismatch on callback, rejecting (possible CSRF or replay)");
            return (
                jar,
                failure_redirect("invalid_state", "State mismatch - possible CSRF attack"),
            );
        }
    }

    match state
        .oidc
        .exchange_code(&code, &state.config.redirect_uri)
        .await
    {
        Ok(tokens) => {
            let secure = state.config.secure_cookies;
            let mut jar = jar
                .add(cookies::token_cookie(
                    cookies::ID_TOKEN,
                    tokens.id_token,
                    secure,
                ))
                .add(cookies::token_cookie(
                    cookies::ACCESS_TOKEN,
                    tokens.access_token,
                    secure,
                ));
            if let Some(refresh_token) = tokens.refresh_token {
                jar = jar.add(cookies::token_cookie(
                    cookies::REFRESH_TOKEN,
                    refresh_token,
                    secure,
                ));
            }
            info!("Login completed, tokens persisted");
            (jar, found("/profile"))
        }
        Err(e) => {
            warn!("Token exchange failed: {}", e);
            (jar, failure_redirect("token_exchange_failed", &e.to_string()))
        }
    }
}

/// GET /logout - delete all auth cookies and return to the entry view
pub async fn logout(jar: CookieJar) -> (CookieJar, Response) {
    let mut jar = jar.remove(cookies::removal(cookies::OAUTH_STATE));
    for &name in cookies::TOKEN_COOKIES {
        jar = jar.remove(cookies::removal(name));
    }
    info!("Logged out, auth cookies cleared");
    (jar, found("/"))
}

/// Redirect to the entry view carrying a machine-readable error code and a
/// human-readable description, both URL-encoded. Never a raw error surface.
fn failure_redirect(code: &str, description: &str) -> Response {
    found(&format!(
        "/?error={}&error_description={}",
        urlencoding::encode(code),
        urlencoding::encode(description)
    ))
}
