//! Configuration for the mock OIDC relying party
//!
//! All configuration is read from environment variables exactly once at
//! process start and frozen into an [`OidcConfig`]. Components receive the
//! struct (usually behind an `Arc`) through their constructors and never
//! consult the environment themselves.
//!
//! The provider may be reachable under two different network names: one from
//! inside the server process (e.g. a Docker-internal hostname) and one from
//! the user's browser. `issuer` is the server-reachable base and is used for
//! all server-to-server calls (token, userinfo); `browser_issuer` is the
//! browser-reachable base and is used for every URL handed to the browser
//! (the authorization redirect). The two are independent configuration
//! values rather than being derived from each other at request time.

use serde::{Deserialize, Serialize};
use tracing::debug;

use rp_types::{AppError, AppResult};

/// Default server-reachable issuer (Docker-internal hostname).
const DEFAULT_ISSUER: &str = "http://oidc-server:8080";

/// Default client port when neither `PORT` nor `MOCK_CLIENT_PORT` is set.
const DEFAULT_PORT: u16 = 8079;

/// Immutable relying-party configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OidcConfig {
    /// Server-reachable authority base URL (token/userinfo calls)
    pub issuer: String,

    /// Browser-reachable authority base URL (authorization redirect)
    pub browser_issuer: String,

    /// OAuth client identifier
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// Redirect URI registered with the provider (browser-reachable)
    pub redirect_uri: String,

    /// Requested scopes, in order
    pub scopes: Vec<String>,

    /// HTTP listen port
    pub port: u16,

    /// Server-reachable base URL of the mock identity catalog
    pub catalog_url: String,

    /// Browser-reachable base URL of the mock identity catalog (display only)
    pub catalog_browser_url: String,

    /// Whether cookies are marked `Secure` (production-equivalent envs)
    pub secure_cookies: bool,
}

impl OidcConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    ///
    /// Separated from [`from_env`](Self::from_env) so tests can supply
    /// variables without mutating process-global environment state.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT").or_else(|| lookup("MOCK_CLIENT_PORT")) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("Invalid port '{}': {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let issuer = lookup("OIDC_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string());

        // An explicit browser issuer always wins. Otherwise the only sensible
        // default is the server-reachable issuer with the Docker-internal
        // hostname swapped for localhost; this derivation happens once, here,
        // and never at request time.
        let browser_issuer = match lookup("OIDC_BROWSER_ISSUER") {
            Some(explicit) => explicit,
            None => issuer.replace("oidc-server", "localhost"),
        };

        let redirect_uri = lookup("OIDC_REDIRECT_URI")
            .unwrap_or_else(|| format!("http://localhost:{}/callback", port));

        let scopes: Vec<String> = lookup("OIDC_SCOPES")
            .unwrap_or_else(|| "openid profile email qp account".to_string())
            .split_whitespace()
            .map(|s| s.to_string())
            .collect();

        let catalog_url =
            lookup("MOCK_IDP_INTERNAL_URL").unwrap_or_else(|| "http://fenikz.eu:5001".to_string());
        let catalog_browser_url =
            lookup("MOCK_IDP_BROWSER_URL").unwrap_or_else(|| catalog_url.clone());

        let secure_cookies = lookup("APP_ENV").as_deref() == Some("production");

        let config = Self {
            issuer,
            browser_issuer,
            client_id: lookup("OIDC_CLIENT_ID")
                .unwrap_or_else(|| "test-oidc-cascade-client".to_string()),
            client_secret: lookup("OIDC_CLIENT_SECRET")
                .unwrap_or_else(|| "test-client-secret".to_string()),
            redirect_uri,
            scopes,
            port,
            catalog_url,
            catalog_browser_url,
            secure_cookies,
        };

        debug!(
            issuer = %config.issuer,
            browser_issuer = %config.browser_issuer,
            port = config.port,
            "Loaded relying-party configuration"
        );

        Ok(config)
    }

    /// Authorization endpoint, browser-reachable form
    pub fn authorization_endpoint(&self) -> String {
        format!("{}/authorize", self.browser_issuer.trim_end_matches('/'))
    }

    /// Token endpoint, server-reachable form
    pub fn token_endpoint(&self) -> String {
        format!("{}/token", self.issuer.trim_end_matches('/'))
    }

    /// Userinfo endpoint, server-reachable form
    pub fn userinfo_endpoint(&self) -> String {
        format!("{}/userinfo", self.issuer.trim_end_matches('/'))
    }

    /// Space-joined scope string for the authorization request
    pub fn scope_param(&self) -> String {
        self.scopes.join(" ")
    }
}
