//! Token exchange and userinfo client
//!
//! Server-to-server HTTP calls against the provider. Both calls always use
//! the server-reachable endpoint addresses from [`OidcConfig`]; the
//! browser-reachable issuer never appears here.

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use rp_config::OidcConfig;
use rp_types::{AppError, AppResult};

/// Token response from the provider's token endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Access token
    pub access_token: String,

    /// Token type (usually "Bearer")
    #[serde(default)]
    pub token_type: String,

    /// Expires in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,

    /// Refresh token (optional)
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// ID token (signed JWT, decoded elsewhere without verification)
    pub id_token: String,

    /// Granted scope (optional)
    #[serde(default)]
    pub scope: Option<String>,
}

/// HTTP client for the provider's token and userinfo endpoints
#[derive(Debug, Clone)]
pub struct OidcClient {
    http: Client,
    config: Arc<OidcConfig>,
}

impl OidcClient {
    /// Create a new client against the configured provider
    pub fn new(config: Arc<OidcConfig>) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Exchange an authorization code for tokens
    ///
    /// Sends the form-encoded `authorization_code` grant to the
    /// server-reachable token endpoint. Any transport failure or non-2xx
    /// response surfaces as [`AppError::TokenExchange`] with the HTTP status
    /// and response body in the message. No retries.
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> AppResult<TokenResponse> {
        let token_endpoint = self.config.token_endpoint();
        debug!("Exchanging authorization code at {}", token_endpoint);

        let mut params = HashMap::new();
        params.insert("grant_type", "authorization_code");
        params.insert("code", code);
        params.insert("redirect_uri", redirect_uri);
        params.insert("client_id", self.config.client_id.as_str());
        params.insert("client_secret", self.config.client_secret.as_str());

        let response = self
            .http
            .post(&token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::TokenExchange(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Token exchange failed with status {}: {}", status, body);
            return Err(AppError::TokenExchange(format!("{} - {}", status, body)));
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::TokenExchange(format!("invalid token response: {}", e)))?;

        info!("Token exchange successful");
        Ok(tokens)
    }

    /// Fetch the userinfo claims for an access token
    ///
    /// Bearer-authorized GET against the server-reachable userinfo endpoint.
    /// Same error policy as [`exchange_code`](Self::exchange_code), surfaced
    /// as [`AppError::UserInfo`].
    pub async fn get_user_info(&self, access_token: &str) -> AppResult<Map<String, Value>> {
        let userinfo_endpoint = self.config.userinfo_endpoint();
        debug!("Fetching userinfo from {}", userinfo_endpoint);

        let response = self
            .http
            .get(&userinfo_endpoint)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::UserInfo(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("UserInfo request failed with status {}: {}", status, body);
            return Err(AppError::UserInfo(format!("{} - {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UserInfo(format!("invalid userinfo response: {}", e)))
    }
}
