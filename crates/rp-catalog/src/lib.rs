//! Mock identity catalog client
//!
//! The mock IdP publishes its user catalog as a JSON array at
//! `{base}/users.json`. This crate fetches that list read-only; identities
//! are never created or mutated from here. An unreachable catalog or a
//! non-array body is a hard error for the caller to recover from (the entry
//! view degrades to a banner).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use rp_types::{AppError, AppResult};

/// One identity from the mock IdP catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockIdpUser {
    pub id: String,
    pub email: String,

    #[serde(default)]
    pub firstname: Option<String>,

    #[serde(default)]
    pub lastname: Option<String>,

    #[serde(default)]
    pub account: Option<String>,

    #[serde(default)]
    pub services: Option<Vec<String>>,

    #[serde(default)]
    pub rights: Option<Vec<String>>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl MockIdpUser {
    /// "Firstname Lastname" with missing parts skipped
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.firstname.as_deref(), self.lastname.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        parts.join(" ")
    }
}

/// HTTP client for the mock IdP's user catalog
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client against the server-reachable catalog base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the user catalog
    ///
    /// Non-2xx responses and transport failures are [`AppError::Catalog`]
    /// errors carrying status and body text; so is a body that is not a JSON
    /// array. Entries missing `id` or `email` are dropped with a warning.
    pub async fn fetch_users(&self) -> AppResult<Vec<MockIdpUser>> {
        let url = format!("{}/users.json", self.base_url.trim_end_matches('/'));
        debug!("Fetching mock user catalog from {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Catalog(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Catalog(format!("{} - {}", status, body)));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| AppError::Catalog(format!("invalid JSON: {}", e)))?;

        let entries = match data {
            Value::Array(entries) => entries,
            other => {
                return Err(AppError::Catalog(format!(
                    "expected a JSON array, got {}",
                    type_name(&other)
                )));
            }
        };

        let users: Vec<MockIdpUser> = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("Skipping malformed catalog entry: {}", e);
                    None
                }
            })
            .collect();

        debug!("Loaded {} mock identities", users.len());
        Ok(users)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_users_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": "test_oidc_admin",
                    "email": "test1_sso@yopmail.com",
                    "firstname": "Test",
                    "lastname": "OIDC",
                    "account": "test-account",
                    "services": ["EQCORPORATEPLUS"],
                    "rights": ["read", "write"],
                },
                {
                    "id": "auto_provision_student",
                    "email": "student.mock@questel.com",
                },
            ])))
            .mount(&server)
            .await;

        let users = CatalogClient::new(server.uri()).fetch_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].display_name(), "Test OIDC");
        assert_eq!(users[1].display_name(), "");
        assert_eq!(users[1].email, "student.mock@questel.com");
    }

    #[tokio::test]
    async fn test_entries_without_id_or_email_are_dropped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "ok", "email": "ok@example.com" },
                { "id": "missing-email" },
                { "email": "missing-id@example.com" },
                "not even an object",
            ])))
            .mount(&server)
            .await;

        let users = CatalogClient::new(server.uri()).fetch_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "ok");
    }

    #[tokio::test]
    async fn test_non_array_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"users": []})))
            .mount(&server)
            .await;

        let err = CatalogClient::new(server.uri())
            .fetch_users()
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Catalog(_)));
        assert!(err.to_string().contains("expected a JSON array"));
    }

    #[tokio::test]
    async fn test_non_2xx_is_an_error_with_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users.json"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
            .mount(&server)
            .await;

        let err = CatalogClient::new(server.uri())
            .fetch_users()
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("down for maintenance"));
    }

    #[tokio::test]
    async fn test_unreachable_catalog_is_an_error() {
        let err = CatalogClient::new("http://127.0.0.1:1")
            .fetch_users()
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Catalog(_)));
    }

    #[tokio::test]
    async fn test_empty_catalog_is_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let users = CatalogClient::new(server.uri()).fetch_users().await.unwrap();
        assert!(users.is_empty());
    }
}
