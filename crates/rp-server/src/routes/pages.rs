//! Server-rendered entry and profile pages
//!
//! Plain format!-assembled HTML; every interpolated value goes through
//! [`escape_html`]. The profile page renders the *unverified* decode of the
//! id_token and is display-only: nothing here is a trust decision.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use rp_catalog::MockIdpUser;
use rp_oidc::{decode_jwt, is_token_expired, partition_claims};

use super::found;
use crate::cookies;
use crate::state::AppState;

/// Query parameters carried back to the entry view on failed logins
#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// GET / - entry view
///
/// Authenticated browsers are sent straight to the profile. Otherwise the
/// identity catalog is fetched; if it is unreachable the page still renders,
/// with login disabled and an explanatory banner instead of a failed
/// request.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
    jar: CookieJar,
) -> Response {
    if jar.get(cookies::ID_TOKEN).is_some() {
        return found("/profile");
    }

    let catalog = match state.catalog.fetch_users().await {
        Ok(users) => Ok(users),
        Err(e) => {
            warn!("Mock user catalog unavailable: {}", e);
            Err(e.to_string())
        }
    };

    Html(render_index(
        &query,
        &catalog,
        &state.config.catalog_browser_url,
    ))
    .into_response()
}

/// GET /profile - decoded id_token claims
///
/// Redirects unauthenticated browsers to the entry view. A token that fails
/// to decode degrades to an error banner rather than failing the request.
pub async fn profile(jar: CookieJar) -> Response {
    let Some(cookie) = jar.get(cookies::ID_TOKEN) else {
        return found("/");
    };
    let token = cookie.value();

    match decode_jwt(token) {
        Ok(payload) => {
            let expired = is_token_expired(token);
            let (standard, custom) = partition_claims(&payload);
            Html(render_profile(&standard, &custom, expired, None)).into_response()
        }
        Err(e) => {
            warn!("Stored id_token failed to decode: {}", e);
            let empty = Map::new();
            Html(render_profile(&empty, &empty, false, Some(&e.to_string()))).into_response()
        }
    }
}

fn render_index(
    query: &IndexQuery,
    catalog: &Result<Vec<MockIdpUser>, String>,
    catalog_browser_url: &str,
) -> String {
    let mut body = String::new();
    body.push_str("<h1>Mock OIDC Client RP</h1>\n");
    body.push_str(
        "<p>This is a mock Relying Party client for testing the OIDC cascade workflow.</p>\n",
    );

    if let Some(error) = &query.error {
        body.push_str(&format!(
            "<div class=\"error\"><strong>Authentication Error:</strong><p>{}</p>{}</div>\n",
            escape_html(error),
            query
                .error_description
                .as_deref()
                .map(|d| format!("<p>{}</p>", escape_html(d)))
                .unwrap_or_default(),
        ));
    }

    match catalog {
        Err(catalog_error) => {
            body.push_str(&format!(
                "<div class=\"error\"><strong>User catalog unavailable:</strong><p>{}</p></div>\n",
                escape_html(catalog_error)
            ));
        }
        Ok(users) => {
            body.push_str("<form action=\"/login\" method=\"GET\">\n");
            if users.is_empty() {
                body.push_str(
                    "<p>No mock identities configured. Update users.json in mock-idp to add test users.</p>\n",
                );
            }
            body.push_str("<label for=\"login_hint\">Choose a mock identity</label>\n");
            body.push_str(&format!(
                "<select id=\"login_hint\" name=\"login_hint\"{}>\n",
                if users.is_empty() { " disabled" } else { "" }
            ));
            for user in users {
                body.push_str(&format!(
                    "<option value=\"{}\">{} ({})</option>\n",
                    escape_html(&user.email),
                    escape_html(&user.display_name()),
                    escape_html(&user.email),
                ));
            }
            body.push_str("</select>\n");
            body.push_str(&format!(
                "<button type=\"submit\"{}>Login with OIDC</button>\n",
                if users.is_empty() { " disabled" } else { "" }
            ));
            body.push_str("</form>\n");

            if !users.is_empty() {
                body.push_str(&format!(
                    "<h2>Available identities</h2>\n<p>Served from {}/users.json</p>\n",
                    escape_html(catalog_browser_url)
                ));
                body.push_str(
                    "<table><tr><th>Name</th><th>Email</th><th>Account</th><th>Services</th></tr>\n",
                );
                for user in users {
                    body.push_str(&format!(
                        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                        escape_html(&user.display_name()),
                        escape_html(&user.email),
                        escape_html(user.account.as_deref().unwrap_or("-")),
                        escape_html(&user.services.as_deref().unwrap_or_default().join(", ")),
                    ));
                }
                body.push_str("</table>\n");
            }
        }
    }

    page_shell("Mock OIDC Client RP", &body)
}

fn render_profile(
    standard: &Map<String, Value>,
    custom: &Map<String, Value>,
    expired: bool,
    decode_error: Option<&str>,
) -> String {
    let mut body = String::new();
    body.push_str("<h1>User Profile</h1>\n");

    if let Some(error) = decode_error {
        body.push_str(&format!(
            "<div class=\"error\"><strong>Error decoding token:</strong> {}</div>\n",
            escape_html(error)
        ));
    }
    if expired {
        body.push_str(
            "<div class=\"error\"><strong>Token Expired:</strong> This token has expired. Please login again.</div>\n",
        );
    }

    body.push_str("<p><a href=\"/logout\">Logout</a></p>\n");

    body.push_str("<h2>Standard OIDC Claims</h2>\n");
    body.push_str(&claims_table(standard));
    body.push_str("<h2>Custom Claims</h2>\n");
    if custom.is_empty() {
        body.push_str("<p>None</p>\n");
    } else {
        body.push_str(&claims_table(custom));
    }

    page_shell("User Profile", &body)
}

fn claims_table(claims: &Map<String, Value>) -> String {
    let mut table = String::from("<table><tr><th>Claim</th><th>Value</th></tr>\n");
    for (key, value) in claims {
        let rendered = match key.as_str() {
            // Epoch-second claims read better as dates
            "exp" | "iat" | "nbf" => value
                .as_i64()
                .map(fmt_epoch)
                .unwrap_or_else(|| fmt_value(value)),
            _ => fmt_value(value),
        };
        table.push_str(&format!(
            "<tr><td><code>{}</code></td><td>{}</td></tr>\n",
            escape_html(key),
            escape_html(&rendered),
        ));
    }
    table.push_str("</table>\n");
    table
}

/// Render a JSON claim value without the JSON quoting noise
fn fmt_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(fmt_value).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

/// Epoch seconds as a readable UTC timestamp
fn fmt_epoch(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| secs.to_string())
}

fn page_shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n\
         <style>body{{font-family:sans-serif;max-width:720px;margin:2rem auto;padding:0 1rem}}\
         table{{border-collapse:collapse;width:100%}}td,th{{border:1px solid #ccc;padding:0.4rem;text-align:left}}\
         .error{{background:#fee;border:1px solid #c00;padding:0.75rem;margin:1rem 0}}</style>\n\
         </head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
