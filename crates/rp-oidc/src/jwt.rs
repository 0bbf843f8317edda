//! Structural JWT decoding and expiry checks
//!
//! **No signature, issuer, or audience verification is performed here.**
//! [`decode_jwt`] only splits the compact serialization and parses the
//! payload segment; the result is an *unauthenticated* claims view suitable
//! for display in this mock client, never for a trust decision.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use rp_types::{AppError, AppResult};

/// Claim names treated as standard OIDC claims when grouping for display.
///
/// Purely a presentation split; no behavioural logic depends on it.
pub const STANDARD_CLAIM_KEYS: &[&str] = &[
    "sub",
    "iss",
    "aud",
    "exp",
    "iat",
    "nbf",
    "jti",
    "email",
    "email_verified",
    "name",
    "given_name",
    "family_name",
    "picture",
    "locale",
    "preferred_username",
];

/// `aud` may be a single string or an array of strings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl std::fmt::Display for Audience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Audience::Single(aud) => write!(f, "{}", aud),
            Audience::Multiple(auds) => write!(f, "{}", auds.join(", ")),
        }
    }
}

/// Decoded (unverified) JWT payload
///
/// Well-known claims are typed; everything else lands in `extra` so custom
/// provider claims survive the round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JwtPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,

    /// Expiry, epoch seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at, epoch seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    /// All remaining (non-standard) claims
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Decode a JWT payload without verifying the signature
///
/// Requires the three-segment compact form (`header.payload.signature`),
/// base64url-decodes the payload segment and parses it as JSON. Fails with
/// [`AppError::TokenDecode`] on any structural problem.
pub fn decode_jwt(token: &str) -> AppResult<JwtPayload> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(AppError::TokenDecode(format!(
            "expected 3 segments, got {}",
            segments.len()
        )));
    }

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(segments[1])
        .map_err(|e| AppError::TokenDecode(format!("payload is not valid base64url: {}", e)))?;

    serde_json::from_slice(&payload_bytes)
        .map_err(|e| AppError::TokenDecode(format!("payload is not valid JSON: {}", e)))
}

/// Check whether a token's `exp` claim is in the past
///
/// A token without an `exp` claim is treated as not expired; a token that
/// fails to decode is treated as expired, so the caller falls back toward
/// re-authentication rather than trusting garbage.
pub fn is_token_expired(token: &str) -> bool {
    match decode_jwt(token) {
        Ok(payload) => match payload.exp {
            Some(exp) => exp < chrono::Utc::now().timestamp(),
            None => false,
        },
        Err(_) => true,
    }
}

/// Split a payload's claims into (standard, custom) maps for display
///
/// The grouping follows [`STANDARD_CLAIM_KEYS`] and exists only so views can
/// render the two tables separately.
pub fn partition_claims(payload: &JwtPayload) -> (Map<String, Value>, Map<String, Value>) {
    let all = match serde_json::to_value(payload) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };

    let mut standard = Map::new();
    let mut custom = Map::new();
    for (key, value) in all {
        if STANDARD_CLAIM_KEYS.contains(&key.as_str()) {
            standard.insert(key, value);
        } else {
            custom.insert(key, value);
        }
    }
    (standard, custom)
}
