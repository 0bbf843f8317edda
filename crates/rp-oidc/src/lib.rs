//! OIDC protocol pieces for the mock relying party
//!
//! Covers the three leaf concerns of the authorization code flow:
//! CSRF state generation ([`generate_state`]), structural JWT decoding
//! ([`decode_jwt`], [`is_token_expired`]), and the server-to-server token
//! exchange / userinfo client ([`OidcClient`]).

pub mod client;
pub mod jwt;
pub mod state;

pub use client::{OidcClient, TokenResponse};
pub use jwt::{
    decode_jwt, is_token_expired, partition_claims, Audience, JwtPayload, STANDARD_CLAIM_KEYS,
};
pub use state::generate_state;
