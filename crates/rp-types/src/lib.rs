//! Shared types and error types for the mock OIDC relying party

pub mod errors;

pub use errors::{AppError, AppResult};
