//! Axum HTTP server for the mock OIDC relying party
//!
//! Exposes the browser-facing surface of the authorization code flow:
//! - `GET /` entry page (identity picker, error banners)
//! - `GET /login` redirect to the provider's authorization endpoint
//! - `GET /callback` authorization code callback (CSRF check + exchange)
//! - `GET /profile` decoded id_token claims
//! - `GET /logout` cookie teardown

pub mod cookies;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the Axum app with all routes and middleware
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::pages::index))
        .route("/profile", get(routes::pages::profile))
        .route("/login", get(routes::auth::login))
        .route("/callback", get(routes::auth::callback))
        .route("/logout", get(routes::auth::logout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
