//! Mock OIDC relying party binary

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rp_config::OidcConfig;
use rp_server::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rp_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = OidcConfig::from_env()?;
    info!("Starting mock OIDC relying party");
    info!("Issuer (server-reachable): {}", config.issuer);
    info!("Issuer (browser-reachable): {}", config.browser_issuer);
    info!("Redirect URI: {}", config.redirect_uri);

    let port = config.port;
    let app = rp_server::build_app(AppState::new(config));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("Mock OIDC RP listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
