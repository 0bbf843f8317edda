//! Server state
//!
//! One immutable configuration plus the two outbound HTTP clients, shared
//! across handlers. Requests are otherwise stateless: all cross-request
//! state lives in the browser's cookie jar.

use std::sync::Arc;

use rp_catalog::CatalogClient;
use rp_config::OidcConfig;
use rp_oidc::OidcClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<OidcConfig>,
    pub oidc: Arc<OidcClient>,
    pub catalog: Arc<CatalogClient>,
}

impl AppState {
    pub fn new(config: OidcConfig) -> Self {
        let config = Arc::new(config);
        Self {
            oidc: Arc::new(OidcClient::new(Arc::clone(&config))),
            catalog: Arc::new(CatalogClient::new(config.catalog_url.clone())),
            config,
        }
    }
}
