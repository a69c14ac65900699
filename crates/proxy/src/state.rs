//! Application state shared across handlers.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::config::ProxyConfig;
use crate::services::redemption::{RedemptionBackend, Resolver};
use crate::shopify::{AdminClient, AdminShopifyError};

/// Application state shared across all handlers.
///
/// Cheap to clone (uses `Arc` internally).
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ProxyConfig,
    resolver: Resolver,
}

impl AppState {
    /// Build state backed by the Shopify Admin API.
    ///
    /// # Errors
    ///
    /// Returns an error if the Admin API client cannot be created.
    pub fn from_config(config: ProxyConfig) -> Result<Self, AdminShopifyError> {
        let client = AdminClient::new(&config.shopify)?;
        Ok(Self::new(config, Arc::new(client)))
    }

    /// Build state over an arbitrary backend.
    #[must_use]
    pub fn new(config: ProxyConfig, backend: Arc<dyn RedemptionBackend>) -> Self {
        let resolver = Resolver::new(backend, &config.redemption);
        Self {
            inner: Arc::new(AppStateInner { config, resolver }),
        }
    }

    /// Get the proxy configuration.
    #[must_use]
    pub fn config(&self) -> &ProxyConfig {
        &self.inner.config
    }

    /// Get the code resolver.
    #[must_use]
    pub fn resolver(&self) -> &Resolver {
        &self.inner.resolver
    }

    /// App secret for app proxy signatures.
    #[must_use]
    pub fn app_proxy_secret(&self) -> &SecretString {
        &self.inner.config.app_proxy_secret
    }

    /// Whether the Admin API credentials are present.
    #[must_use]
    pub fn credentials_configured(&self) -> bool {
        let shopify = &self.inner.config.shopify;
        !shopify.store.trim().is_empty() && !shopify.access_token.expose_secret().trim().is_empty()
    }
}
