//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::shop::Catalog;
use crate::subscribers::SubscriberStore;
use crate::wordpress::{WpClient, WpError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the CMS client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    wp: WpClient,
    subscribers: SubscriberStore,
    catalog: Catalog,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Loads the subscriber mirror from disk and builds the CMS client.
    ///
    /// # Errors
    ///
    /// Returns an error if the CMS HTTP client cannot be constructed.
    pub fn new(config: SiteConfig) -> Result<Self, WpError> {
        let wp = WpClient::new(&config.wordpress)?;
        let subscribers = SubscriberStore::load(config.subscribers_file.clone());
        let catalog = Catalog::new();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                wp,
                subscribers,
                catalog,
            }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the WordPress API client.
    #[must_use]
    pub fn wp(&self) -> &WpClient {
        &self.inner.wp
    }

    /// Get a reference to the subscriber store.
    #[must_use]
    pub fn subscribers(&self) -> &SubscriberStore {
        &self.inner.subscribers
    }

    /// Get a reference to the shop catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}
