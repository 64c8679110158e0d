//! Application state shared by storefront front ends.

use std::sync::Arc;

use sports_jersey_core::CartStore;

use crate::api::{ApiError, StoreApiClient};
use crate::config::StorefrontConfig;
use crate::storage::FileStorage;

/// Application state shared across commands.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration and the backend client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    api: StoreApiClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: StorefrontConfig) -> Result<Self, ApiError> {
        let api = StoreApiClient::new(&config)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, api }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the backend API client.
    #[must_use]
    pub fn api(&self) -> &StoreApiClient {
        &self.inner.api
    }

    /// Open the durable cart for this session.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open_cart(&self) -> crate::error::Result<CartStore<FileStorage>> {
        let storage = FileStorage::open(&self.inner.config.data_dir)?;
        Ok(CartStore::load(storage, self.inner.config.key_mode))
    }
}
