//! Application state shared across API handlers

use std::sync::Arc;

use nation_core::{AppConfig, ContractConfig};
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur in the API layer
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected configuration update
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] nation_core::Error),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RwLock<AppConfig>,
}

impl AppState {
    /// Create a new application state with default config
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create with a specific config
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config: RwLock::new(config),
            }),
        }
    }

    /// Get current config
    pub async fn config(&self) -> AppConfig {
        self.inner.config.read().await.clone()
    }

    /// Get current contract configuration
    pub async fn contracts(&self) -> ContractConfig {
        self.inner.config.read().await.contracts.clone()
    }

    /// Replace the contract configuration after validating it.
    ///
    /// # Errors
    /// Returns `ApiError::InvalidConfig` if an address is malformed.
    pub async fn set_contracts(&self, contracts: ContractConfig) -> Result<(), ApiError> {
        contracts.validate()?;
        let mut config = self.inner.config.write().await;
        tracing::info!(
            nation = %contracts.nation_token,
            venation = %contracts.venation_token,
            "Contract configuration updated"
        );
        config.contracts = contracts;
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
