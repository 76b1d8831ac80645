//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! Everything expensive (key parsing, pool creation) happens once at
//! startup. All fields are `Arc`-backed, so cloning per request is O(1).

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::repositories::Stores;
use anyhow::Result;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Store handles for every persisted entity
    pub stores: Stores,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Session token issuer and validator with loaded keys
    pub jwt: JwtService,
}

impl AppState {
    pub fn new(stores: Stores, config: Arc<AppConfig>, jwt: JwtService) -> Self {
        Self {
            stores,
            config,
            jwt,
        }
    }

    /// Build state from configuration, loading the signing keys from disk
    ///
    /// Fails when the keys are missing, unreadable, or not a matching pair.
    pub fn from_config(stores: Stores, config: AppConfig) -> Result<Self> {
        let jwt = JwtService::from_config(&config.jwt)?;
        Ok(Self::new(stores, Arc::new(config), jwt))
    }

    #[inline]
    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
