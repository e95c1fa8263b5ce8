//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Injected collaborators**: the record store pool and the text
//!    generator are handed in, never reached through globals
//! 2. **Cheap cloning**: All fields use Arc or are already Clone-cheap
//! 3. **Seedable flavor**: step counts and reminders come from one RNG

use crate::config::AppConfig;
use crate::generator::{HttpGenerator, TextGenerator};
use health_coach_shared::Flavor;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Shared application state
///
/// # Performance
///
/// - `db`: SqlitePool is internally Arc'd, cloning is O(1)
/// - `config`: Wrapped in Arc, cloning is O(1)
/// - `generator`: Arc'd trait object, cloning is O(1)
#[derive(Clone)]
pub struct AppState {
    /// Record store connection pool
    pub db: SqlitePool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// External text generator, when one is configured
    pub generator: Option<Arc<dyn TextGenerator>>,
    flavor_rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    /// Create a new application state
    ///
    /// Builds the HTTP generator from `config.generator` when an endpoint is
    /// configured. A generator that cannot be built is logged and left out,
    /// so every reply falls back to the offline coach.
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        let generator: Option<Arc<dyn TextGenerator>> =
            match HttpGenerator::from_config(&config.generator) {
                Ok(Some(generator)) => {
                    info!("External generator enabled");
                    Some(Arc::new(generator))
                }
                Ok(None) => {
                    info!("No generator endpoint configured; using offline coach only");
                    None
                }
                Err(e) => {
                    warn!("Failed to build generator client: {}. Using offline coach only.", e);
                    None
                }
            };

        let rng = match config.flavor.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            db,
            config: Arc::new(config),
            generator,
            flavor_rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Replace the text generator
    pub fn with_generator(mut self, generator: Option<Arc<dyn TextGenerator>>) -> Self {
        self.generator = generator;
        self
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &SqlitePool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the text generator, if any
    #[inline]
    pub fn generator(&self) -> Option<&dyn TextGenerator> {
        self.generator.as_deref()
    }

    /// Draw the step count and reminder for one response
    pub fn roll_flavor(&self) -> Flavor {
        let mut rng = self
            .flavor_rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Flavor::roll(&mut *rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, FlavorConfig};

    fn lazy_pool() -> SqlitePool {
        SqlitePool::connect_lazy("sqlite::memory:").unwrap()
    }

    #[tokio::test]
    async fn test_state_clone_is_cheap() {
        let state = AppState::new(lazy_pool(), AppConfig::default());

        // Clone should be O(1) - just Arc increments
        let _cloned = state.clone();
    }

    #[tokio::test]
    async fn test_no_generator_without_endpoint() {
        let state = AppState::new(lazy_pool(), AppConfig::default());
        assert!(state.generator().is_none());
    }

    #[tokio::test]
    async fn test_generator_built_from_endpoint() {
        let mut config = AppConfig::default();
        config.generator.url = Some("http://localhost:9/generate".to_string());
        let state = AppState::new(lazy_pool(), config);
        assert!(state.generator().is_some());
    }

    #[tokio::test]
    async fn test_seeded_flavor_is_reproducible() {
        let seeded = || AppConfig {
            flavor: FlavorConfig { seed: Some(42) },
            ..AppConfig::default()
        };
        let a = AppState::new(lazy_pool(), seeded());
        let b = AppState::new(lazy_pool(), seeded());
        assert_eq!(a.roll_flavor(), b.roll_flavor());
        assert_eq!(a.roll_flavor(), b.roll_flavor());
    }
}
