//! Configuration management for the Health Coach backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: HC__)
//! 4. The short variable names `LLM_API_URL`, `LLM_API_KEY`, `LLM_MODEL`, `PORT`

use anyhow::Result;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;

/// Application configuration
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub flavor: FlavorConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// External text generator configuration
///
/// The generator is only used when `url` is set to a non-blank value.
#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub url: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: Option<SecretString>,
    pub model: String,
    pub timeout_secs: u64,
    /// Extra fields merged into every request payload
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

/// Presentation flavor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlavorConfig {
    /// Fixed RNG seed for reproducible step counts and reminders
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Trimmed endpoint URL, if one is configured
    pub fn endpoint(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    /// Trimmed model name, if not blank
    pub fn model_name(&self) -> Option<&str> {
        Some(self.model.trim()).filter(|m| !m.is_empty())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            model: "gemini-flash-2.5-pro".to_string(),
            timeout_secs: 30,
            extra: HashMap::new(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            database: DatabaseConfig {
                url: "sqlite://data/app.db".to_string(),
                max_connections: 5,
            },
            generator: GeneratorConfig::default(),
            flavor: FlavorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with HC__ prefix
    /// 4. `LLM_API_URL`, `LLM_API_KEY`, `LLM_MODEL` and `PORT`
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (HC__ prefix)
            // e.g., HC__SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("HC").separator("__"))
            .set_override_option("generator.url", non_blank_env("LLM_API_URL"))?
            .set_override_option("generator.api_key", non_blank_env("LLM_API_KEY"))?
            .set_override_option("generator.model", non_blank_env("LLM_MODEL"))?
            .set_override_option("server.port", non_blank_env("PORT"))?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
