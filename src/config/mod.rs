//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `RAZORPAY_CHECKOUT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use razorpay_checkout::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Gateway key {}", config.gateway.masked_key_id());
//! ```

mod error;
mod gateway;
mod server;

pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Loaded once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Payment gateway configuration (Razorpay)
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `RAZORPAY_CHECKOUT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `RAZORPAY_CHECKOUT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `RAZORPAY_CHECKOUT__GATEWAY__KEY_ID=rzp_test_...` -> `gateway.key_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    /// Missing secrets are reported by [`AppConfig::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RAZORPAY_CHECKOUT")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid. A
    /// missing webhook secret is always an error.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.gateway.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
