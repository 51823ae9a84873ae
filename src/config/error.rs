//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid gateway timeout (must be 1-60 seconds)")]
    InvalidGatewayTimeout,

    #[error("Invalid Razorpay key id format")]
    InvalidKeyId,

    #[error("Webhook secret must differ from the API key secret")]
    WebhookSecretReusesKeySecret,

    #[error("Invalid gateway base URL")]
    InvalidBaseUrl,
}
