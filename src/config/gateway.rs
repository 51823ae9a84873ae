//! Payment gateway configuration

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;

/// Payment gateway configuration (Razorpay)
///
/// Holds the API key pair used for order creation and the separate webhook
/// signing secret. `Debug` output never contains either secret.
#[derive(Clone, Deserialize)]
pub struct GatewayConfig {
    /// Razorpay key id (`rzp_test_...` or `rzp_live_...`), safe to share with the widget
    #[serde(default)]
    pub key_id: String,

    /// Razorpay key secret, signs payment callbacks
    #[serde(default)]
    pub key_secret: String,

    /// Webhook signing secret configured in the Razorpay dashboard
    #[serde(default)]
    pub webhook_secret: String,

    /// Base URL for the Razorpay REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Timeout for outbound gateway calls, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl GatewayConfig {
    /// Check if using Razorpay test mode
    pub fn is_test_mode(&self) -> bool {
        self.key_id.starts_with("rzp_test_")
    }

    /// Outbound request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Key id reduced to its first four characters, for logs
    pub fn masked_key_id(&self) -> String {
        mask(&self.key_id)
    }

    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key_id.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__KEY_ID"));
        }
        if self.key_secret.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__KEY_SECRET"));
        }
        if self.webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__WEBHOOK_SECRET"));
        }

        if !self.key_id.starts_with("rzp_") {
            return Err(ValidationError::InvalidKeyId);
        }
        if self.webhook_secret == self.key_secret {
            return Err(ValidationError::WebhookSecretReusesKeySecret);
        }
        if !(self.api_base_url.starts_with("https://") || self.api_base_url.starts_with("http://"))
        {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidGatewayTimeout);
        }

        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            key_id: String::new(),
            key_secret: String::new(),
            webhook_secret: String::new(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("key_id", &self.masked_key_id())
            .field("key_secret", &"[REDACTED]")
            .field("webhook_secret", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn mask(value: &str) -> String {
    if value.is_empty() {
        return "<unset>".to_string();
    }
    let prefix: String = value.chars().take(4).collect();
    format!("{}...", prefix)
}

fn default_api_base_url() -> String {
    "https://api.razorpay.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}
