//! Razorpay order gateway adapter.
//!
//! Implements the `OrderGateway` trait against Razorpay's Orders API.
//!
//! # Behaviour
//!
//! - Basic-Auth with key id and key secret (`secrecy::SecretString`)
//! - One `POST {api_base_url}/v1/orders` per call, bounded by the client timeout
//! - The response body is read and parsed before the status is inspected,
//!   so Razorpay's structured error detail is never dropped
//!
//! # Configuration
//!
//! ```ignore
//! let config = RazorpayConfig::new("rzp_test_xxx", key_secret);
//! let gateway = RazorpayOrderGateway::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::config::GatewayConfig;
use crate::domain::payment::{CheckoutError, CreatedOrder, OrderRequest, OrderResult};
use crate::ports::OrderGateway;

use super::razorpay_types::{extract_error_code, extract_error_message};

const DEFAULT_API_BASE_URL: &str = "https://api.razorpay.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Razorpay API configuration.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Public key id (rzp_test_... or rzp_live_...).
    key_id: String,

    /// Key secret paired with `key_id`.
    key_secret: SecretString,

    /// Base URL for Razorpay API (default: https://api.razorpay.com).
    api_base_url: String,

    /// Outbound request timeout.
    timeout: Duration,
}

impl RazorpayConfig {
    /// Create a new Razorpay configuration.
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: SecretString::new(key_secret.into()),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the outbound request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    fn orders_url(&self) -> String {
        format!("{}/v1/orders", self.api_base_url.trim_end_matches('/'))
    }
}

impl From<&GatewayConfig> for RazorpayConfig {
    fn from(config: &GatewayConfig) -> Self {
        Self::new(config.key_id.clone(), config.key_secret.clone())
            .with_base_url(config.api_base_url.clone())
            .with_timeout(config.timeout())
    }
}

/// Razorpay order gateway.
pub struct RazorpayOrderGateway {
    config: RazorpayConfig,
    http_client: reqwest::Client,
}

impl RazorpayOrderGateway {
    /// Create a new gateway with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the HTTP client cannot be constructed.
    pub fn new(config: RazorpayConfig) -> Result<Self, CheckoutError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CheckoutError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl OrderGateway for RazorpayOrderGateway {
    async fn create_order(&self, request: &OrderRequest) -> Result<CreatedOrder, CheckoutError> {
        let url = self.config.orders_url();

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.expose_secret()))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, timeout = e.is_timeout(), "Razorpay create_order transport failure");
                CheckoutError::GatewayUnreachable(describe_transport_error(&e))
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, status = status.as_u16(), "Failed to read Razorpay response body");
            CheckoutError::GatewayUnreachable(describe_transport_error(&e))
        })?;

        let body: Value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(error = %e, status = status.as_u16(), "Razorpay returned a non-JSON body");
            CheckoutError::GatewayUnreachable(format!("Invalid JSON from gateway: {}", e))
        })?;

        if !status.is_success() {
            let message = extract_error_message(&body);
            tracing::error!(
                status = status.as_u16(),
                code = extract_error_code(&body).unwrap_or("unknown"),
                error = %message,
                "Razorpay create_order failed"
            );
            return Err(CheckoutError::GatewayRejected {
                status_code: status.as_u16(),
                message,
            });
        }

        let order: OrderResult = serde_json::from_value(body).map_err(|e| {
            tracing::warn!(error = %e, "Unexpected Razorpay order body");
            CheckoutError::GatewayUnreachable(format!("Unexpected order body: {}", e))
        })?;

        tracing::info!(
            order_id = %order.id,
            amount = order.amount.value(),
            currency = %order.currency,
            status = %order.status,
            "Razorpay order created"
        );

        Ok(CreatedOrder {
            order,
            key_id: self.config.key_id.clone(),
        })
    }
}

fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.to_string()
    }
}
