//! HTTP DTOs (Data Transfer Objects) for checkout endpoints.
//!
//! These types define the JSON request/response structure for the checkout API.
//! They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::payment::{CreatedOrder, MinorUnits, VerificationResult};

/// Message returned for a verified callback.
pub const PAYMENT_VERIFIED_MESSAGE: &str = "Payment verified successfully";

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create an order.
///
/// `amount` is in major units and may be a number or a numeric string.
/// `currency` and `receipt` accept any JSON value; non-strings count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub currency: Option<Value>,
    #[serde(default)]
    pub receipt: Option<Value>,
    #[serde(default)]
    pub notes: Option<Value>,
}

impl CreateOrderRequest {
    pub fn currency(&self) -> Option<String> {
        self.currency.as_ref().and_then(Value::as_str).map(str::to_string)
    }

    pub fn receipt(&self) -> Option<String> {
        self.receipt.as_ref().and_then(Value::as_str).map(str::to_string)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Order details handed to the checkout widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub id: String,
    /// Minor units.
    pub amount: MinorUnits,
    pub currency: String,
    /// Public key id for the widget.
    pub key: String,
    pub receipt: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub notes: Value,
}

impl From<CreatedOrder> for CreateOrderResponse {
    fn from(created: CreatedOrder) -> Self {
        let order = created.order;
        Self {
            id: order.id,
            amount: order.amount,
            currency: order.currency,
            key: created.key_id,
            receipt: order.receipt,
            status: order.status.to_string(),
            created_at: order.created_at,
            notes: order.notes,
        }
    }
}

/// Callback verification result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub order_id: String,
    pub payment_id: String,
}

impl VerifyPaymentResponse {
    pub fn invalid(error: impl Into<String>, order_id: String, payment_id: String) -> Self {
        Self {
            valid: false,
            message: None,
            error: Some(error.into()),
            order_id,
            payment_id,
        }
    }
}

impl From<VerificationResult> for VerifyPaymentResponse {
    fn from(result: VerificationResult) -> Self {
        if result.valid {
            Self {
                valid: true,
                message: Some(PAYMENT_VERIFIED_MESSAGE.to_string()),
                error: None,
                order_id: result.order_id,
                payment_id: result.payment_id,
            }
        } else {
            let error = result
                .error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "Invalid payment signature".to_string());
            Self::invalid(error, result.order_id, result.payment_id)
        }
    }
}

/// Webhook acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub success: bool,
    pub message: String,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
