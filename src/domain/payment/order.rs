//! Order request and result value objects.
//!
//! [`OrderRequestBuilder`] turns validated storefront input into the payload
//! sent to `POST /v1/orders`. [`OrderResult`] is the gateway's answer.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::amount::MinorUnits;
use crate::ports::ReceiptClock;

/// Currency used when the caller omits one.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Free-form key/value notes attached to an order.
pub type Notes = Map<String, Value>;

/// Payload for the gateway's order creation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Amount in minor units.
    pub amount: MinorUnits,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Merchant-side reference for the order.
    pub receipt: String,
    /// Optional notes, omitted from the wire body when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Notes>,
}

/// Gateway-reported order status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Created,
    Attempted,
    Paid,
    /// Any status this service does not model.
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Attempted => "attempted",
            OrderStatus::Paid => "paid",
            OrderStatus::Other(s) => s,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "created" => OrderStatus::Created,
            "attempted" => OrderStatus::Attempted,
            "paid" => OrderStatus::Paid,
            _ => OrderStatus::Other(s),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order as returned by the gateway.
///
/// `notes` stays a raw JSON value: the gateway sends `[]` rather than `{}`
/// for an order without notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResult {
    pub id: String,
    pub amount: MinorUnits,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    pub status: OrderStatus,
    /// Unix seconds.
    pub created_at: i64,
    #[serde(default)]
    pub notes: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_due: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u32>,
}

/// Successful order creation: the order plus the public key id the checkout
/// widget needs. The key secret is never part of this value.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedOrder {
    pub order: OrderResult,
    pub key_id: String,
}

/// Builds [`OrderRequest`]s, applying currency and receipt defaults.
///
/// Explicit currency and receipt values are used verbatim, so building twice
/// with the same explicit values yields equal requests. An omitted receipt is
/// generated fresh on every call as `receipt_<unix-millis>_<suffix>`.
#[derive(Clone)]
pub struct OrderRequestBuilder {
    clock: Arc<dyn ReceiptClock>,
}

impl OrderRequestBuilder {
    pub fn new(clock: Arc<dyn ReceiptClock>) -> Self {
        Self { clock }
    }

    /// Assembles an order request.
    ///
    /// Blank currency or receipt strings count as absent. Notes are kept only
    /// when `notes` is a JSON object.
    pub fn build(
        &self,
        amount: MinorUnits,
        currency: Option<&str>,
        receipt: Option<&str>,
        notes: Option<&Value>,
    ) -> OrderRequest {
        let currency = non_blank(currency)
            .unwrap_or(DEFAULT_CURRENCY)
            .to_string();

        let receipt = match non_blank(receipt) {
            Some(receipt) => receipt.to_string(),
            None => self.generate_receipt(),
        };

        let notes = notes.and_then(Value::as_object).cloned();

        OrderRequest {
            amount,
            currency,
            receipt,
            notes,
        }
    }

    fn generate_receipt(&self) -> String {
        format!(
            "receipt_{}_{}",
            self.clock.now().timestamp_millis(),
            self.clock.random_suffix()
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
