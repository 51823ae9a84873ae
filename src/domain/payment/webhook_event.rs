//! Razorpay webhook event types.
//!
//! A delivery is an envelope of the form
//! `{"entity":"event","account_id":..,"event":"payment.captured","payload":{"payment":{"entity":{..}}},"created_at":..}`.
//! Only the fields this service routes on are captured.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::CheckoutError;

/// Webhook event kinds with a dedicated handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebhookEventKind {
    PaymentAuthorized,
    PaymentFailed,
    PaymentCaptured,
    RefundCreated,
    /// Any kind without a dedicated handler.
    Unknown,
}

impl WebhookEventKind {
    /// Parse event kind from the envelope's `event` field.
    pub fn from_str(s: &str) -> Self {
        match s {
            "payment.authorized" => Self::PaymentAuthorized,
            "payment.failed" => Self::PaymentFailed,
            "payment.captured" => Self::PaymentCaptured,
            "refund.created" => Self::RefundCreated,
            _ => Self::Unknown,
        }
    }

    /// Convert to the Razorpay event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PaymentAuthorized => "payment.authorized",
            Self::PaymentFailed => "payment.failed",
            Self::PaymentCaptured => "payment.captured",
            Self::RefundCreated => "refund.created",
            Self::Unknown => "unknown",
        }
    }

    /// Payload key holding the entity for this kind.
    fn entity_key(&self) -> Option<&'static str> {
        match self {
            Self::PaymentAuthorized | Self::PaymentFailed | Self::PaymentCaptured => {
                Some("payment")
            }
            Self::RefundCreated => Some("refund"),
            Self::Unknown => None,
        }
    }
}

/// Payment entity carried by `payment.*` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    /// Minor units.
    pub amount: u64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    /// Unix seconds.
    pub created_at: i64,
}

/// Refund entity carried by `refund.*` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    pub id: String,
    pub payment_id: String,
    /// Minor units.
    pub amount: u64,
    #[serde(default)]
    pub currency: Option<String>,
    pub status: String,
    /// Unix seconds.
    pub created_at: i64,
}

/// Authenticated, decoded webhook event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    PaymentAuthorized(Payment),
    PaymentFailed(Payment),
    PaymentCaptured(Payment),
    RefundCreated(Refund),
    Unrecognized { kind: String },
}

impl WebhookEvent {
    /// The dotted event name as delivered.
    pub fn kind(&self) -> &str {
        match self {
            WebhookEvent::PaymentAuthorized(_) => WebhookEventKind::PaymentAuthorized.as_str(),
            WebhookEvent::PaymentFailed(_) => WebhookEventKind::PaymentFailed.as_str(),
            WebhookEvent::PaymentCaptured(_) => WebhookEventKind::PaymentCaptured.as_str(),
            WebhookEvent::RefundCreated(_) => WebhookEventKind::RefundCreated.as_str(),
            WebhookEvent::Unrecognized { kind } => kind,
        }
    }
}

/// Delivery metadata handed to every handler.
///
/// `event_id` is the `X-Razorpay-Event-Id` header. Razorpay may deliver the
/// same event more than once; handlers key idempotency on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventContext {
    pub event_id: Option<String>,
    pub account_id: Option<String>,
    /// Unix seconds.
    pub created_at: Option<i64>,
}

/// Decoded webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedWebhook {
    pub event: WebhookEvent,
    pub context: EventContext,
}

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    account_id: Option<String>,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    payload: Value,
}

/// Decodes an already authenticated webhook body.
///
/// Unknown kinds decode to [`WebhookEvent::Unrecognized`] without looking at
/// the payload. A known kind whose entity is missing or ill-typed is
/// [`CheckoutError::MalformedPayload`].
pub fn parse_webhook(body: &[u8]) -> Result<ParsedWebhook, CheckoutError> {
    let envelope: Envelope =
        serde_json::from_slice(body).map_err(|e| CheckoutError::MalformedPayload(e.to_string()))?;

    let context = EventContext {
        event_id: None,
        account_id: envelope.account_id,
        created_at: envelope.created_at,
    };

    let kind = WebhookEventKind::from_str(&envelope.event);
    let event = match kind {
        WebhookEventKind::PaymentAuthorized => {
            WebhookEvent::PaymentAuthorized(entity(&envelope.payload, kind)?)
        }
        WebhookEventKind::PaymentFailed => {
            WebhookEvent::PaymentFailed(entity(&envelope.payload, kind)?)
        }
        WebhookEventKind::PaymentCaptured => {
            WebhookEvent::PaymentCaptured(entity(&envelope.payload, kind)?)
        }
        WebhookEventKind::RefundCreated => {
            WebhookEvent::RefundCreated(entity(&envelope.payload, kind)?)
        }
        WebhookEventKind::Unknown => WebhookEvent::Unrecognized {
            kind: envelope.event,
        },
    };

    Ok(ParsedWebhook { event, context })
}

fn entity<T: serde::de::DeserializeOwned>(
    payload: &Value,
    kind: WebhookEventKind,
) -> Result<T, CheckoutError> {
    let key = kind.entity_key().ok_or_else(|| {
        CheckoutError::Internal(format!("no entity for {}", kind.as_str()))
    })?;

    let raw = payload
        .get(key)
        .and_then(|wrapper| wrapper.get("entity"))
        .ok_or_else(|| {
            CheckoutError::MalformedPayload(format!(
                "{} event without {} entity",
                kind.as_str(),
                key
            ))
        })?;

    T::deserialize(raw).map_err(|e| {
        CheckoutError::MalformedPayload(format!("invalid {} entity: {}", key, e))
    })
}
