//! Webhook dispatcher - authenticates, decodes and routes webhook deliveries.
//!
//! ## Flow
//!
//! 1. Verify `X-Razorpay-Signature` over the raw body. A failure stops here;
//!    the body is never parsed.
//! 2. Decode the envelope into a [`WebhookEvent`].
//! 3. Route recognised kinds to exactly one [`PaymentEventHandler`] method.
//!    Unknown kinds are acknowledged and logged as unhandled.

use std::sync::Arc;

use tracing::{info, warn};

use super::errors::CheckoutError;
use super::signature::WebhookVerifier;
use super::webhook_event::{parse_webhook, WebhookEvent};
use crate::ports::PaymentEventHandler;

/// Result of a successfully processed delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A handler ran for the event.
    Handled { kind: String, message: String },
    /// Authenticated event with no dedicated handler.
    Unhandled { kind: String },
}

impl DispatchOutcome {
    /// Acknowledgement message returned to the gateway.
    pub fn message(&self) -> String {
        match self {
            DispatchOutcome::Handled { message, .. } => message.clone(),
            DispatchOutcome::Unhandled { kind } => format!("Received unhandled event: {}", kind),
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            DispatchOutcome::Handled { kind, .. } | DispatchOutcome::Unhandled { kind } => kind,
        }
    }
}

/// Authenticates webhook deliveries and routes them to a handler.
pub struct WebhookDispatcher {
    verifier: WebhookVerifier,
    handler: Arc<dyn PaymentEventHandler>,
}

impl WebhookDispatcher {
    pub fn new(verifier: WebhookVerifier, handler: Arc<dyn PaymentEventHandler>) -> Self {
        Self { verifier, handler }
    }

    /// Process one delivery.
    ///
    /// # Errors
    ///
    /// - `SignatureInvalid` - header absent or signature mismatch
    /// - `MalformedPayload` - authenticated body could not be decoded
    /// - `Internal` - the handler failed; the gateway should redeliver
    pub async fn dispatch(
        &self,
        body: &[u8],
        signature: Option<&str>,
        event_id: Option<&str>,
    ) -> Result<DispatchOutcome, CheckoutError> {
        if let Err(failure) = self.verifier.verify_webhook(body, signature) {
            warn!(reason = %failure, event_id = ?event_id, "Rejected webhook delivery");
            return Err(CheckoutError::SignatureInvalid);
        }

        let mut parsed = parse_webhook(body).inspect_err(|e| {
            warn!(error = %e, event_id = ?event_id, "Malformed webhook payload");
        })?;
        parsed.context.event_id = event_id.map(str::to_string);

        let context = &parsed.context;
        let kind = parsed.event.kind().to_string();

        let (result, message) = match &parsed.event {
            WebhookEvent::PaymentAuthorized(payment) => (
                self.handler.handle_payment_authorized(context, payment).await,
                "Payment authorized successfully",
            ),
            WebhookEvent::PaymentFailed(payment) => (
                self.handler.handle_payment_failed(context, payment).await,
                "Payment failure recorded",
            ),
            WebhookEvent::PaymentCaptured(payment) => (
                self.handler.handle_payment_captured(context, payment).await,
                "Payment captured successfully",
            ),
            WebhookEvent::RefundCreated(refund) => (
                self.handler.handle_refund_created(context, refund).await,
                "Refund created successfully",
            ),
            WebhookEvent::Unrecognized { .. } => {
                info!(kind = %kind, event_id = ?context.event_id, "Unhandled webhook event");
                return Ok(DispatchOutcome::Unhandled { kind });
            }
        };

        result.map_err(|e| {
            warn!(kind = %kind, event_id = ?context.event_id, error = %e, "Webhook handler failed");
            CheckoutError::Internal(format!("{} handler failed: {}", kind, e))
        })?;

        Ok(DispatchOutcome::Handled {
            kind,
            message: message.to_string(),
        })
    }
}
