//! HandleWebhookHandler - Command handler for Razorpay webhook deliveries.

use std::sync::Arc;

use crate::domain::payment::{CheckoutError, DispatchOutcome, WebhookDispatcher};

/// Command to process one webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// `X-Razorpay-Signature` header, if present.
    pub signature: Option<String>,
    /// `X-Razorpay-Event-Id` header, if present.
    pub event_id: Option<String>,
}

/// Handler for webhook deliveries.
pub struct HandleWebhookHandler {
    dispatcher: Arc<WebhookDispatcher>,
}

impl HandleWebhookHandler {
    pub fn new(dispatcher: Arc<WebhookDispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn handle(&self, cmd: HandleWebhookCommand) -> Result<DispatchOutcome, CheckoutError> {
        let outcome = self
            .dispatcher
            .dispatch(&cmd.payload, cmd.signature.as_deref(), cmd.event_id.as_deref())
            .await?;

        tracing::info!(
            kind = %outcome.kind(),
            event_id = ?cmd.event_id,
            handled = matches!(outcome, DispatchOutcome::Handled { .. }),
            "Webhook processed"
        );

        Ok(outcome)
    }
}
