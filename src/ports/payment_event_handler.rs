//! Payment event handler port.
//!
//! One method per webhook kind the dispatcher routes. Implementations own
//! whatever side effect an event implies (persisting payment state, sending
//! receipts). The dispatcher only guarantees each method is called with the
//! correctly typed entity.
//!
//! # Idempotency
//!
//! Razorpay redelivers events it did not see acknowledged, and a handler
//! error makes the webhook endpoint answer 500, which triggers redelivery.
//! Implementations must therefore be safe to invoke more than once for the
//! same [`EventContext::event_id`].

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::payment::{EventContext, Payment, Refund};

/// Failure inside an event handler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct EventHandlerError(pub String);

impl EventHandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Handler for authenticated payment and refund events.
#[async_trait]
pub trait PaymentEventHandler: Send + Sync {
    /// `payment.authorized`
    async fn handle_payment_authorized(
        &self,
        context: &EventContext,
        payment: &Payment,
    ) -> Result<(), EventHandlerError>;

    /// `payment.failed`
    async fn handle_payment_failed(
        &self,
        context: &EventContext,
        payment: &Payment,
    ) -> Result<(), EventHandlerError>;

    /// `payment.captured`
    async fn handle_payment_captured(
        &self,
        context: &EventContext,
        payment: &Payment,
    ) -> Result<(), EventHandlerError>;

    /// `refund.created`
    async fn handle_refund_created(
        &self,
        context: &EventContext,
        refund: &Refund,
    ) -> Result<(), EventHandlerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_event_handler_is_object_safe() {
        fn _accepts_dyn(_handler: &dyn PaymentEventHandler) {}
    }

    #[test]
    fn handler_error_displays_message() {
        assert_eq!(EventHandlerError::new("db down").to_string(), "db down");
    }
}
