//! Logging event handler.
//!
//! Default `PaymentEventHandler`: records each authenticated event through
//! `tracing` and performs no persistence. Trivially idempotent.

use async_trait::async_trait;
use tracing::info;

use crate::domain::payment::{EventContext, Payment, Refund};
use crate::ports::{EventHandlerError, PaymentEventHandler};

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEventHandler;

impl LoggingEventHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentEventHandler for LoggingEventHandler {
    async fn handle_payment_authorized(
        &self,
        context: &EventContext,
        payment: &Payment,
    ) -> Result<(), EventHandlerError> {
        info!(
            event_id = ?context.event_id,
            payment_id = %payment.id,
            order_id = ?payment.order_id,
            amount = payment.amount,
            currency = %payment.currency,
            "Payment authorized"
        );
        Ok(())
    }

    async fn handle_payment_failed(
        &self,
        context: &EventContext,
        payment: &Payment,
    ) -> Result<(), EventHandlerError> {
        info!(
            event_id = ?context.event_id,
            payment_id = %payment.id,
            order_id = ?payment.order_id,
            error_code = ?payment.error_code,
            error_description = ?payment.error_description,
            "Payment failed"
        );
        Ok(())
    }

    async fn handle_payment_captured(
        &self,
        context: &EventContext,
        payment: &Payment,
    ) -> Result<(), EventHandlerError> {
        info!(
            event_id = ?context.event_id,
            payment_id = %payment.id,
            order_id = ?payment.order_id,
            amount = payment.amount,
            method = ?payment.method,
            "Payment captured"
        );
        Ok(())
    }

    async fn handle_refund_created(
        &self,
        context: &EventContext,
        refund: &Refund,
    ) -> Result<(), EventHandlerError> {
        info!(
            event_id = ?context.event_id,
            refund_id = %refund.id,
            payment_id = %refund.payment_id,
            amount = refund.amount,
            "Refund created"
        );
        Ok(())
    }
}
