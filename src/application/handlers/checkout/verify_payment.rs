//! VerifyPaymentHandler - Command handler for checkout callback verification.

use std::sync::Arc;

use crate::domain::payment::{CallbackPayload, CallbackVerifier, VerificationResult};

/// Command carrying the callback triple from the checkout widget.
#[derive(Debug, Clone)]
pub struct VerifyPaymentCommand {
    pub payload: CallbackPayload,
}

/// Handler for verifying checkout callbacks.
///
/// Never fails: every outcome is a [`VerificationResult`].
pub struct VerifyPaymentHandler {
    verifier: Arc<CallbackVerifier>,
}

impl VerifyPaymentHandler {
    pub fn new(verifier: Arc<CallbackVerifier>) -> Self {
        Self { verifier }
    }

    pub fn handle(&self, cmd: VerifyPaymentCommand) -> VerificationResult {
        let result = self.verifier.verify_callback(&cmd.payload);

        if result.valid {
            tracing::info!(
                order_id = %result.order_id,
                payment_id = %result.payment_id,
                "Payment signature verified"
            );
        } else {
            tracing::warn!(
                order_id = %result.order_id,
                payment_id = %result.payment_id,
                reason = ?result.error,
                "Payment signature rejected"
            );
        }

        result
    }
}
