//! Mock payment event handler for testing.
//!
//! Records every call and can be told to fail, so tests can assert which
//! handler ran, how often, and with which entity.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::payment::{EventContext, Payment, Refund};
use crate::ports::{EventHandlerError, PaymentEventHandler};

/// A recorded handler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerCall {
    PaymentAuthorized {
        event_id: Option<String>,
        payment_id: String,
    },
    PaymentFailed {
        event_id: Option<String>,
        payment_id: String,
    },
    PaymentCaptured {
        event_id: Option<String>,
        payment_id: String,
    },
    RefundCreated {
        event_id: Option<String>,
        refund_id: String,
    },
}

#[derive(Clone, Default)]
pub struct MockPaymentEventHandler {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    calls: Vec<HandlerCall>,
    /// Returned by every call while set.
    error: Option<EventHandlerError>,
}

impl MockPaymentEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every subsequent call with `error`.
    pub fn set_error(&self, error: EventHandlerError) {
        self.lock().error = Some(error);
    }

    pub fn calls(&self) -> Vec<HandlerCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: HandlerCall) -> Result<(), EventHandlerError> {
        let mut state = self.lock();
        state.calls.push(call);
        match &state.error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PaymentEventHandler for MockPaymentEventHandler {
    async fn handle_payment_authorized(
        &self,
        context: &EventContext,
        payment: &Payment,
    ) -> Result<(), EventHandlerError> {
        self.record(HandlerCall::PaymentAuthorized {
            event_id: context.event_id.clone(),
            payment_id: payment.id.clone(),
        })
    }

    async fn handle_payment_failed(
        &self,
        context: &EventContext,
        payment: &Payment,
    ) -> Result<(), EventHandlerError> {
        self.record(HandlerCall::PaymentFailed {
            event_id: context.event_id.clone(),
            payment_id: payment.id.clone(),
        })
    }

    async fn handle_payment_captured(
        &self,
        context: &EventContext,
        payment: &Payment,
    ) -> Result<(), EventHandlerError> {
        self.record(HandlerCall::PaymentCaptured {
            event_id: context.event_id.clone(),
            payment_id: payment.id.clone(),
        })
    }

    async fn handle_refund_created(
        &self,
        context: &EventContext,
        refund: &Refund,
    ) -> Result<(), EventHandlerError> {
        self.record(HandlerCall::RefundCreated {
            event_id: context.event_id.clone(),
            refund_id: refund.id.clone(),
        })
    }
}
