//! Mock order gateway for testing.
//!
//! Provides a configurable implementation of `OrderGateway` for unit and
//! integration tests. Supports:
//! - Pre-configured orders
//! - Error injection
//! - Call tracking

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::payment::{CheckoutError, CreatedOrder, OrderRequest, OrderResult, OrderStatus};
use crate::ports::OrderGateway;

/// Mock order gateway for testing.
///
/// By default every request succeeds with an order echoing the request's
/// amount, currency and receipt.
///
/// # Example
///
/// ```ignore
/// let gateway = MockOrderGateway::new("rzp_test_mock");
/// gateway.set_error(CheckoutError::GatewayUnreachable("down".into()));
///
/// let result = gateway.create_order(&request).await;
/// assert_eq!(gateway.requests().len(), 1);
/// ```
#[derive(Clone)]
pub struct MockOrderGateway {
    key_id: String,
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Order to return on the next call instead of the echo.
    next_order: Option<OrderResult>,

    /// Error to return on the next call.
    next_error: Option<CheckoutError>,

    /// Requests received, in order.
    requests: Vec<OrderRequest>,
}

impl MockOrderGateway {
    pub fn new(key_id: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            inner: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Return this order on the next call.
    pub fn set_order(&self, order: OrderResult) {
        self.lock().next_order = Some(order);
    }

    /// Fail the next call with this error.
    pub fn set_error(&self, error: CheckoutError) {
        self.lock().next_error = Some(error);
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<OrderRequest> {
        self.lock().requests.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // Poisoning only happens if a test panicked mid-call.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn echo(request: &OrderRequest, sequence: usize) -> OrderResult {
        OrderResult {
            id: format!("order_mock{:06}", sequence),
            amount: request.amount,
            currency: request.currency.clone(),
            receipt: Some(request.receipt.clone()),
            status: OrderStatus::Created,
            created_at: chrono::Utc::now().timestamp(),
            notes: request
                .notes
                .clone()
                .map(Value::Object)
                .unwrap_or_else(|| Value::Array(Vec::new())),
            amount_paid: Some(0),
            amount_due: Some(request.amount.value()),
            attempts: Some(0),
        }
    }
}

#[async_trait]
impl OrderGateway for MockOrderGateway {
    async fn create_order(&self, request: &OrderRequest) -> Result<CreatedOrder, CheckoutError> {
        let mut state = self.lock();
        state.requests.push(request.clone());

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        let order = match state.next_order.take() {
            Some(order) => order,
            None => Self::echo(request, state.requests.len()),
        };

        Ok(CreatedOrder {
            order,
            key_id: self.key_id.clone(),
        })
    }
}
