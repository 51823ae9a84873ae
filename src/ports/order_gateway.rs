//! Order gateway port.
//!
//! Defines the contract for creating payment orders with an external
//! gateway (Razorpay). One call, no retries: retry policy belongs to the
//! caller, guided by [`CheckoutError::is_retryable`].

use async_trait::async_trait;

use crate::domain::payment::{CheckoutError, CreatedOrder, OrderRequest};

/// Port for order creation against the payment gateway.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Create an order.
    ///
    /// # Errors
    ///
    /// - `GatewayRejected` when the gateway answers with a non-success status
    /// - `GatewayUnreachable` on transport failure, timeout or an unparseable body
    async fn create_order(&self, request: &OrderRequest) -> Result<CreatedOrder, CheckoutError>;
}
