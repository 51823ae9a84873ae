//! CreateOrderHandler - Command handler for creating a Razorpay order.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::payment::{normalize_amount, CheckoutError, CreatedOrder, OrderRequestBuilder};
use crate::ports::{OrderGateway, ReceiptClock};

/// Command to create an order from storefront input.
///
/// `amount` is kept as raw JSON so that numbers and numeric strings are both
/// validated by the amount normalizer.
#[derive(Debug, Clone, Default)]
pub struct CreateOrderCommand {
    pub amount: Option<Value>,
    pub currency: Option<String>,
    pub receipt: Option<String>,
    pub notes: Option<Value>,
}

/// Handler for creating orders.
///
/// Validation failures return before the gateway is contacted.
pub struct CreateOrderHandler {
    gateway: Arc<dyn OrderGateway>,
    builder: OrderRequestBuilder,
}

impl CreateOrderHandler {
    pub fn new(gateway: Arc<dyn OrderGateway>, clock: Arc<dyn ReceiptClock>) -> Self {
        Self {
            gateway,
            builder: OrderRequestBuilder::new(clock),
        }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<CreatedOrder, CheckoutError> {
        // 1. Validate and convert the amount
        let amount = normalize_amount(cmd.amount.as_ref())?;

        // 2. Apply defaults
        let request = self.builder.build(
            amount,
            cmd.currency.as_deref(),
            cmd.receipt.as_deref(),
            cmd.notes.as_ref(),
        );

        tracing::debug!(
            amount = request.amount.value(),
            currency = %request.currency,
            receipt = %request.receipt,
            "Creating Razorpay order"
        );

        // 3. Create at the gateway
        self.gateway.create_order(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedReceiptClock;
    use crate::adapters::razorpay::MockOrderGateway;
    use crate::domain::payment::MinorUnits;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn setup() -> (CreateOrderHandler, MockOrderGateway) {
        let gateway = MockOrderGateway::new("rzp_test_public");
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let clock = Arc::new(FixedReceiptClock::new(now, "deadbeef"));
        let handler = CreateOrderHandler::new(Arc::new(gateway.clone()), clock);
        (handler, gateway)
    }

    fn command(amount: Value) -> CreateOrderCommand {
        CreateOrderCommand {
            amount: Some(amount),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn creates_order_with_defaults() {
        let (handler, gateway) = setup();

        let created = handler.handle(command(json!(100))).await.unwrap();

        assert_eq!(created.key_id, "rzp_test_public");
        assert_eq!(created.order.amount, MinorUnits::new(10000));
        assert_eq!(created.order.currency, "INR");

        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].amount, MinorUnits::new(10000));
        assert_eq!(requests[0].currency, "INR");
        assert_eq!(requests[0].receipt, "receipt_1705314600000_deadbeef");
    }

    #[tokio::test]
    async fn passes_explicit_fields_through() {
        let (handler, gateway) = setup();
        let cmd = CreateOrderCommand {
            amount: Some(json!("49.99")),
            currency: Some("USD".to_string()),
            receipt: Some("inv-7".to_string()),
            notes: Some(json!({"plan": "pro"})),
        };

        handler.handle(cmd).await.unwrap();

        let request = &gateway.requests()[0];
        assert_eq!(request.amount, MinorUnits::new(4999));
        assert_eq!(request.currency, "USD");
        assert_eq!(request.receipt, "inv-7");
        assert_eq!(request.notes, json!({"plan": "pro"}).as_object().cloned());
    }

    #[tokio::test]
    async fn zero_amount_never_reaches_gateway() {
        let (handler, gateway) = setup();

        let result = handler.handle(command(json!(0))).await;

        assert_eq!(result, Err(CheckoutError::InvalidAmount));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_amount_never_reaches_gateway() {
        let (handler, gateway) = setup();

        let result = handler.handle(CreateOrderCommand::default()).await;

        assert_eq!(result, Err(CheckoutError::InvalidAmount));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn gateway_error_is_propagated() {
        let (handler, gateway) = setup();
        gateway.set_error(CheckoutError::GatewayRejected {
            status_code: 401,
            message: "Authentication failed".to_string(),
        });

        let result = handler.handle(command(json!(10))).await;

        assert_eq!(
            result,
            Err(CheckoutError::GatewayRejected {
                status_code: 401,
                message: "Authentication failed".to_string(),
            })
        );
    }
}
