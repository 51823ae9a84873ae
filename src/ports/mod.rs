//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `OrderGateway` - Order creation against the payment gateway
//! - `PaymentEventHandler` - Side effects of authenticated webhook events
//! - `ReceiptClock` - Time and randomness for default receipts

mod order_gateway;
mod payment_event_handler;
mod receipt_clock;

pub use order_gateway::OrderGateway;
pub use payment_event_handler::{EventHandlerError, PaymentEventHandler};
pub use receipt_clock::ReceiptClock;
