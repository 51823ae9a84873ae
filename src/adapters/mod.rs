//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `razorpay` - Razorpay Orders API client
//! - `events` - Payment event handlers
//! - `clock` - Receipt clocks
//! - `http` - Axum REST API

pub mod clock;
pub mod events;
pub mod http;
pub mod razorpay;

pub use clock::{FixedReceiptClock, SystemReceiptClock};
pub use events::{LoggingEventHandler, MockPaymentEventHandler};
pub use razorpay::{MockOrderGateway, RazorpayConfig, RazorpayOrderGateway};
