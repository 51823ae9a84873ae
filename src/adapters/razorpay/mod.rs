//! Razorpay order gateway adapter.
//!
//! Implements the `OrderGateway` port against Razorpay's Orders API.
//!
//! # Security
//!
//! - Basic-Auth credentials come from configuration, never from code
//! - The key secret is held as `secrecy::SecretString` and never logged
//! - Only the public key id leaves this adapter
//!
//! # Configuration
//!
//! Required environment variables:
//! - `RAZORPAY_CHECKOUT__GATEWAY__KEY_ID`: Razorpay key id (rzp_...)
//! - `RAZORPAY_CHECKOUT__GATEWAY__KEY_SECRET`: Razorpay key secret

mod mock_order_gateway;
mod razorpay_adapter;
mod razorpay_types;

pub use mock_order_gateway::MockOrderGateway;
pub use razorpay_adapter::{RazorpayConfig, RazorpayOrderGateway};
pub use razorpay_types::{extract_error_code, extract_error_message, DEFAULT_ORDER_ERROR_MESSAGE};
