//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod checkout;

pub use checkout::{
    CreateOrderCommand, CreateOrderHandler, HandleWebhookCommand, HandleWebhookHandler,
    VerifyPaymentCommand, VerifyPaymentHandler,
};
