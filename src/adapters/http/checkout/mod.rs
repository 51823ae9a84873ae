//! HTTP adapter for checkout endpoints.
//!
//! Exposes order creation, callback verification and webhook ingestion
//! under `/api/razorpay`.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateOrderRequest, CreateOrderResponse, ErrorResponse, HealthResponse, VerifyPaymentResponse,
    WebhookResponse, PAYMENT_VERIFIED_MESSAGE,
};
pub use handlers::{
    create_order, handle_webhook, health, verify_payment, CheckoutApiError, CheckoutAppState,
    EVENT_ID_HEADER, SIGNATURE_HEADER,
};
pub use routes::{checkout_router, checkout_routes};
