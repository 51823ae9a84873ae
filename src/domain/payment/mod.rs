//! Payment domain module.
//!
//! Order creation inputs, Razorpay signature verification, and webhook
//! decoding and dispatch.
//!
//! # Module Structure
//!
//! - `amount` - Major to minor unit conversion
//! - `errors` - CheckoutError taxonomy
//! - `order` - Order request builder and gateway order types
//! - `signature` - HMAC-SHA256 callback and webhook verification
//! - `webhook_event` - Typed webhook events
//! - `webhook_dispatcher` - Authenticate, decode, route

mod amount;
mod errors;
mod order;
mod signature;
mod webhook_dispatcher;
mod webhook_event;

pub use amount::{normalize_amount, to_minor_units, MinorUnits, MINOR_UNITS_PER_MAJOR};
pub use errors::{CheckoutError, GENERIC_FAILURE_MESSAGE};
pub use order::{
    CreatedOrder, Notes, OrderRequest, OrderRequestBuilder, OrderResult, OrderStatus,
    DEFAULT_CURRENCY,
};
pub use signature::{
    constant_time_eq, hmac_hex, verify_signature, CallbackPayload, CallbackVerifier,
    VerificationFailure, VerificationResult, WebhookVerifier,
};
pub use webhook_dispatcher::{DispatchOutcome, WebhookDispatcher};
pub use webhook_event::{
    parse_webhook, EventContext, ParsedWebhook, Payment, Refund, WebhookEvent, WebhookEventKind,
};

#[cfg(test)]
pub(crate) use webhook_event::fixtures;
