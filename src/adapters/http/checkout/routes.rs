//! Axum router configuration for checkout endpoints.

use axum::{routing::post, Router};

use super::handlers::{create_order, handle_webhook, verify_payment, CheckoutAppState};

/// Create the checkout API router.
///
/// # Routes
///
/// - `POST /` - Create an order
/// - `POST /verify` - Verify a checkout callback
/// - `POST /webhook` - Handle Razorpay webhooks (no auth, signature verified)
pub fn checkout_routes() -> Router<CheckoutAppState> {
    Router::new()
        .route("/", post(create_order))
        .route("/verify", post(verify_payment))
        .route("/webhook", post(handle_webhook))
}

/// Create the checkout module router, suitable for mounting at `/api`.
///
/// # Example
///
/// ```ignore
/// let app = Router::new()
///     .nest("/api", checkout_router())
///     .with_state(app_state);
/// ```
pub fn checkout_router() -> Router<CheckoutAppState> {
    Router::new().nest("/razorpay", checkout_routes())
}
