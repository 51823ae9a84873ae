//! HTTP handlers for checkout endpoints.
//!
//! These handlers connect Axum routes to application layer command handlers.
//! Request bodies are taken as raw bytes: the webhook signature covers the
//! exact bytes received, and the JSON endpoints answer undecodable bodies
//! with the same error shape as every other failure.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use secrecy::SecretString;

use crate::application::handlers::checkout::{
    CreateOrderCommand, CreateOrderHandler, HandleWebhookCommand, HandleWebhookHandler,
    VerifyPaymentCommand, VerifyPaymentHandler,
};
use crate::domain::payment::{
    CallbackPayload, CallbackVerifier, CheckoutError, WebhookDispatcher, WebhookVerifier,
};
use crate::ports::{OrderGateway, PaymentEventHandler, ReceiptClock};

use super::dto::{
    CreateOrderRequest, CreateOrderResponse, ErrorResponse, HealthResponse, VerifyPaymentResponse,
    WebhookResponse,
};

/// Header carrying the webhook HMAC.
pub const SIGNATURE_HEADER: &str = "x-razorpay-signature";

/// Header carrying the webhook delivery's event id.
pub const EVENT_ID_HEADER: &str = "x-razorpay-event-id";

const INVALID_BODY_MESSAGE: &str = "Invalid request body";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct CheckoutAppState {
    pub order_gateway: Arc<dyn OrderGateway>,
    pub receipt_clock: Arc<dyn ReceiptClock>,
    pub callback_verifier: Arc<CallbackVerifier>,
    pub webhook_dispatcher: Arc<WebhookDispatcher>,
}

impl CheckoutAppState {
    /// Wire the state from its ports and secrets.
    ///
    /// The key secret signs checkout callbacks; the webhook secret signs
    /// webhook deliveries.
    pub fn new(
        order_gateway: Arc<dyn OrderGateway>,
        receipt_clock: Arc<dyn ReceiptClock>,
        event_handler: Arc<dyn PaymentEventHandler>,
        key_secret: SecretString,
        webhook_secret: SecretString,
    ) -> Self {
        let dispatcher = WebhookDispatcher::new(WebhookVerifier::new(webhook_secret), event_handler);
        Self {
            order_gateway,
            receipt_clock,
            callback_verifier: Arc::new(CallbackVerifier::new(key_secret)),
            webhook_dispatcher: Arc::new(dispatcher),
        }
    }

    /// Create handlers on demand from the shared state.
    pub fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(self.order_gateway.clone(), self.receipt_clock.clone())
    }

    pub fn verify_payment_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(self.callback_verifier.clone())
    }

    pub fn webhook_handler(&self) -> HandleWebhookHandler {
        HandleWebhookHandler::new(self.webhook_dispatcher.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/razorpay - Create an order
pub async fn create_order(
    State(state): State<CheckoutAppState>,
    body: Bytes,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let request: CreateOrderRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected create-order body");
        CheckoutError::InvalidInput(INVALID_BODY_MESSAGE.to_string())
    })?;

    let cmd = CreateOrderCommand {
        currency: request.currency(),
        receipt: request.receipt(),
        amount: request.amount,
        notes: request.notes,
    };

    let created = state.create_order_handler().handle(cmd).await?;

    Ok((StatusCode::OK, Json(CreateOrderResponse::from(created))))
}

/// POST /api/razorpay/verify - Verify a checkout callback
pub async fn verify_payment(
    State(state): State<CheckoutAppState>,
    body: Bytes,
) -> impl IntoResponse {
    let payload: CallbackPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected verify body");
            let response =
                VerifyPaymentResponse::invalid(INVALID_BODY_MESSAGE, String::new(), String::new());
            return (StatusCode::BAD_REQUEST, Json(response));
        }
    };

    let result = state
        .verify_payment_handler()
        .handle(VerifyPaymentCommand { payload });

    let status = if result.valid {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    (status, Json(VerifyPaymentResponse::from(result)))
}

/// POST /api/razorpay/webhook - Handle Razorpay webhook deliveries
pub async fn handle_webhook(
    State(state): State<CheckoutAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let cmd = HandleWebhookCommand {
        payload: body.to_vec(),
        signature: header_value(&headers, SIGNATURE_HEADER),
        event_id: header_value(&headers, EVENT_ID_HEADER),
    };

    let outcome = state.webhook_handler().handle(cmd).await?;

    Ok(Json(WebhookResponse {
        success: true,
        message: outcome.message(),
    }))
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts checkout errors to HTTP responses.
#[derive(Debug)]
pub struct CheckoutApiError(CheckoutError);

impl From<CheckoutError> for CheckoutApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();

        match &self.0 {
            CheckoutError::Internal(detail) => {
                tracing::error!(error = %detail, "Checkout request failed");
            }
            CheckoutError::GatewayUnreachable(detail) => {
                tracing::warn!(
                    error = %detail,
                    retryable = self.0.is_retryable(),
                    "Payment gateway unreachable"
                );
            }
            other => {
                tracing::debug!(error = %other, status = status.as_u16(), "Checkout request rejected");
            }
        }

        let body = ErrorResponse::new(self.0.public_message());
        (status, Json(body)).into_response()
    }
}
