//! Checkout error taxonomy.
//!
//! Every operation in the payment core fails with a [`CheckoutError`]. Each
//! variant maps onto an HTTP status code and carries retryability semantics
//! so the HTTP adapter and callers can react without inspecting messages.

use axum::http::StatusCode;
use thiserror::Error;

/// Message returned to clients for failures whose detail must stay server-side.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Something went wrong. Please try again or contact support.";

/// Errors produced by order creation, verification and webhook ingestion.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Amount was missing, non-numeric, not positive, or out of range.
    #[error("Please provide a valid amount greater than 0")]
    InvalidAmount,

    /// Request could not be understood (client-correctable).
    #[error("{0}")]
    InvalidInput(String),

    /// Gateway answered with a non-success status.
    #[error("{message}")]
    GatewayRejected { status_code: u16, message: String },

    /// Gateway could not be reached, timed out, or answered with garbage.
    #[error("Payment gateway unreachable: {0}")]
    GatewayUnreachable(String),

    /// Webhook signature missing or not matching.
    #[error("Invalid signature. Webhook not from Razorpay or secret mismatch.")]
    SignatureInvalid,

    /// Authenticated webhook body could not be decoded.
    #[error("Malformed webhook payload: {0}")]
    MalformedPayload(String),

    /// Unexpected failure. Detail is logged, never returned.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CheckoutError {
    /// Returns true if the caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CheckoutError::GatewayUnreachable(_))
    }

    /// Maps the error to an appropriate HTTP status code.
    ///
    /// Gateway rejections mirror the upstream status when it is an error
    /// status and fall back to 502 otherwise.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckoutError::InvalidAmount
            | CheckoutError::InvalidInput(_)
            | CheckoutError::MalformedPayload(_) => StatusCode::BAD_REQUEST,

            CheckoutError::GatewayRejected { status_code, .. } => {
                StatusCode::from_u16(*status_code)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY)
            }

            CheckoutError::GatewayUnreachable(_) => StatusCode::BAD_GATEWAY,

            CheckoutError::SignatureInvalid => StatusCode::UNAUTHORIZED,

            CheckoutError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the caller.
    pub fn public_message(&self) -> String {
        match self {
            CheckoutError::GatewayUnreachable(_) => {
                "Payment gateway is unreachable. Please try again.".to_string()
            }
            CheckoutError::MalformedPayload(_) => "Malformed webhook payload".to_string(),
            CheckoutError::Internal(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Display Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn invalid_amount_displays_user_message() {
        assert_eq!(
            CheckoutError::InvalidAmount.to_string(),
            "Please provide a valid amount greater than 0"
        );
    }

    #[test]
    fn gateway_rejected_displays_upstream_message() {
        let err = CheckoutError::GatewayRejected {
            status_code: 401,
            message: "Authentication failed".to_string(),
        };
        assert_eq!(err.to_string(), "Authentication failed");
    }

    #[test]
    fn internal_error_hides_detail_publicly() {
        let err = CheckoutError::Internal("db password is hunter2".to_string());
        assert_eq!(err.public_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn unreachable_hides_transport_detail_publicly() {
        let err = CheckoutError::GatewayUnreachable("dns error: api.razorpay.com".to_string());
        assert!(!err.public_message().contains("dns"));
    }

    #[test]
    fn malformed_payload_hides_parser_detail_publicly() {
        let err = CheckoutError::MalformedPayload("expected value at line 1".to_string());
        assert_eq!(err.public_message(), "Malformed webhook payload");
    }

    // ══════════════════════════════════════════════════════════════
    // Retryability Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn only_unreachable_is_retryable() {
        assert!(CheckoutError::GatewayUnreachable("timeout".to_string()).is_retryable());

        assert!(!CheckoutError::InvalidAmount.is_retryable());
        assert!(!CheckoutError::SignatureInvalid.is_retryable());
        assert!(!CheckoutError::MalformedPayload("x".to_string()).is_retryable());
        assert!(!CheckoutError::Internal("x".to_string()).is_retryable());
        assert!(!CheckoutError::GatewayRejected {
            status_code: 400,
            message: "bad".to_string()
        }
        .is_retryable());
    }

    // ══════════════════════════════════════════════════════════════
    // Status Code Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn client_errors_return_bad_request() {
        assert_eq!(CheckoutError::InvalidAmount.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            CheckoutError::InvalidInput("body".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CheckoutError::MalformedPayload("json".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn signature_invalid_returns_unauthorized() {
        assert_eq!(
            CheckoutError::SignatureInvalid.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn gateway_rejected_mirrors_upstream_status() {
        let err = CheckoutError::GatewayRejected {
            status_code: 401,
            message: "Authentication failed".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn gateway_rejected_with_non_error_status_returns_bad_gateway() {
        let err = CheckoutError::GatewayRejected {
            status_code: 302,
            message: "redirect".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn unreachable_returns_bad_gateway() {
        assert_eq!(
            CheckoutError::GatewayUnreachable("timeout".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn internal_returns_internal_server_error() {
        assert_eq!(
            CheckoutError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
