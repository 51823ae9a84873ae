//! Razorpay signature verification.
//!
//! Two modes share one primitive, [`hmac_hex`]:
//!
//! - **Callback**: the checkout widget hands the browser an order id, a
//!   payment id and a signature over `order_id|payment_id`, keyed with the API
//!   key secret.
//! - **Webhook**: Razorpay signs the raw request body with the webhook secret
//!   and sends the digest in `X-Razorpay-Signature`. Verification runs on the
//!   exact bytes received, before any JSON parsing.
//!
//! Both modes compare digests in constant time. Neither mode panics or
//! reports the computed digest.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Why a signature check failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationFailure {
    #[error("Missing required payment verification fields")]
    MissingFields,

    #[error("Invalid payment signature. Please check your API keys and data.")]
    SignatureMismatch,

    #[error("Missing webhook signature header")]
    MissingSignatureHeader,

    #[error("Signature verification failed")]
    VerificationError,
}

/// Computes `lowercase-hex(HMAC-SHA256(secret, message))`.
pub fn hmac_hex(secret: &[u8], message: &[u8]) -> Result<String, VerificationFailure> {
    let mut mac =
        HmacSha256::new_from_slice(secret).map_err(|_| VerificationFailure::VerificationError)?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Returns whether `candidate` is the signature of `message` under `secret`.
///
/// Pure function of its inputs. The candidate is compared as given, so an
/// uppercase hex digest does not match.
pub fn verify_signature(
    secret: &[u8],
    message: &[u8],
    candidate: &str,
) -> Result<bool, VerificationFailure> {
    let expected = hmac_hex(secret, message)?;
    Ok(constant_time_eq(expected.as_bytes(), candidate.as_bytes()))
}

/// Constant-time byte comparison. Length is not secret.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Callback triple posted by the browser after checkout completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackPayload {
    #[serde(rename = "razorpay_order_id", default)]
    pub order_id: String,
    #[serde(rename = "razorpay_payment_id", default)]
    pub payment_id: String,
    #[serde(rename = "razorpay_signature", default)]
    pub signature: String,
}

impl CallbackPayload {
    pub fn new(
        order_id: impl Into<String>,
        payment_id: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            payment_id: payment_id.into(),
            signature: signature.into(),
        }
    }

    /// The signed message, `order_id|payment_id`.
    pub fn signed_message(&self) -> String {
        format!("{}|{}", self.order_id, self.payment_id)
    }
}

/// Outcome of a callback check. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub valid: bool,
    pub order_id: String,
    pub payment_id: String,
    pub error: Option<VerificationFailure>,
}

impl VerificationResult {
    fn valid(payload: &CallbackPayload) -> Self {
        Self {
            valid: true,
            order_id: payload.order_id.clone(),
            payment_id: payload.payment_id.clone(),
            error: None,
        }
    }

    fn invalid(payload: &CallbackPayload, failure: VerificationFailure) -> Self {
        Self {
            valid: false,
            order_id: payload.order_id.clone(),
            payment_id: payload.payment_id.clone(),
            error: Some(failure),
        }
    }
}

/// Verifies checkout callbacks with the API key secret.
pub struct CallbackVerifier {
    key_secret: SecretString,
}

impl CallbackVerifier {
    pub fn new(key_secret: SecretString) -> Self {
        Self { key_secret }
    }

    /// Checks the callback signature.
    ///
    /// Any empty field yields [`VerificationFailure::MissingFields`] without
    /// hashing.
    pub fn verify_callback(&self, payload: &CallbackPayload) -> VerificationResult {
        if payload.order_id.is_empty() || payload.payment_id.is_empty() || payload.signature.is_empty()
        {
            return VerificationResult::invalid(payload, VerificationFailure::MissingFields);
        }

        match verify_signature(
            self.key_secret.expose_secret().as_bytes(),
            payload.signed_message().as_bytes(),
            &payload.signature,
        ) {
            Ok(true) => VerificationResult::valid(payload),
            Ok(false) => VerificationResult::invalid(payload, VerificationFailure::SignatureMismatch),
            Err(failure) => VerificationResult::invalid(payload, failure),
        }
    }
}

/// Verifies webhook deliveries with the webhook secret.
pub struct WebhookVerifier {
    webhook_secret: SecretString,
}

impl WebhookVerifier {
    pub fn new(webhook_secret: SecretString) -> Self {
        Self { webhook_secret }
    }

    /// Checks `signature` against the raw `body`.
    ///
    /// An absent or empty header fails immediately without hashing.
    pub fn verify_webhook(
        &self,
        body: &[u8],
        signature: Option<&str>,
    ) -> Result<(), VerificationFailure> {
        let signature = signature
            .filter(|s| !s.is_empty())
            .ok_or(VerificationFailure::MissingSignatureHeader)?;

        if verify_signature(self.webhook_secret.expose_secret().as_bytes(), body, signature)? {
            Ok(())
        } else {
            Err(VerificationFailure::SignatureMismatch)
        }
    }
}
