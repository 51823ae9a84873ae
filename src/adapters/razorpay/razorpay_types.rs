//! Razorpay REST API wire types.

use serde_json::Value;

/// Message used when an error body carries no usable detail.
pub const DEFAULT_ORDER_ERROR_MESSAGE: &str = "Failed to create Razorpay order";

/// Extracts a human-readable message from a Razorpay error body.
///
/// Razorpay errors look like
/// `{"error":{"code":"BAD_REQUEST_ERROR","description":"...","source":..,"step":..,"reason":..}}`.
/// `description` wins over `message`; blank strings are skipped.
pub fn extract_error_message(body: &Value) -> String {
    let error = body.get("error");
    ["description", "message"]
        .iter()
        .filter_map(|field| error.and_then(|e| e.get(*field)).and_then(Value::as_str))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .unwrap_or(DEFAULT_ORDER_ERROR_MESSAGE)
        .to_string()
}

/// Machine-readable error code, when present.
pub fn extract_error_code(body: &Value) -> Option<&str> {
    body.get("error")
        .and_then(|e| e.get("code"))
        .and_then(Value::as_str)
}
