//! Integration tests for the checkout HTTP service.
//!
//! These tests drive the assembled router end to end:
//! 1. Order creation against a stubbed Razorpay Orders API
//! 2. Checkout callback verification with the key secret
//! 3. Webhook delivery with the webhook secret

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{basic_auth, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use razorpay_checkout::adapters::http::{app_router, CheckoutAppState};
use razorpay_checkout::adapters::{
    FixedReceiptClock, MockPaymentEventHandler, RazorpayConfig, RazorpayOrderGateway,
};
use razorpay_checkout::adapters::events::HandlerCall;
use razorpay_checkout::config::ServerConfig;
use razorpay_checkout::domain::payment::hmac_hex;

// =============================================================================
// Test Infrastructure
// =============================================================================

const KEY_ID: &str = "rzp_test_integration";
const KEY_SECRET: &str = "integration_key_secret";
const WEBHOOK_SECRET: &str = "integration_webhook_secret";
const RECEIPT: &str = "receipt_1705314600000_cafebabe";

struct TestApp {
    router: Router,
    events: MockPaymentEventHandler,
}

fn app_with_gateway_at(base_url: &str) -> TestApp {
    let config = RazorpayConfig::new(KEY_ID, KEY_SECRET).with_base_url(base_url);
    let gateway = RazorpayOrderGateway::new(config).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    let events = MockPaymentEventHandler::new();

    let state = CheckoutAppState::new(
        Arc::new(gateway),
        Arc::new(FixedReceiptClock::new(now, "cafebabe")),
        Arc::new(events.clone()),
        SecretString::new(KEY_SECRET.to_string()),
        SecretString::new(WEBHOOK_SECRET.to_string()),
    );

    TestApp {
        router: app_router(state, &ServerConfig::default()),
        events,
    }
}

fn json_post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn razorpay_order(amount: u64) -> Value {
    json!({
        "id": "order_IntegrationTest1",
        "entity": "order",
        "amount": amount,
        "amount_paid": 0,
        "amount_due": amount,
        "currency": "INR",
        "receipt": RECEIPT,
        "offer_id": null,
        "status": "created",
        "attempts": 0,
        "notes": [],
        "created_at": 1705314601
    })
}

fn captured_delivery() -> Vec<u8> {
    serde_json::to_vec(&json!({
        "entity": "event",
        "account_id": "acc_Integration01",
        "event": "payment.captured",
        "contains": ["payment"],
        "payload": {
            "payment": {
                "entity": {
                    "id": "pay_Integration01",
                    "entity": "payment",
                    "amount": 49999,
                    "currency": "INR",
                    "status": "captured",
                    "order_id": "order_IntegrationTest1",
                    "method": "upi",
                    "created_at": 1705314700
                }
            }
        },
        "created_at": 1705314701
    }))
    .unwrap()
}

fn webhook_post(body: Vec<u8>, signature: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/razorpay/webhook")
        .header("content-type", "application/json")
        .header("x-razorpay-signature", signature)
        .header("x-razorpay-event-id", "evt_integration_1")
        .body(Body::from(body))
        .unwrap()
}

// =============================================================================
// Order Creation
// =============================================================================

#[tokio::test]
async fn create_order_converts_amount_and_forwards_to_razorpay() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .and(basic_auth(KEY_ID, KEY_SECRET))
        .and(body_json(json!({
            "amount": 49999,
            "currency": "INR",
            "receipt": RECEIPT
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(razorpay_order(49999)))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_with_gateway_at(&server.uri());
    let (status, body) = send(app.router, json_post("/api/razorpay", r#"{"amount":"499.99"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "order_IntegrationTest1");
    assert_eq!(body["amount"], 49999);
    assert_eq!(body["currency"], "INR");
    assert_eq!(body["receipt"], RECEIPT);
    assert_eq!(body["key"], KEY_ID);
    assert!(!body.to_string().contains(KEY_SECRET));
}

#[tokio::test]
async fn invalid_amount_never_reaches_razorpay() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(razorpay_order(1)))
        .expect(0)
        .mount(&server)
        .await;

    let app = app_with_gateway_at(&server.uri());
    let (status, body) = send(app.router, json_post("/api/razorpay", r#"{"amount":-5}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"success": false, "error": "Please provide a valid amount greater than 0"})
    );
}

#[tokio::test]
async fn razorpay_rejection_is_mirrored_to_the_caller() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": "BAD_REQUEST_ERROR",
                "description": "Order amount less than minimum amount allowed"
            }
        })))
        .mount(&server)
        .await;

    let app = app_with_gateway_at(&server.uri());
    let (status, body) = send(app.router, json_post("/api/razorpay", r#"{"amount":0.5}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"success": false, "error": "Order amount less than minimum amount allowed"})
    );
}

#[tokio::test]
async fn unreachable_razorpay_is_bad_gateway() {
    let app = app_with_gateway_at("http://127.0.0.1:1");

    let (status, body) = send(app.router, json_post("/api/razorpay", r#"{"amount":10}"#)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Payment gateway is unreachable. Please try again.");
}

// =============================================================================
// Callback Verification
// =============================================================================

#[tokio::test]
async fn callback_signed_with_key_secret_verifies() {
    let app = app_with_gateway_at("http://127.0.0.1:1");
    let signature = hmac_hex(
        KEY_SECRET.as_bytes(),
        b"order_IntegrationTest1|pay_Integration01",
    )
    .unwrap();
    let body = json!({
        "razorpay_order_id": "order_IntegrationTest1",
        "razorpay_payment_id": "pay_Integration01",
        "razorpay_signature": signature
    });

    let (status, body) = send(app.router, json_post("/api/razorpay/verify", body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert_eq!(body["orderId"], "order_IntegrationTest1");
    assert_eq!(body["paymentId"], "pay_Integration01");
}

#[tokio::test]
async fn callback_signed_with_webhook_secret_is_rejected() {
    let app = app_with_gateway_at("http://127.0.0.1:1");
    let signature = hmac_hex(
        WEBHOOK_SECRET.as_bytes(),
        b"order_IntegrationTest1|pay_Integration01",
    )
    .unwrap();
    let body = json!({
        "razorpay_order_id": "order_IntegrationTest1",
        "razorpay_payment_id": "pay_Integration01",
        "razorpay_signature": signature
    });

    let (status, body) = send(app.router, json_post("/api/razorpay/verify", body.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["valid"], false);
}

// =============================================================================
// Webhook Delivery
// =============================================================================

#[tokio::test]
async fn signed_capture_webhook_reaches_handler() {
    let app = app_with_gateway_at("http://127.0.0.1:1");
    let body = captured_delivery();
    let signature = hmac_hex(WEBHOOK_SECRET.as_bytes(), &body).unwrap();

    let (status, json) = send(app.router, webhook_post(body, &signature)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({"success": true, "message": "Payment captured successfully"})
    );
    assert_eq!(
        app.events.calls(),
        vec![HandlerCall::PaymentCaptured {
            event_id: Some("evt_integration_1".to_string()),
            payment_id: "pay_Integration01".to_string(),
        }]
    );
}

#[tokio::test]
async fn tampered_webhook_is_rejected_without_side_effects() {
    let app = app_with_gateway_at("http://127.0.0.1:1");
    let body = captured_delivery();
    let signature = hmac_hex(WEBHOOK_SECRET.as_bytes(), &body).unwrap();
    let mut tampered = body.clone();
    tampered.extend_from_slice(b" ");

    let (status, json) = send(app.router, webhook_post(tampered, &signature)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
    assert_eq!(app.events.call_count(), 0);
}

#[tokio::test]
async fn health_probe_responds() {
    let app = app_with_gateway_at("http://127.0.0.1:1");
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}
