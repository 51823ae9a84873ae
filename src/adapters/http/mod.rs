//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the full service: checkout routes under `/api`,
//! a health probe, and the tower-http middleware stack. Requests that exceed
//! the server timeout get a 408 in the usual `{success:false, error}` shape.

pub mod checkout;

use std::time::Duration;

use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use checkout::{checkout_router, CheckoutAppState};

use checkout::ErrorResponse;

const REQUEST_TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";

/// Build the application router.
///
/// Layers, outermost first: tracing, request timeout, and CORS when
/// `server.cors_origins` lists any origin.
pub fn app_router(state: CheckoutAppState, server: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(checkout::health))
        .nest("/api", checkout_router())
        .with_state(state);

    if let Some(cors) = cors_layer(&server.cors_origins_list()) {
        router = router.layer(cors);
    }

    with_timeout(router, Duration::from_secs(server.request_timeout_secs))
        .layer(TraceLayer::new_for_http())
}

fn with_timeout(router: Router, timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::new(timeout))
        .layer(middleware::map_response(timeout_error_body))
}

/// Gives the empty 408 produced by `TimeoutLayer` a JSON error body.
///
/// Responses that already carry a content type (a mirrored gateway 408)
/// pass through untouched.
async fn timeout_error_body(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT
        || response.headers().contains_key(header::CONTENT_TYPE)
    {
        return response;
    }

    tracing::warn!("Request exceeded server timeout");
    (
        StatusCode::REQUEST_TIMEOUT,
        Json(ErrorResponse::new(REQUEST_TIMEOUT_MESSAGE)),
    )
        .into_response()
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::SystemReceiptClock;
    use crate::adapters::events::LoggingEventHandler;
    use crate::adapters::razorpay::MockOrderGateway;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use secrecy::SecretString;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> CheckoutAppState {
        CheckoutAppState::new(
            Arc::new(MockOrderGateway::new("rzp_test_public")),
            Arc::new(SystemReceiptClock),
            Arc::new(LoggingEventHandler::new()),
            SecretString::new("key_secret".to_string()),
            SecretString::new("webhook_secret".to_string()),
        )
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let app = app_router(state(), &ServerConfig::default());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let app = app_router(state(), &ServerConfig::default());

        let response = app
            .oneshot(Request::builder().uri("/api/unknown").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_headers_are_sent_for_listed_origin() {
        let server = ServerConfig {
            cors_origins: Some("http://localhost:3000".to_string()),
            ..Default::default()
        };
        let app = app_router(state(), &server);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn slow_request_times_out_with_json_error() {
        let slow = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let app = with_timeout(slow, Duration::from_millis(20));

        let response = app
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": REQUEST_TIMEOUT_MESSAGE})
        );
    }

    #[tokio::test]
    async fn mirrored_gateway_timeout_keeps_its_message() {
        let mirrored = Router::new().route(
            "/mirrored",
            get(|| async {
                (
                    StatusCode::REQUEST_TIMEOUT,
                    Json(ErrorResponse::new("Gateway request timeout")),
                )
            }),
        );
        let app = with_timeout(mirrored, Duration::from_secs(5));

        let response = app
            .oneshot(Request::builder().uri("/mirrored").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Gateway request timeout");
    }

    #[test]
    fn cors_layer_absent_without_origins() {
        assert!(cors_layer(&[]).is_none());
        assert!(cors_layer(&["http://localhost:5173".to_string()]).is_some());
    }
}
