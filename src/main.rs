//! Razorpay Checkout server binary.
//!
//! Loads configuration from the environment, wires the Razorpay gateway and
//! the webhook dispatcher, and serves the checkout API until SIGINT/SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use secrecy::SecretString;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use razorpay_checkout::adapters::http::{app_router, CheckoutAppState};
use razorpay_checkout::adapters::{
    LoggingEventHandler, RazorpayConfig, RazorpayOrderGateway, SystemReceiptClock,
};
use razorpay_checkout::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config);

    config.validate().context("invalid configuration")?;

    info!(
        environment = ?config.server.environment,
        key_id = %config.gateway.masked_key_id(),
        test_mode = config.gateway.is_test_mode(),
        api_base_url = %config.gateway.api_base_url,
        "Starting razorpay-checkout"
    );

    let gateway = RazorpayOrderGateway::new(RazorpayConfig::from(&config.gateway))
        .context("failed to build Razorpay client")?;

    let state = CheckoutAppState::new(
        Arc::new(gateway),
        Arc::new(SystemReceiptClock),
        Arc::new(LoggingEventHandler::new()),
        SecretString::new(config.gateway.key_secret.clone()),
        SecretString::new(config.gateway.webhook_secret.clone()),
    );

    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr().context("invalid server host/port")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(address = %addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("razorpay-checkout stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("received shutdown signal");
}
