use std::io::{stdout, IsTerminal};
use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use subscription_webhooks::adapters::{
    app_router, HttpSubscriptionUpdater, InMemorySubscriptionStore, StripeSignatureVerifier,
    WebhookAppState,
};
use subscription_webhooks::config::AppConfig;
use subscription_webhooks::ports::SubscriptionUpdater;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    setup_logging(&config);

    let subscription_updater: Arc<dyn SubscriptionUpdater> =
        match &config.subscriptions.updater_url {
            Some(url) => {
                info!(updater_url = %url, "Forwarding subscription updates over HTTP");
                Arc::new(HttpSubscriptionUpdater::new(url.clone()))
            }
            None => {
                warn!("No updater URL configured, using in-memory subscription store");
                Arc::new(InMemorySubscriptionStore::new())
            }
        };

    let state = WebhookAppState::new(
        Arc::new(StripeSignatureVerifier::with_tolerance(
            config.payment.signature_tolerance_secs,
        )),
        subscription_updater,
        config.payment.webhook_secret(),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "Listening");

    axum::serve(listener, app_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn setup_logging(config: &AppConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() || !stdout().is_terminal() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
