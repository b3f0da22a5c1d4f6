//! Grouping Bot entry point
//!
//! - Registers the `/start` application command
//! - Runs the Discord shards and dispatches recruitment commands/buttons
//! - Exposes health/ready endpoints
//! - Exports Prometheus metrics

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use twilight_http::Client;

use grouping_bot::commands::slash;
use grouping_bot::config::BotConfig;
use grouping_bot::handler::BotContext;
use grouping_bot::health::{self, AppState};
use grouping_bot::metrics::BotMetrics;
use grouping_bot::shard::ShardPool;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first to get log level
    let config = BotConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("grouping_bot={}", config.log_level).parse()?)
                .add_directive("twilight_gateway=info".parse()?)
                .add_directive("twilight_http=warn".parse()?),
        )
        .json()
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        total_shards = config.total_shards,
        prefix = %config.command_prefix,
        "Starting Grouping Bot"
    );

    let metrics = Arc::new(BotMetrics::install()?);
    info!("Prometheus metrics initialized");

    let http = Arc::new(Client::new(config.discord_token.clone()));
    let application_id = http
        .current_user_application()
        .await
        .context("Failed to fetch application")?
        .model()
        .await
        .context("Failed to decode application")?
        .id;
    info!(%application_id, "Resolved application");

    let commands = slash::definitions();
    http.interaction(application_id)
        .set_global_commands(&commands)
        .await
        .context("Failed to register application commands")?;
    info!(count = commands.len(), "Application commands synced");

    let ctx = Arc::new(BotContext {
        http,
        application_id,
        command_prefix: config.command_prefix.clone(),
        recruitment_window: config.recruitment_window,
        metrics: Arc::clone(&metrics),
    });

    let intents = BotConfig::intents();
    info!(?intents, "Using Discord intents");

    let pool = ShardPool::new(
        config.total_shards,
        config.discord_token.clone(),
        intents,
        ctx,
        Arc::clone(&metrics),
    )?;

    let app_state = AppState {
        shard_state: pool.state(),
        metrics: Arc::clone(&metrics),
    };

    let health_router = health::router(app_state);
    let addr: SocketAddr = ([0, 0, 0, 0], config.http_port).into();

    info!(port = config.http_port, "Starting HTTP server");

    let http_server = axum::serve(tokio::net::TcpListener::bind(addr).await?, health_router);

    tokio::select! {
        result = pool.run() => {
            if let Err(e) = result {
                error!(error = %e, "Shard pool error");
            }
        }
        result = http_server => {
            if let Err(e) = result {
                error!(error = %e, "HTTP server error");
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Bot shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
