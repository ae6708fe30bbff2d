//! Guess bot webhook server
//!
//! # Usage
//!
//! ```bash
//! export LINE_CHANNEL_SECRET="..."
//! export LINE_CHANNEL_ACCESS_TOKEN="..."
//!
//! cargo run --bin guess-bot -p guess-bot -- --port 3000
//! ```

use anyhow::Context;
use bot_platform::providers::LinePlatform;
use bot_utils::{LogFormat, init_tracing, load_dotenv};
use clap::Parser;
use guess_bot::{AppState, BotConfig, Dispatcher, GameService, SessionStore, create_router};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::{info, warn};

/// LINE number-guessing bot
#[derive(Parser, Debug)]
#[command(name = "guess-bot")]
#[command(version, about, long_about = None)]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind (overrides HOST)
    #[arg(short, long)]
    bind: Option<IpAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let dotenv = load_dotenv();

    init_tracing("info,guess_bot=debug", LogFormat::from_env());

    if let Some(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    let mut config = BotConfig::from_env().context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }

    let platform = LinePlatform::with_config(config.line_config())
        .context("Failed to create LINE client")?;

    let store = SessionStore::new();
    let service = GameService::new(
        store.clone(),
        Arc::new(platform),
        config.rules.clone(),
        config.restart_delay,
    );
    let app = create_router(AppState::new(
        Dispatcher::new(service),
        config.channel_secret.clone(),
    ));

    let addr = SocketAddr::new(config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        %addr,
        restart_delay_secs = config.restart_delay.as_secs(),
        "Guess bot listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    match store.clear() {
        Ok(count) => info!(sessions = count, "Server stopped"),
        Err(e) => warn!(error = %e, "Failed to clear sessions on shutdown"),
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
