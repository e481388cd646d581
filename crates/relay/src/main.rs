use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use notifier::TelegramNotifier;
use relay::config::RelayConfig;
use relay::handler::AppState;
use relay::logging::init_logging;
use relay::server::{router, shutdown_signal};
use token_metadata::TokenResolver;

#[derive(Parser, Debug)]
#[command(
    name = "relay",
    about = "Relays job marketplace events from chain webhooks to Telegram"
)]
struct Args {
    /// Address to bind the webhook listener on
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8787")]
    listen: String,

    /// Log filter directives used when RUST_LOG is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "info,relay=debug")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let config = RelayConfig::from_env()?;
    let listen_addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("invalid listen address '{}'", args.listen))?;

    info!("🚀 Starting job event relay");
    info!("   Listening on {listen_addr}");
    info!(
        "   Token metadata via {} RPC endpoint(s), {}s timeout",
        config.rpc_endpoints.len(),
        config.rpc_timeout.as_secs()
    );
    info!("   Notifying Telegram chat {}", config.telegram_chat_id);

    let sink = TelegramNotifier::new(&config.telegram_bot_token, &config.telegram_chat_id)?;
    let resolver = TokenResolver::new(config.rpc_endpoints.clone(), config.rpc_timeout);
    let state = Arc::new(AppState {
        sink: Arc::new(sink),
        resolver,
    });

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Relay stopped");
    Ok(())
}
