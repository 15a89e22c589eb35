use anyhow::{Context, Result};
use clap::Parser;
use imagen_service::app::App;
use imagen_service::models::Config;
use imagen_service::server::{self, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "imagen-service")]
#[command(about = "Serve Gemini image generation over HTTP")]
struct CliArgs {
    /// Address to bind (overrides HOST).
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT).
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imagen_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    info!("Starting imagen-service");
    info!(
        "API key: {}",
        if config.api_key_set() { "set" } else { "NOT SET" }
    );

    let state = AppState {
        app: Arc::new(App::from_config(&config)),
        api_key_set: config.api_key_set(),
    };

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use clap::Parser;

    #[test]
    fn test_cli_defaults_to_environment() {
        let args = CliArgs::parse_from(["imagen-service"]);
        assert!(args.host.is_none());
        assert!(args.port.is_none());
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs::parse_from(["imagen-service", "--host", "127.0.0.1", "--port", "9001"]);
        assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(args.port, Some(9001));
    }

    #[test]
    fn test_cli_rejects_bad_port() {
        assert!(CliArgs::try_parse_from(["imagen-service", "--port", "http"]).is_err());
    }
}
