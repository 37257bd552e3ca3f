//! Dashkit server entry point.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dashkit_server::{NetworkConfig, NetworkModule, ServerConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Serve dashboard records, stats, badges, and highlighting over HTTP")]
struct Args {
    /// Address to bind.
    #[arg(long, env = "DASHKIT_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on (0 picks a free port).
    #[arg(long, env = "DASHKIT_PORT", default_value_t = 8080)]
    port: u16,

    /// JSON dataset with `products`, `orders`, `users`, and `dataUsers`.
    #[arg(long, env = "DASHKIT_DATA")]
    data: Option<PathBuf>,

    /// File the color-mode preference is persisted to.
    #[arg(long, env = "DASHKIT_PREFERENCES")]
    preferences: Option<PathBuf>,

    /// Allowed CORS origin; repeat for several. Defaults to any origin.
    #[arg(long = "cors-origin", env = "DASHKIT_CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Vec<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "DASHKIT_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    request_timeout_secs: u64,

    /// Emit logs as JSON lines.
    #[arg(long, env = "DASHKIT_LOG_JSON")]
    log_json: bool,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        let defaults = NetworkConfig::default();
        Self {
            network: NetworkConfig {
                host: args.host,
                port: args.port,
                cors_origins: if args.cors_origins.is_empty() {
                    defaults.cors_origins
                } else {
                    args.cors_origins
                },
                request_timeout: Duration::from_secs(args.request_timeout_secs),
                drain_timeout: defaults.drain_timeout,
            },
            data_path: args.data,
            preferences_path: args.preferences,
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for ctrl-c, shutting down");
        return;
    }
    info!("shutdown requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let mut module = NetworkModule::from_server_config(ServerConfig::from(args))?;
    if let Err(error) = module.hydrate_color_mode() {
        warn!(%error, "color mode not hydrated, will retry on first read");
    }

    let port = module.start().await?;
    info!(port, "dashkit server started");

    module.serve(shutdown_signal()).await
}
