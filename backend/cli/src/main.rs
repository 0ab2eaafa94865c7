use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use slotline_client::{ApiMode, ClientConfig};
use slotline_config::{load_config, SlotlineConfig};
use slotline_gateway::{start_server, AppState};
use slotline_routing::ActionRouter;
use slotline_session::{InMemorySessionStore, SessionStore, SqliteSessionStore};

#[derive(Parser)]
#[command(name = "slotline")]
#[command(about = "Slotline appointment scheduling action service")]
#[command(version)]
struct Cli {
    /// Path to a YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Slotline HTTP gateway
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show the health of a running instance
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { port } => {
            let config = SlotlineConfig {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("Slotline is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: SlotlineConfig) -> Result<()> {
    logging::init_logger(config.log_dir.as_deref(), &config.log_level);

    info!(
        port = config.port,
        bind = %config.bind_address,
        mock = config.use_mock_api,
        db = %config.session_db,
        "Starting Slotline gateway"
    );
    if config.use_mock_api {
        info!("Mock API mode enabled; set USE_MOCK_API=false for live calls");
    }

    let store: Arc<dyn SessionStore> = if config.session_db == ":memory:" {
        Arc::new(InMemorySessionStore::new())
    } else {
        Arc::new(
            SqliteSessionStore::open(&config.session_db)?
                .with_ttl(Duration::from_secs(config.session_ttl_secs)),
        )
    };

    let client_config = ClientConfig {
        base_url: config.resolved_base_url(),
        mode: if config.use_mock_api { ApiMode::Mock } else { ApiMode::Live },
        enable_real_confirm: config.enable_real_confirm,
        enable_real_cancel: config.enable_real_cancel,
        timeout: Duration::from_secs(config.request_timeout_secs),
    };

    let state = Arc::new(AppState {
        router: ActionRouter::new(store, client_config),
    });

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port).parse()?;
    start_server(addr, state).await
}
