use adminkit_core::AdminConfig;
use adminkit_server::{AdminServer, AppState};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "adminkit-server", version, about = "Admin API server")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, short, env = "ADMINKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured listen port
    #[arg(long, short)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AdminConfig::from_file(path)?,
        None => AdminConfig::default(),
    };
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        config = ?cli.config,
        resources = config.resources.len(),
        root_path = %config.root_path,
        "Starting adminkit"
    );

    let server = AdminServer::new(config.server.clone(), AppState::from_config(config));
    server.run().await?;

    Ok(())
}
