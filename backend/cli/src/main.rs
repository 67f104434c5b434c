mod config;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use pawtoon_clients::{
    GeminiClient, GeminiConfig, ImgbbClient, ImgbbConfig, RembgClient, RembgConfig,
};
use pawtoon_gateway::{start_server, GatewayState};
use pawtoon_pipeline::{Generator, Ingestor};

use config::Config;

#[derive(Parser)]
#[command(name = "pawtoon")]
#[command(about = "Pawtoon — pet photo cartoonification service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the generation HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    pawtoon_logging::init_logger(config.log_dir.as_deref().map(Path::new), &config.log_level);

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { port } => serve(config, port).await,
    }
}

async fn serve(config: Config, port_override: Option<u16>) -> Result<()> {
    let generator = build_generator(&config)?;
    let state = GatewayState {
        generator: Arc::new(generator),
    };

    let port = port_override.unwrap_or(config.port);
    let addr: SocketAddr = format!("{}:{}", config.bind_address, port)
        .parse()
        .context("invalid bind address")?;

    info!(%addr, rembg = %config.rembg_url, "Starting Pawtoon");
    start_server(addr, state).await
}

/// Wire the orchestrator from configuration.
///
/// Each external capability gets its own client with the shared timeout.
fn build_generator(config: &Config) -> Result<Generator> {
    let mut gemini_config = GeminiConfig::new(config.gemini_api_key.clone());
    gemini_config.timeout = config.http_timeout;
    let style = GeminiClient::new(gemini_config)?;

    let mut rembg_config = RembgConfig::new(config.rembg_url.clone());
    rembg_config.timeout = config.http_timeout;
    let background = RembgClient::new(rembg_config)?;

    let mut imgbb_config = ImgbbConfig::new(config.imgbb_api_key.clone());
    imgbb_config.timeout = config.http_timeout;
    let host = ImgbbClient::new(imgbb_config)?;

    let ingestor = Ingestor::new(config.http_timeout)?;

    Ok(Generator::new(
        Arc::new(style),
        Arc::new(background),
        Arc::new(host),
        ingestor,
    ))
}
