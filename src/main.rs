//! FBI Remote Installer entry point.
//!
//! Parses the command line, initializes logging, loads configuration, and
//! starts the HTTP daemon.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use fbi_remote_installer::core::{Config, HttpTransport, InstallerServer};

/// FBI Remote Installer - serve 3DS packages to FBI over the local network.
#[derive(Parser, Debug)]
#[command(name = "fbi_remote_installer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug mode
    #[arg(short, long)]
    debug: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the FBI Remote Installer daemon
    Start(StartArgs),
}

/// Flags for `start`. Each one overrides its `FBI_*` environment variable.
#[derive(Args, Debug)]
struct StartArgs {
    /// Listen address, e.g. ":8080" or "127.0.0.1:8080"
    #[arg(short, long)]
    listen: Option<String>,

    /// Package data directory, created if absent
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Base URL announced to devices instead of the request's Host header
    #[arg(short = 'u', long)]
    base_url: Option<String>,
}

impl StartArgs {
    fn apply(self, config: &mut Config) -> Result<()> {
        if let Some(listen) = self.listen {
            config.http.set_listen(&listen)?;
        }
        if let Some(data_dir) = self.data_dir {
            config.storage.data_dir = Some(data_dir);
        }
        if let Some(base_url) = self.base_url {
            config.http.set_public_base_url(base_url);
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from environment
    let mut config = Config::from_env();
    if cli.debug {
        config.logging.level = "debug".to_string();
    }

    // Initialize logging
    init_logging(&config.logging.level);

    info!("debug mode = {}", cli.debug);

    match cli.command {
        Commands::Start(args) => {
            args.apply(&mut config)?;
            start(config).await
        }
    }
}

/// Build the server and serve until shutdown.
async fn start(config: Config) -> Result<()> {
    info!("Starting {} v{}", config.server.name, config.server.version);

    let server = InstallerServer::new(config.clone())?;

    info!("Starting transport: {}", config.http.description());
    HttpTransport::new(config.http).run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
