//! ZoneSync CLI
//!
//! Command-line tools for operating the zone sync flow.
//!
//! # Commands
//!
//! - `fetch` - Load the zone collection from the feature server
//! - `compile` - Compile an edit script into a WFS-T document (dry run)
//! - `push` - Apply an edit script and submit it as one transaction

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use zonesync_engine::{HttpWfsTransport, ReqwestClient, SyncClient, WfsConfig};

/// ZoneSync command-line tools.
#[derive(Parser)]
#[command(name = "zonesync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// WFS endpoint URL (falls back to WFS_URL)
    #[arg(global = true, short, long)]
    url: Option<String>,

    /// Qualified feature type, e.g. geoimage:zones (falls back to WFS_FEATURE_TYPE)
    #[arg(global = true, short, long)]
    feature_type: Option<String>,

    /// Feature namespace URI (falls back to WFS_FEATURE_NAMESPACE)
    #[arg(global = true, short, long)]
    namespace: Option<String>,

    /// Enable verbose output
    #[arg(global = true, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the zone collection from the feature server
    Fetch {
        /// Output format (text, json)
        #[arg(short = 'o', long, default_value = "text")]
        format: String,
    },

    /// Compile an edit script into a WFS-T document without submitting it
    Compile {
        /// Path to the edit script (JSON)
        input: PathBuf,
    },

    /// Apply an edit script against the server state and submit it
    Push {
        /// Path to the edit script (JSON)
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Fetch { ref format } => {
            let client = build_client(&cli)?;
            commands::fetch::run(&client, &format)?;
        }
        Commands::Compile { ref input } => {
            let config = build_config(&cli)?;
            commands::compile::run(&input, &config)?;
        }
        Commands::Push { ref input } => {
            let client = build_client(&cli)?;
            commands::push::run(&client, &input)?;
        }
        Commands::Version => {
            println!("zonesync {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Resolves the configuration from flags, falling back to the environment.
fn build_config(cli: &Cli) -> Result<WfsConfig, Box<dyn std::error::Error>> {
    let mut config = match (&cli.url, &cli.feature_type) {
        (Some(url), Some(feature_type)) => WfsConfig::new(url, feature_type),
        _ => {
            let mut config = WfsConfig::from_env()?;
            if let Some(url) = &cli.url {
                config.url = url.clone();
            }
            if let Some(feature_type) = &cli.feature_type {
                config.feature_type = feature_type.clone();
            }
            config
        }
    };

    if let Some(namespace) = &cli.namespace {
        config.namespace_uri = namespace.clone();
    }
    Ok(config)
}

fn build_client(
    cli: &Cli,
) -> Result<SyncClient<HttpWfsTransport<ReqwestClient>>, Box<dyn std::error::Error>> {
    let config = build_config(cli)?;
    let transport = HttpWfsTransport::new(config.clone(), ReqwestClient::new());
    Ok(SyncClient::new(&config, transport)?)
}
