//! paimon: command-line player lookups and asset maintenance.

use std::process;

use clap::{Parser, Subcommand};
use paimon::assets::{self, AssetsConfig};
use paimon::server::config::{Config, Mode};
use paimon::{PlayerId, PlayerSource};

/// Paimon CLI
#[derive(Parser)]
#[command(name = "paimon")]
#[command(version = paimon::PKG_VERSION)]
#[command(about = "Paimon player lookup client")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long, env = "PAIMON_CONFIG")]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch and print a normalized player profile (bypasses the cache)
    Lookup {
        /// Numeric player UID
        player_id: String,
    },

    /// Fetch the asset store and save it to the local cache
    UpdateAssets {
        /// Asset store base URL (default: from config)
        #[arg(long)]
        url: Option<String>,
        /// Local cache path (default: ~/.cache/paimon/assets.json)
        #[arg(long)]
        cache_path: Option<std::path::PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let result = match args.command {
        Command::Lookup { ref player_id } => lookup(&config, player_id).await,
        Command::UpdateAssets { url, cache_path } => update_assets(&config, url, cache_path).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

async fn lookup(config: &Config, raw: &str) -> Result<(), Box<dyn std::error::Error>> {
    let player_id = PlayerId::parse(raw)?;
    let client = config.client_builder(Mode::from_env()).build()?;

    match client.fetch_player(&player_id).await {
        Ok(data) => {
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(())
        }
        Err(e) => Err(format!("{e} (status {})", e.status()).into()),
    }
}

async fn update_assets(
    config: &Config,
    url: Option<String>,
    cache_path: Option<std::path::PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let defaults = config.assets_config(Mode::Development);
    let assets_config = AssetsConfig {
        url: url.unwrap_or(defaults.url),
        cache_path: cache_path.unwrap_or(defaults.cache_path),
        persist: true,
    };

    let http = config.client_builder(Mode::Development).http_client()?;
    let bundle = assets::update_assets(&http, &assets_config).await?;
    println!(
        "fetched {} characters, {} names",
        bundle.characters.len(),
        bundle.names.len()
    );
    println!("saved to {}", assets_config.cache_path.display());
    Ok(())
}
