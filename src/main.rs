//! # Photo Locator CLI (`locator`)
//!
//! Runs the upload server, or resolves a single local photo from the
//! command line.
//!
//! ## Usage
//!
//! ```bash
//! locator --config ./config/locator.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `locator serve` | Start the HTTP server |
//! | `locator inspect <image>` | Print where a photo was taken as JSON |
//!
//! Log verbosity follows `RUST_LOG` (default `photo_locator=info,tower_http=info`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photo_locator::config;
use photo_locator::decode::ExifDecoder;
use photo_locator::extract::extract_gps_from_file;
use photo_locator::resolve::resolve;
use photo_locator::server;

/// Photo Locator finds where a photo was taken from its GPS metadata,
/// falling back to the device's location.
#[derive(Parser)]
#[command(name = "locator", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/locator.toml`. Built-in defaults are used when
    /// the file does not exist. `PORT` overrides `[server].port`.
    #[arg(long, global = true, default_value = "./config/locator.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    ///
    /// Serves `GET /health` and `POST /upload` on the configured address.
    Serve,

    /// Resolve the location of a local image and print it as JSON.
    ///
    /// Uses the same metadata and fallback rules as `POST /upload`.
    Inspect {
        /// Path to the image file.
        image: PathBuf,

        /// Fallback latitude, as the device would send it.
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,

        /// Fallback longitude, as the device would send it.
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photo_locator=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            let cfg = config::load_config(&cli.config)?;
            server::run_server(&cfg).await?;
        }
        Commands::Inspect { image, lat, lon } => {
            if !image.is_file() {
                anyhow::bail!("image not found: {}", image.display());
            }
            let extraction = extract_gps_from_file(&ExifDecoder, &image);
            let result = resolve(extraction, lat.as_deref(), lon.as_deref());
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
