//! Symbology tool.
//!
//! Inspects persisted symbology dictionaries:
//! - Describe and normalize a dictionary
//! - Print the colorizer payload sent to the raster tile service
//! - Resolve feature styles and report cache behaviour
//! - Print the highlight variant

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use style_engine::EngineConfig;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "symbology-tool")]
#[command(about = "Inspect, normalize and resolve layer symbologies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Engine configuration file (YAML); defaults to environment variables
    #[arg(long, global = true, env = "SYMBOLOGY_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print kind and capabilities of a symbology dictionary
    Describe {
        /// Path to the symbology JSON file
        file: PathBuf,
    },

    /// Decode and re-encode a symbology dictionary
    Normalize {
        /// Path to the symbology JSON file
        file: PathBuf,
    },

    /// Print the colorizer request payload of a colorizer raster
    Payload {
        /// Path to the symbology JSON file
        file: PathBuf,
    },

    /// Resolve the style of every feature in a properties file
    Resolve {
        /// Path to the symbology JSON file
        file: PathBuf,

        /// JSON array of feature properties, or a GeoJSON FeatureCollection
        #[arg(short, long)]
        features: PathBuf,
    },

    /// Print the highlight variant of a symbology dictionary
    Highlight {
        /// Path to the symbology JSON file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json)?;

    let config = match &cli.config {
        Some(path) => EngineConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => {
            let config = EngineConfig::from_env();
            config.validate()?;
            config
        }
    };
    debug!(?config, "Loaded engine config");

    let output = match cli.command {
        Commands::Describe { file } => commands::describe(&commands::load_symbology(&file)?),
        Commands::Normalize { file } => commands::normalize(&commands::load_symbology(&file)?)?,
        Commands::Payload { file } => commands::payload(&commands::load_symbology(&file)?)?,
        Commands::Resolve { file, features } => {
            let symbology = commands::load_symbology(&file)?;
            let features = commands::load_features(&features)?;
            commands::resolve(&symbology, &features, &config)?
        }
        Commands::Highlight { file } => commands::highlight(&commands::load_symbology(&file)?)?,
    };

    println!("{}", output);
    Ok(())
}

/// Logs go to stderr so command output can be piped.
fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}
