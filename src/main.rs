//! Identikit - Random Identity Generator Service
//!
//! A small web service that fabricates a plausible identity (name,
//! gender, phone number, street address) for a selected country, using
//! OpenStreetMap Nominatim reverse geocoding and the randomuser.me API,
//! and renders it as a self-contained HTML page.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad arguments, bind failure, config error)

mod cli;
mod config;
mod error;
mod generator;
mod geo;
mod models;
mod page;
mod server;
mod upstream;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::Config;
use generator::IdentityGenerator;
use server::Server;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Identikit v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Identikit failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .identikit.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".identikit.toml");

    if path.exists() {
        eprintln!("⚠️  .identikit.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .identikit.toml")?;

    println!("✅ Created .identikit.toml with default settings.");
    println!("   Edit it to customize the bind address, upstream URLs, and retry budget.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Wire up config and the generator, then serve (or run --oneshot).
async fn run(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let default_country = config
        .default_country()
        .context("Invalid default country in configuration")?;

    let generator = IdentityGenerator::new(config.generator_settings())?;

    if args.oneshot {
        return run_oneshot(&args, &generator, default_country).await;
    }

    let addr = config.bind_addr()?;

    println!("🌍 Identikit listening on http://{}", addr);
    println!("   Default country: {}", default_country.display_name());
    println!("   Press Ctrl+C to stop");

    Server::new(addr, generator, default_country).run().await
}

/// Handle --oneshot: generate one identity, print it, exit.
async fn run_oneshot(
    args: &Args,
    generator: &IdentityGenerator,
    country: geo::CountryCode,
) -> Result<()> {
    let identity = generator.generate(country).await;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&identity)
                .context("Failed to serialize identity")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("{}", identity.to_text());
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .identikit.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
