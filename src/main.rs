//! # Main Entry Point
//!
//! Initializes the application:
//! - Domain: Configuration and Types
//! - Infrastructure: Hosting and Generation adapters
//! - Application: Workflow Controller
//! - Interface: Console Wizard

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;

use crate::application::wizard::{WizardController, WizardOptions};
use crate::domain::config::AppConfig;
use crate::infrastructure::generation::GenerationClient;
use crate::infrastructure::hosting::HostingClient;

#[derive(Parser, Debug)]
#[command(name = "stickerforge", about = "Turn a photo into an AI-generated sticker pack")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "data/config.yaml")]
    config: String,

    /// Skip the quantity step and use the configured default pack size
    #[arg(long)]
    skip_quantity: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load Configuration
    let config_content =
        fs::read_to_string(&cli.config).with_context(|| format!("Failed to read {}", cli.config))?;
    let mut config: AppConfig =
        serde_yaml::from_str(&config_content).context("Failed to parse config")?;
    if cli.skip_quantity {
        config.wizard.quantity_step = false;
    }

    // 2. Logging Setup
    if !std::path::Path::new("data").exists() {
        fs::create_dir("data").context("Failed to create data directory")?;
    }

    let file_appender = tracing_appender::rolling::never("data", "session.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,hyper=warn,reqwest=warn"));

    // File only: stdout belongs to the wizard.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Starting stickerforge...");

    // 3. Initialize Infrastructure
    let host = HostingClient::new(config.services.hosting.clone());
    let generator = GenerationClient::from_config(&config.services.generation)
        .context("Generation service not usable")?;

    // 4. Run the wizard
    let options = WizardOptions::from_config(&config);
    let controller = WizardController::new(options, host, generator);
    interface::console::run(controller).await
}
