//! Mask an extracted contract and print the analyzer submission as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use clausemark_core::analyzer::prepare_submission;
use clausemark_core::config::CoreConfig;
use clausemark_core::masking::MaskingProfile;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mask_runner")]
#[command(about = "Sanitize and mask contract text before it is sent to the analyzer")]
struct Cli {
    /// Extracted contract text (UTF-8)
    #[arg(long)]
    input: PathBuf,

    /// BASIC, STANDARD or STRICT; overrides the config file
    #[arg(long)]
    profile: Option<String>,

    /// Document label shown to the analyzer
    #[arg(long, default_value = "")]
    label: String,

    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,clausemark_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CoreConfig::load_from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CoreConfig::default(),
    };
    let profile = match cli.profile.as_deref() {
        Some(p) => MaskingProfile::from_str(p)?,
        None => config.masking_profile,
    };

    let raw = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let submission = prepare_submission(&raw, &cli.label, profile)?;
    tracing::info!(input = %cli.input.display(), "submission ready");

    println!("{}", serde_json::to_string_pretty(&submission)?);
    Ok(())
}
