//! Highlight a masked contract against an analyzer response.
//!
//! Prints the highlight view as JSON, the clause map as CSV, or a markdown memo.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clausemark_core::analyzer::parse_clause_descriptors;
use clausemark_core::config::CoreConfig;
use clausemark_core::highlight::cards::CardOrder;
use clausemark_core::highlight::export::{render_clause_map_csv, render_risk_memo_markdown};
use clausemark_core::highlight::model::RiskTier;
use clausemark_core::highlight::workflow::{build_highlight_view, HighlightView};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Memo,
}

#[derive(Parser)]
#[command(name = "highlight_runner")]
#[command(about = "Locate analyzer clauses in a masked contract and render highlight segments")]
struct Cli {
    /// Masked contract text (UTF-8)
    #[arg(long)]
    text: PathBuf,

    /// Analyzer response body (JSON, optionally wrapped in prose)
    #[arg(long)]
    clauses: PathBuf,

    /// Optional JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Clause map only: list cards of this tier (RED, ORANGE, YELLOW)
    #[arg(long)]
    tier: Option<String>,

    /// Clause map only: list RED and ORANGE cards
    #[arg(long)]
    key_only: bool,
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
    let tier = match cli.tier.as_deref() {
        Some(label) => Some(
            RiskTier::from_label(label)
                .with_context(|| format!("unknown risk tier: {}", label))?,
        ),
        None => None,
    };

    let text = std::fs::read_to_string(&cli.text)
        .with_context(|| format!("reading {}", cli.text.display()))?;
    let response = std::fs::read_to_string(&cli.clauses)
        .with_context(|| format!("reading {}", cli.clauses.display()))?;

    let clauses = parse_clause_descriptors(&response).context("validating analyzer response")?;
    let view = build_highlight_view(&text, &clauses, &config.highlight)?;

    let filtered = tier.is_some() || cli.key_only;
    match cli.format {
        OutputFormat::Csv => {
            let cards = view.select_cards(tier, cli.key_only, CardOrder::Default);
            tracing::info!(cards = cards.len(), of = view.cards.len(), "rendering clause map");
            print!("{}", render_clause_map_csv(&cards)?);
        }
        OutputFormat::Json | OutputFormat::Memo if filtered => {
            tracing::warn!("--tier and --key-only only apply to the csv clause map; printing all clauses");
            print_whole_view(cli.format, &view)?;
        }
        OutputFormat::Json | OutputFormat::Memo => print_whole_view(cli.format, &view)?,
    }
    Ok(())
}

fn print_whole_view(format: OutputFormat, view: &HighlightView) -> Result<()> {
    match format {
        OutputFormat::Memo => print!("{}", render_risk_memo_markdown(view)),
        _ => println!("{}", serde_json::to_string_pretty(view)?),
    }
    Ok(())
}
