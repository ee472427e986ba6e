//! # VQA Harness CLI (`vqa`)
//!
//! Inspect a VQA annotation file from the terminal.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `vqa images` | List every indexed image id |
//! | `vqa filter` | Print annotations matching image ids and answer types |
//! | `vqa best` | Print the best confident answer per annotation |
//! | `vqa stats` | Summarize the dataset |
//!
//! ## Examples
//!
//! ```bash
//! # Questions of type "other" for two images
//! vqa filter --image a.jpg --image b.jpg --answer-type other --annotations val.json
//!
//! # Best answers as JSON, using the dataset from config
//! vqa best --json --config ./config/vqa.toml
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vqa_core::store::Query;

use vqa_harness::{best, config, filter, images, stats};

/// VQA Harness CLI — load, filter, and inspect VQA annotation datasets.
///
/// Settings are read from a TOML file (`--config`); the annotation file can
/// also be given directly with `--annotations`.
#[derive(Parser)]
#[command(
    name = "vqa",
    about = "VQA Harness — load, filter, and inspect VQA annotation datasets",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/vqa.toml`. A missing file is not an error;
    /// built-in defaults are used instead.
    #[arg(long, global = true, default_value = "./config/vqa.toml")]
    config: PathBuf,

    /// Annotation file to load (overrides `[dataset].path`). Use `-` for stdin.
    #[arg(long, global = true)]
    annotations: Option<PathBuf>,

    /// Log progress to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// List every indexed image id, sorted.
    Images,

    /// Print annotations matching the given image ids and answer types.
    ///
    /// With no filters, prints the whole dataset in file order.
    Filter(FilterArgs),

    /// Print the best confident answer for each matching annotation.
    ///
    /// Only answers with confidence `yes` are considered; annotations
    /// without any are omitted.
    Best(FilterArgs),

    /// Summarize the dataset: counts, answer types, confident coverage.
    Stats,
}

#[derive(Args)]
struct FilterArgs {
    /// Restrict to this image id. Repeatable; results follow the given order.
    #[arg(long = "image")]
    images: Vec<String>,

    /// Restrict to this answer type (e.g. `other`, `yes/no`). Repeatable.
    #[arg(long = "answer-type")]
    answer_types: Vec<String>,

    /// Write a JSON array instead of text.
    #[arg(long)]
    json: bool,
}

impl FilterArgs {
    fn query(&self) -> Query {
        Query::new()
            .images(self.images.iter().cloned())
            .answer_types(self.answer_types.iter().cloned())
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "vqa_harness=info,vqa_core=info"
    } else {
        "vqa_harness=warn,vqa_core=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        config::Config::minimal()
    };
    if let Some(path) = cli.annotations {
        cfg.dataset.path = Some(path);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Images => images::run_images(&cfg, &mut out)?,
        Commands::Filter(args) => filter::run_filter(&cfg, &args.query(), args.json, &mut out)?,
        Commands::Best(args) => best::run_best(&cfg, &args.query(), args.json, &mut out)?,
        Commands::Stats => stats::run_stats(&cfg, &mut out)?,
    }

    Ok(())
}
