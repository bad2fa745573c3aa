//! Command-line entry point for the grocery classification pipeline.
//!
//! # Responsibility
//! - Classify and normalize item lines from the shell.
//! - Print results as JSON so they can be piped into other tools.

use anyhow::Context;
use clap::{Parser, Subcommand};
use grocery_core::pipeline::seed::{builtin_seed_entries, load_seed_file};
use grocery_core::{normalize_item, Analyzer, AssignmentCache, GroceryConfig, CATEGORIES};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "grocery",
    version,
    about = "grocery: item normalization and category assignment",
    long_about = None
)]
struct Cli {
    /// Absolute directory for rolling log files (overrides GROCERY_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error (overrides GROCERY_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Classify item lines",
        after_help = "EXAMPLES:\n    grocery analyze \"2 kg apples\" \"- Milk\" \"dragonfruit\""
    )]
    Analyze {
        /// One raw line per item.
        #[arg(required = true)]
        items: Vec<String>,
    },

    #[command(
        about = "Normalize one item line",
        after_help = "EXAMPLES:\n    grocery normalize \"• 3 x Bananas!\""
    )]
    Normalize {
        /// Raw item text.
        text: String,
    },

    #[command(about = "List grocery categories with their default emoji")]
    Categories,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    config.init_logging().context("failed to initialize logging")?;

    match cli.command {
        Commands::Analyze { items } => run_analyze(&config, &items),
        Commands::Normalize { text } => {
            println!("{}", serde_json::to_string(&normalize_item(&text))?);
            Ok(())
        }
        Commands::Categories => {
            for category in CATEGORIES {
                println!("{}\t{}", category.as_str(), category.default_emoji());
            }
            Ok(())
        }
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<GroceryConfig> {
    let mut config = GroceryConfig::from_env().context("invalid environment configuration")?;
    if let Some(level) = cli.log_level.as_deref() {
        config.log_level = grocery_core::logging::parse_level(level)?;
    }
    if let Some(log_dir) = cli.log_dir.clone() {
        config.log_dir = Some(log_dir);
    }
    Ok(config)
}

fn run_analyze(config: &GroceryConfig, items: &[String]) -> anyhow::Result<()> {
    let entries = match config.seed_path.as_deref() {
        Some(path) => load_seed_file(path)?,
        None => builtin_seed_entries()?,
    };
    let cache = AssignmentCache::new();
    cache.seed(&entries);

    let analyzer = Analyzer::new(Arc::new(cache));
    let classified = analyzer.analyze_many(items);
    info!(
        "event=cli_analyze module=cli status=ok count={}",
        classified.len()
    );
    for item in &classified {
        println!("{}", serde_json::to_string(item)?);
    }
    Ok(())
}
