//! deckforge CLI
//!
//! Command-line interface for building the card catalog from its
//! source tables and inspecting the resolved records.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use deckforge_catalog::store::CatalogStore;
use deckforge_catalog::types::Category;
use deckforge_catalog::yaml::{load_catalog, CatalogConfig, YamlError};
use deckforge_ingest::pipeline::{
    ingest_catalog, CategoryOutcome, IngestError, IngestReport,
};
use deckforge_ingest::progress::{IngestProgress, SilentProgress};

mod settings;

#[derive(Parser)]
#[command(name = "deckforge")]
#[command(about = "Build and inspect the card catalog", long_about = None)]
struct Cli {
    /// Root path containing the catalog/ and data/ directories
    /// (defaults to the saved setting, then the current directory)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run catalog ingestion and print the per-category report
    Ingest {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show per-category record counts
    Stats,

    /// List a category's records with their resolved assets
    Show {
        /// Category name (character, special, power, mission)
        category: String,

        /// Only records that fell back to the sentinel asset
        #[arg(long)]
        unmatched: bool,

        /// Emit records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save the root path used by future invocations
    SetRoot {
        /// Path to remember, or omit to clear the saved value
        path: Option<PathBuf>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Yaml(#[from] YamlError),
    #[error("{0}")]
    Ingest(#[from] IngestError),
    #[error("Unknown category '{0}' (expected character, special, power, or mission)")]
    UnknownCategory(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let root = settings::resolve_root(cli.root.clone());

    let result = match cli.command {
        Commands::Ingest { json } => run_ingest(&root, json),
        Commands::Stats => run_stats(&root),
        Commands::Show {
            category,
            unmatched,
            json,
        } => run_show(&root, &category, unmatched, json),
        Commands::SetRoot { path } => run_set_root(path),
    };

    if let Err(e) = result {
        eprintln!(
            "{} {e}",
            "Error:".if_supports_color(owo_colors::Stream::Stderr, |t| t.bright_red())
        );
        std::process::exit(1);
    }
}

/// Load catalog configuration from `<root>/catalog/`.
fn load_config(root: &std::path::Path) -> Result<CatalogConfig, CliError> {
    Ok(load_catalog(&root.join("catalog"))?)
}

/// Build the full catalog from `<root>/data/` sources.
fn build_catalog(
    root: &std::path::Path,
    progress: &dyn IngestProgress,
) -> Result<(CatalogStore, IngestReport), CliError> {
    let config = load_config(root)?;
    Ok(ingest_catalog(&root.join("data"), &config, Some(progress))?)
}

fn run_ingest(root: &std::path::Path, json: bool) -> Result<(), CliError> {
    let progress = BarProgress::new();
    let (_, report) = build_catalog(root, &progress)?;
    progress.finish();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for entry in &report.categories {
        match &entry.outcome {
            CategoryOutcome::Loaded {
                count,
                skipped_rows,
                unmatched,
            } => {
                println!(
                    "{} {:<10} {} records ({} rows skipped, {} unmatched)",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    entry.category.as_str(),
                    count,
                    skipped_rows,
                    unmatched
                );
            }
            CategoryOutcome::Skipped { reason } => {
                println!(
                    "{} {:<10} skipped: {}",
                    "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                    entry.category.as_str(),
                    reason
                );
            }
        }
    }
    println!(
        "{} {} records total, finished at {}",
        "Done.".if_supports_color(Stdout, |t| t.bold()),
        report.total_loaded(),
        report.finished_at.if_supports_color(Stdout, |t| t.dimmed())
    );

    Ok(())
}

fn run_stats(root: &std::path::Path) -> Result<(), CliError> {
    let (store, _) = build_catalog(root, &SilentProgress)?;
    let stats = store.stats();

    println!(
        "{:<12} {}",
        "characters".if_supports_color(Stdout, |t| t.cyan()),
        stats.characters
    );
    println!(
        "{:<12} {}",
        "specials".if_supports_color(Stdout, |t| t.cyan()),
        stats.specials
    );
    println!(
        "{:<12} {}",
        "powers".if_supports_color(Stdout, |t| t.cyan()),
        stats.powers
    );
    println!(
        "{:<12} {}",
        "missions".if_supports_color(Stdout, |t| t.cyan()),
        stats.missions
    );
    println!("{:<12} {}", "total", stats.total());

    Ok(())
}

fn run_show(
    root: &std::path::Path,
    category: &str,
    unmatched: bool,
    json: bool,
) -> Result<(), CliError> {
    let category = Category::from_str_loose(category)
        .ok_or_else(|| CliError::UnknownCategory(category.to_string()))?;
    let (store, _) = build_catalog(root, &SilentProgress)?;

    let sentinel = category.sentinel_asset();
    let records: Vec<_> = store
        .get_all(category)
        .iter()
        .filter(|r| !unmatched || r.resolved_asset == sentinel)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!(
            "{}",
            "No matching records".if_supports_color(Stdout, |t| t.dimmed())
        );
        return Ok(());
    }

    for record in records {
        let is_sentinel = record.resolved_asset == sentinel;
        println!(
            "{:<14} {:<34} {}",
            record.id.if_supports_color(Stdout, |t| t.dimmed()),
            record.display_name(),
            if is_sentinel {
                record
                    .resolved_asset
                    .if_supports_color(Stdout, |t| t.yellow())
                    .to_string()
            } else {
                record.resolved_asset.clone()
            }
        );
    }

    Ok(())
}

fn run_set_root(path: Option<PathBuf>) -> Result<(), CliError> {
    settings::save_root(path.as_deref())?;
    match path {
        Some(p) => println!("Saved catalog root: {}", p.display()),
        None => println!("Cleared saved catalog root"),
    }
    Ok(())
}

/// Progress bar wired to the ingest callback trait.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("/-\\|"),
        );
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl IngestProgress for BarProgress {
    fn on_category(&self, category: &str, total_rows: usize) {
        self.bar
            .set_message(format!("Ingesting {category} ({total_rows} rows)"));
    }

    fn on_record(&self, _current: usize, _total: usize, name: &str) {
        self.bar.set_message(name.to_string());
        self.bar.tick();
    }

    fn on_complete(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }
}
