//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use guideforge_core::{CatalogReport, ProgressReporter, build_catalog, load_guide};
use guideforge_shared::{
    AppConfig, GuideId, TransformOptions, init_config, load_config,
};
use guideforge_storage::{FsStore, locator};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// GuideForge: one unified model for legacy grammar-guide content.
#[derive(Parser)]
#[command(
    name = "guideforge",
    version,
    about = "Normalize legacy grammar-guide documents into one unified, versioned model.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Load one guide and print its unified form.
    Get {
        /// Guide identifier, e.g. `conditionals_grammar`.
        guide_id: String,

        /// Content root directory (defaults to the configured root).
        #[arg(short, long)]
        root: Option<String>,

        /// Print a human-readable digest instead of JSON.
        #[arg(long)]
        summary: bool,
    },

    /// Bulk-load every guide under the content root and report outcomes.
    Catalog {
        /// Content root directory (defaults to the configured root).
        #[arg(short, long)]
        root: Option<String>,

        /// Load only these guide ids (can be repeated). Defaults to every
        /// guide found under the root.
        #[arg(long = "id")]
        ids: Vec<String>,

        /// Maximum concurrent loads (defaults to the configured value).
        #[arg(short, long)]
        concurrency: Option<u32>,
    },

    /// Show where a guide id resolves in the content tree.
    Locate {
        /// Guide identifier.
        guide_id: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "guideforge=info",
        1 => "guideforge=debug",
        _ => "guideforge=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Get {
            guide_id,
            root,
            summary,
        } => cmd_get(&guide_id, root.as_deref(), summary).await,
        Command::Catalog {
            root,
            ids,
            concurrency,
        } => cmd_catalog(root.as_deref(), &ids, concurrency).await,
        Command::Locate { guide_id } => cmd_locate(&guide_id),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

/// Resolve the content root from a CLI flag or the loaded config.
fn content_root(config: &AppConfig, flag: Option<&str>) -> PathBuf {
    match flag {
        Some(root) => PathBuf::from(root),
        None => PathBuf::from(&config.defaults.content_root),
    }
}

// ---------------------------------------------------------------------------
// get
// ---------------------------------------------------------------------------

async fn cmd_get(guide_id: &str, root: Option<&str>, summary: bool) -> Result<()> {
    let config = load_config()?;
    let store = FsStore::new(content_root(&config, root));
    let options = TransformOptions::from(&config);

    let id = GuideId::new(guide_id);
    info!(%id, root = %store.root().display(), "loading guide");

    let guide = load_guide(&store, &id, &options).await?;

    if summary {
        println!();
        println!("  {}", guide.title);
        if !guide.description.is_empty() {
            println!("  {}", guide.description);
        }
        println!();
        println!("  Category:   {}", guide.metadata.category);
        println!("  Difficulty: {}", guide.metadata.difficulty);
        println!("  Concepts:   {}", guide.concepts.len());
        println!("  Contexts:   {}", guide.contexts.len());
        println!("  Content:    {}", guide.metadata.total_content);
        println!("  Exercises:  {}", guide.metadata.total_exercises);
        println!(
            "  Study time: ~{} min",
            guide.metadata.estimated_study_minutes
        );
        println!();
        for context in &guide.contexts {
            println!("    {} ({} items)", context.title, context.content.len());
        }
        println!();
    } else {
        println!("{}", serde_json::to_string_pretty(&guide)?);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// catalog
// ---------------------------------------------------------------------------

async fn cmd_catalog(
    root: Option<&str>,
    ids: &[String],
    concurrency: Option<u32>,
) -> Result<()> {
    let config = load_config()?;
    let store = Arc::new(FsStore::new(content_root(&config, root)));
    let options = TransformOptions::from(&config);
    let concurrency = concurrency.unwrap_or(config.defaults.catalog_concurrency) as usize;

    let guide_ids: Vec<GuideId> = if ids.is_empty() {
        store.list_guides().await?
    } else {
        ids.iter().map(GuideId::new).collect()
    };

    if guide_ids.is_empty() {
        return Err(eyre!(
            "no guides found under '{}'",
            store.root().display()
        ));
    }

    info!(
        count = guide_ids.len(),
        concurrency,
        root = %store.root().display(),
        "building catalog"
    );

    let reporter = CliProgress::new(guide_ids.len());
    let report = build_catalog(store, &guide_ids, &options, concurrency, &reporter).await;

    println!();
    for entry in &report.loaded {
        println!(
            "  ok    {:40} {:16} {:>4} items",
            entry.guide_id.to_string(),
            entry.category.to_string(),
            entry.total_content
        );
    }
    for failure in &report.failures {
        let marker = if failure.retryable { "retry" } else { "fail" };
        println!(
            "  {marker:5} {:40} {}",
            failure.guide_id.to_string(),
            failure.reason
        );
    }

    println!();
    println!(
        "  {} loaded, {} failed, {:.1}s",
        report.loaded.len(),
        report.failures.len(),
        report.elapsed.as_secs_f64()
    );
    println!();

    if !report.failures.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Catalog progress bar backed by indicatif.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} [{bar:30}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=> "),
        );
        Self { bar }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.bar.set_message(name.to_string());
    }

    fn guide_finished(&self, guide_id: &str, ok: bool, _current: usize, _total: usize) {
        self.bar.inc(1);
        let marker = if ok { "ok" } else { "failed" };
        self.bar.set_message(format!("{guide_id}: {marker}"));
    }

    fn done(&self, _report: &CatalogReport) {
        self.bar.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// locate
// ---------------------------------------------------------------------------

fn cmd_locate(guide_id: &str) -> Result<()> {
    let location = locator::resolve(&GuideId::new(guide_id));
    println!("category: {}", location.category);
    println!("path:     {}", location.path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
