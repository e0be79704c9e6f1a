mod beautify;
mod discovery;
mod exit_code;
mod output;
mod progress;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use exit_code::ExitCode;
use graphsniper_fetch::HttpFetcher;
use graphsniper_pipeline::{
    Beautify, Discard, DirectoryStore, DocumentProcessor, FinalSchema, Passthrough, Persist,
    Pipeline,
};
use settings::{Overrides, RunSettings};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "graphsniper")]
#[command(
    about = "Harvest GraphQL queries, mutations and endpoints from a site's JavaScript",
    long_about = None
)]
#[command(version)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Target domain or URL (e.g. example.com)
    target: String,

    /// Number of documents fetched and processed concurrently
    #[arg(short, long)]
    workers: Option<usize>,

    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Read JavaScript URLs from a file ("-" for stdin) instead of running discovery tools
    #[arg(long, value_name = "FILE")]
    urls: Option<PathBuf>,

    /// Directory for the resulting JSON document
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Directory where fetched JavaScript is saved
    #[arg(long, value_name = "DIR")]
    js_dir: Option<PathBuf>,

    /// Do not save fetched JavaScript
    #[arg(long)]
    no_save_js: bool,

    /// Print the JSON document to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// HTTP headers to send with every fetch (can be specified multiple times)
    /// Format: "Header-Name: Header-Value"
    #[arg(long = "header", short = 'H', value_name = "HEADER")]
    headers: Vec<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Number of retries after a failed fetch
    #[arg(long)]
    retry: Option<u32>,

    /// Command that beautifies JavaScript read from stdin (e.g. "js-beautify -").
    /// Off by default: documents are scanned and saved exactly as served
    #[arg(long, value_name = "CMD")]
    beautify: Option<String>,

    /// Merge results in URL order so repeated runs pick the same operation bodies
    #[arg(long)]
    deterministic: bool,

    /// Force colored output even when not a TTY
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Suppress progress indicators
    #[arg(long)]
    no_progress: bool,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show progress indicators
    pub show_progress: bool,
    /// Whether to show informational output (counts, summaries)
    pub show_info: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let code = match run(cli).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::for_error(&e)
        }
    };
    tracing::debug!(%code, "Exiting");
    code.exit();
}

/// Initialize tracing to stderr, filtered by `RUST_LOG` (off by default)
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Apply `--color`/`--no-color`, then `NO_COLOR`, `CLICOLOR_FORCE` and
/// `CLICOLOR`. Without any of them `colored` decides from the TTY.
fn configure_colors(force_color: bool, no_color: bool) {
    if let Some(enabled) = color_override(force_color, no_color, |name| std::env::var(name).ok())
    {
        colored::control::set_override(enabled);
    }
}

fn color_override(
    force_color: bool,
    no_color: bool,
    env: impl Fn(&str) -> Option<String>,
) -> Option<bool> {
    if force_color {
        return Some(true);
    }
    if no_color || env("NO_COLOR").is_some() {
        return Some(false);
    }
    match (env("CLICOLOR_FORCE"), env("CLICOLOR")) {
        (Some(force), _) => (!force.is_empty() && force != "0").then_some(true),
        (None, Some(clicolor)) => (clicolor == "0").then_some(false),
        (None, None) => None,
    }
}

#[tracing::instrument(skip_all, fields(target = %cli.target))]
async fn run(cli: Cli) -> Result<()> {
    let start_time = std::time::Instant::now();
    // With --stdout the JSON owns stdout, so chatter goes away entirely.
    let opts = OutputOptions {
        show_progress: !cli.quiet && !cli.no_progress && !cli.stdout,
        show_info: !cli.quiet && !cli.stdout,
    };

    let config = settings::load_config_file(cli.config.as_deref())?;
    let overrides = Overrides {
        workers: cli.workers,
        headers: cli.headers,
        timeout: cli.timeout,
        retry: cli.retry,
        beautify: cli.beautify,
        output_dir: cli.output_dir,
        js_dir: cli.js_dir,
        no_save_js: cli.no_save_js,
        deterministic: cli.deterministic,
    };
    let settings = settings::resolve(&config, &overrides)?;

    let domain = discovery::sanitize_domain(&cli.target);
    if opts.show_info {
        println!("{} Scanning {}", "→".cyan(), domain.bold());
    }

    let urls = match &cli.urls {
        Some(path) => discovery::read_url_list(path).await?,
        None => {
            let spinner = progress::spinner("Discovering JavaScript URLs...", opts.show_progress);
            let urls = discovery::discover(&settings.sources, &domain).await;
            spinner.finish_and_clear();
            urls
        }
    };

    if urls.is_empty() {
        if opts.show_info {
            println!("{} No JavaScript URLs found, nothing to do", "✗".yellow());
        }
        return Ok(());
    }
    if opts.show_info {
        println!("{} {} JavaScript URLs", "✓".green(), urls.len());
    }

    let pipeline = build_pipeline(&settings)?;
    let bar = progress::document_bar(urls.len(), opts.show_progress);
    let mut observer = progress::BarObserver(bar);
    let state = pipeline.run_with_observer(&urls, &mut observer).await;
    observer.0.finish_and_clear();

    let schema = FinalSchema::from_state(&state);

    if cli.stdout {
        return output::print_schema(&schema);
    }

    let path = output::schema_path(&settings.output_dir, &domain);
    output::write_schema(&schema, &path)?;

    if opts.show_info {
        print_summary(&schema, &path, start_time.elapsed());
    }
    Ok(())
}

fn build_pipeline(settings: &RunSettings) -> Result<Pipeline> {
    let fetcher =
        HttpFetcher::new(settings.fetch.clone()).context("Failed to create HTTP client")?;

    let beautifier: Arc<dyn Beautify> = match &settings.beautify {
        Some(command) => match beautify::CommandBeautifier::from_command(command) {
            Some(beautifier) => Arc::new(beautifier),
            None => Arc::new(Passthrough),
        },
        None => Arc::new(Passthrough),
    };

    let store: Arc<dyn Persist> = match &settings.js_dir {
        Some(dir) => Arc::new(
            DirectoryStore::new(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?,
        ),
        None => Arc::new(Discard),
    };

    let processor = DocumentProcessor::new(Arc::new(fetcher), beautifier, store);
    Ok(Pipeline::new(processor)
        .with_workers(settings.workers)
        .with_merge_order(settings.merge_order))
}

fn print_summary(schema: &FinalSchema, path: &std::path::Path, elapsed: std::time::Duration) {
    println!(
        "{} {} queries, {} mutations",
        "✓".green(),
        schema.queries.len().to_string().bold(),
        schema.mutations.len().to_string().bold()
    );
    match &schema.endpoint {
        Some(endpoint) => println!("{} Endpoint: {}", "✓".green(), endpoint.cyan()),
        None => println!("{} No endpoint candidate found", "✗".yellow()),
    }
    println!(
        "{} Saved to {}",
        "✓".green(),
        path.display().to_string().cyan()
    );
    println!("  {} {:.2}s", "⏱".dimmed(), elapsed.as_secs_f64());
}
