//! Resolution of run settings from flags, config file and defaults.
//!
//! Precedence is always: command-line flag, then config file, then the
//! built-in default.

use anyhow::{Context, Result};
use graphsniper_config::{find_config, load_config, MergeOrderConfig, SniperConfig, SourceCommand};
use graphsniper_fetch::FetchSettings;
use graphsniper_pipeline::{MergeOrder, DEFAULT_WORKERS};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_OUTPUT_DIR: &str = "graphql_output";
const DEFAULT_JS_DIR: &str = "js_files";

/// Flag values that can override the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub workers: Option<usize>,
    pub headers: Vec<String>,
    pub timeout: Option<u64>,
    pub retry: Option<u32>,
    pub beautify: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub js_dir: Option<PathBuf>,
    pub no_save_js: bool,
    pub deterministic: bool,
}

/// Everything a run needs, fully resolved.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub workers: usize,
    pub fetch: FetchSettings,
    pub sources: Vec<SourceCommand>,
    pub beautify: Option<Vec<String>>,
    pub output_dir: PathBuf,
    /// `None` when fetched JavaScript should not be saved
    pub js_dir: Option<PathBuf>,
    pub merge_order: MergeOrder,
}

/// Load the config from `--config`, or search upward from the working directory.
pub fn load_config_file(explicit: Option<&Path>) -> Result<SniperConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let current_dir = std::env::current_dir()?;
            find_config(&current_dir).context("Failed to search for config")?
        }
    };

    match path {
        Some(path) => load_config(&path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(SniperConfig::default()),
    }
}

/// Parses a header string in "Name: Value" format.
pub fn parse_header(header: &str) -> Result<(String, String)> {
    let Some((name, value)) = header.split_once(':') else {
        anyhow::bail!("Invalid header format: '{header}'. Expected 'Header-Name: Header-Value'");
    };
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Header name cannot be empty");
    }
    Ok((name.to_string(), value.trim().to_string()))
}

pub fn resolve(config: &SniperConfig, overrides: &Overrides) -> Result<RunSettings> {
    let workers = overrides
        .workers
        .or(config.workers)
        .unwrap_or(DEFAULT_WORKERS);
    if workers == 0 {
        anyhow::bail!("--workers must be at least 1");
    }

    let mut fetch = FetchSettings::new();
    if let Some(timeout) = overrides.timeout.or(config.fetch.timeout) {
        if timeout == 0 {
            anyhow::bail!("--timeout must be at least 1 second");
        }
        fetch = fetch.with_timeout(Duration::from_secs(timeout));
    }
    if let Some(connect_timeout) = config.fetch.connect_timeout {
        fetch = fetch.with_connect_timeout(Duration::from_secs(connect_timeout));
    }
    if let Some(retries) = overrides.retry.or(config.fetch.retries) {
        fetch = fetch.with_retries(retries);
    }
    if let Some(backoff) = config.fetch.retry_backoff_ms {
        fetch = fetch.with_backoff(Duration::from_millis(backoff));
    }
    if let Some(user_agent) = &config.fetch.user_agent {
        fetch = fetch.with_user_agent(user_agent.clone());
    }

    // Config headers first so CLI headers with the same name replace them.
    if let Some(headers) = &config.fetch.headers {
        fetch = fetch.with_headers(headers.clone());
    }
    let cli_headers = overrides
        .headers
        .iter()
        .map(|h| parse_header(h))
        .collect::<Result<Vec<_>>>()
        .context("Failed to parse headers")?;
    fetch = fetch.with_headers(cli_headers);

    let beautify = match &overrides.beautify {
        Some(command) => {
            let parts: Vec<String> = command.split_whitespace().map(ToString::to_string).collect();
            if parts.is_empty() {
                anyhow::bail!("--beautify must name a program");
            }
            Some(parts)
        }
        None => config.beautify.command.clone(),
    };

    let save_js = !overrides.no_save_js && config.output.save_js.unwrap_or(true);
    let js_dir = save_js.then(|| {
        overrides
            .js_dir
            .clone()
            .or_else(|| config.output.js_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_JS_DIR))
    });

    let output_dir = overrides
        .output_dir
        .clone()
        .or_else(|| config.output.dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let merge_order = if overrides.deterministic {
        MergeOrder::Submission
    } else {
        match config.merge_order {
            Some(MergeOrderConfig::Submission) => MergeOrder::Submission,
            Some(MergeOrderConfig::Completion) | None => MergeOrder::Completion,
        }
    };

    Ok(RunSettings {
        workers,
        fetch,
        sources: config.discovery.sources_or_default(),
        beautify,
        output_dir,
        js_dir,
        merge_order,
    })
}
