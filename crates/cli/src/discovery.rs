//! Finding JavaScript URLs for a target.
//!
//! URLs come either from external recon tools (waybackurls, gau, katana by
//! default) or from a plain list supplied by the user.

use anyhow::{Context, Result};
use graphsniper_config::SourceCommand;
use indexmap::IndexSet;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

/// Reduce a target such as `https://example.com/app` to `example.com`.
pub fn sanitize_domain(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Keep lines that mention `.js`, trimmed, deduplicated in first-seen order.
pub fn collect_js_urls<'a>(outputs: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let urls: IndexSet<String> = outputs
        .into_iter()
        .flat_map(str::lines)
        .map(str::trim)
        .filter(|line| line.contains(".js"))
        .map(ToString::to_string)
        .collect();
    urls.into_iter().collect()
}

/// Run every source concurrently and merge their URLs in source order.
#[tracing::instrument(skip(sources), fields(sources = sources.len()))]
pub async fn discover(sources: &[SourceCommand], domain: &str) -> Vec<String> {
    let mut tasks = tokio::task::JoinSet::new();
    for (index, source) in sources.iter().enumerate() {
        let source = source.clone();
        let domain = domain.to_string();
        tasks.spawn(async move { (index, run_source(&source, &domain).await) });
    }

    let mut outputs = vec![String::new(); sources.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, output)) => outputs[index] = output,
            Err(e) => tracing::warn!(error = %e, "Discovery task failed"),
        }
    }

    let urls = collect_js_urls(outputs.iter().map(String::as_str));
    tracing::info!(urls = urls.len(), "Discovery finished");
    urls
}

/// Stdout of one source command, or an empty string if it cannot run.
async fn run_source(source: &SourceCommand, domain: &str) -> String {
    let spawned = Command::new(&source.program)
        .args(source.args_for(domain))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            tracing::debug!(program = %source.program, error = %e, "Source unavailable");
            return String::new();
        }
    };

    let mut stdout = Vec::new();
    if let Some(mut pipe) = child.stdout.take() {
        if let Err(e) = pipe.read_to_end(&mut stdout).await {
            tracing::debug!(program = %source.program, error = %e, "Failed to read source output");
        }
    }
    if let Err(e) = child.wait().await {
        tracing::debug!(program = %source.program, error = %e, "Source did not exit cleanly");
    }

    let output = String::from_utf8_lossy(&stdout).into_owned();
    tracing::debug!(program = %source.program, lines = output.lines().count(), "Source finished");
    output
}

/// Read a URL list from a file, or from stdin when `path` is `-`.
///
/// Blank lines are skipped; the rest are kept in order without duplicates.
pub async fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read URL list from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read URL list {}", path.display()))?
    };

    let urls: IndexSet<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect();
    Ok(urls.into_iter().collect())
}
