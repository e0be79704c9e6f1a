use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Placeholder replaced with the sanitized target domain in source arguments.
pub const DOMAIN_PLACEHOLDER: &str = "{domain}";

/// Top-level graphsniper configuration.
///
/// Every field is optional; command-line flags override whatever is set
/// here, and built-in defaults fill the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SniperConfig {
    /// Number of documents processed concurrently
    pub workers: Option<usize>,
    pub fetch: FetchConfig,
    pub discovery: DiscoveryConfig,
    pub beautify: BeautifyConfig,
    pub output: OutputConfig,
    /// Order in which per-document results are merged
    pub merge_order: Option<MergeOrderConfig>,
}

/// HTTP settings for document fetching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Request timeout in seconds
    pub timeout: Option<u64>,
    /// Connection timeout in seconds
    pub connect_timeout: Option<u64>,
    /// Retries after the first attempt
    pub retries: Option<u32>,
    /// Pause between attempts in milliseconds
    pub retry_backoff_ms: Option<u64>,
    pub user_agent: Option<String>,
    pub headers: Option<BTreeMap<String, String>>,
}

/// External URL sources used to find JavaScript files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    pub sources: Option<Vec<SourceCommand>>,
}

impl DiscoveryConfig {
    /// Configured sources, or the built-in wayback/gau/katana trio.
    #[must_use]
    pub fn sources_or_default(&self) -> Vec<SourceCommand> {
        self.sources.clone().unwrap_or_else(SourceCommand::defaults)
    }
}

/// A command whose stdout lists URLs, one per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl SourceCommand {
    #[must_use]
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("waybackurls", [DOMAIN_PLACEHOLDER]),
            Self::new("gau", [DOMAIN_PLACEHOLDER]),
            Self::new("katana", ["-u", "https://{domain}", "-silent"]),
        ]
    }

    /// Arguments with every `{domain}` replaced.
    #[must_use]
    pub fn args_for(&self, domain: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(DOMAIN_PLACEHOLDER, domain))
            .collect()
    }
}

/// External JavaScript formatter, e.g. `["js-beautify", "-"]`.
///
/// Unset means no beautification: documents are scanned and saved as served.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BeautifyConfig {
    pub command: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory for the final JSON document
    pub dir: Option<PathBuf>,
    /// Directory for fetched JavaScript
    pub js_dir: Option<PathBuf>,
    pub save_js: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeOrderConfig {
    /// Merge results as documents finish (fast, not reproducible)
    Completion,
    /// Merge results in URL order once all documents finish
    Submission,
}
