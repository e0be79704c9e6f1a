//! Retrying HTTP client for JavaScript documents.

use crate::{Fetch, FetchError, Result};
use std::time::Duration;

/// Default timeout for a single request (8 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// Default connection timeout (5 seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default number of retries after the first attempt.
const DEFAULT_RETRIES: u32 = 1;

/// Default pause between attempts.
const DEFAULT_BACKOFF_MILLIS: u64 = 150;

/// Many CDNs refuse requests without a browser-like agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Settings for an [`HttpFetcher`].
///
/// Defaults:
/// - 8 second request timeout
/// - 5 second connection timeout
/// - 1 retry, 150 ms apart
/// - `User-Agent: Mozilla/5.0`
/// - No custom headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    headers: Vec<(String, String)>,
    timeout: Duration,
    connect_timeout: Duration,
    retries: u32,
    backoff: Duration,
    user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchSettings {
    #[must_use]
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            retries: DEFAULT_RETRIES,
            backoff: Duration::from_millis(DEFAULT_BACKOFF_MILLIS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Adds a header sent with every request.
    ///
    /// A header with the same name (case-insensitive) replaces the earlier one.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self = self.with_header(name, value);
        }
        self
    }

    /// Maximum time for a whole request (connection + transfer).
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Number of extra attempts after the first one fails.
    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Fixed pause before every retry.
    #[must_use]
    pub const fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub const fn retries(&self) -> u32 {
        self.retries
    }

    #[must_use]
    pub const fn backoff(&self) -> Duration {
        self.backoff
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// Fetches documents over HTTP(S).
///
/// One `reqwest::Client` is shared by all requests so connections are
/// pooled across documents on the same host. Only `200 OK` responses with a
/// non-empty body count as content.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    settings: FetchSettings,
}

impl HttpFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self> {
        tracing::debug!(
            timeout = ?settings.timeout,
            retries = settings.retries,
            "Creating HTTP client"
        );
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .connect_timeout(settings.connect_timeout)
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, settings })
    }

    #[must_use]
    pub const fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    /// Performs a single request without retry logic.
    async fn fetch_once(&self, url: &str) -> Result<String> {
        let mut request = self.client.get(url);
        for (name, value) in &self.settings.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        tracing::trace!(status = status.as_u16(), "Received response");
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Http(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        if body.is_empty() {
            return Err(FetchError::EmptyBody);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Fetch for HttpFetcher {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<String> {
        let attempts = self.settings.retries + 1;
        let mut last_error = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                tokio::time::sleep(self.settings.backoff).await;
            }

            match self.fetch_once(url).await {
                Ok(body) => {
                    tracing::debug!(attempt, bytes = body.len(), "Fetched document");
                    return Ok(body);
                }
                Err(e) => {
                    let retryable = e.is_retryable();
                    if retryable && attempt + 1 < attempts {
                        tracing::warn!(attempt, error = %e, "Fetch failed, retrying");
                    } else {
                        tracing::debug!(attempt, error = %e, "Fetch attempt failed");
                    }
                    last_error = Some(e);
                    if !retryable {
                        break;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| FetchError::Network("No attempts made".to_string())))
    }
}
