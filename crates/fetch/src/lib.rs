//! Document fetching for graphsniper.
//!
//! The pipeline only depends on the [`Fetch`] trait. [`HttpFetcher`] is the
//! production implementation: a shared `reqwest` client with per-request
//! timeouts and a small, fixed number of retries.
//!
//! ```no_run
//! use graphsniper_fetch::{Fetch, FetchSettings, HttpFetcher};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = HttpFetcher::new(
//!     FetchSettings::new()
//!         .with_timeout(Duration::from_secs(8))
//!         .with_retries(1),
//! )?;
//! let body = fetcher.fetch("https://example.com/static/app.js").await?;
//! println!("{} bytes", body.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;

pub use client::{FetchSettings, HttpFetcher};
pub use error::{FetchError, Result};

/// Something that can turn a document URL into its text.
///
/// Implementations handle their own retries; an `Err` is final.
#[async_trait::async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}
