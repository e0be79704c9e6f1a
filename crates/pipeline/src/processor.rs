//! Per-document work: fetch, beautify, persist, extract.

use crate::persist::persist_name;
use crate::{Beautify, Persist};
use graphsniper_extract::extract_document;
use graphsniper_fetch::Fetch;
use graphsniper_types::DocumentResult;
use std::sync::Arc;

/// Turns one document URL into a [`DocumentResult`].
///
/// Never fails: a document that cannot be fetched yields an empty result.
#[derive(Clone)]
pub struct DocumentProcessor {
    fetcher: Arc<dyn Fetch>,
    beautifier: Arc<dyn Beautify>,
    store: Arc<dyn Persist>,
}

impl std::fmt::Debug for DocumentProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentProcessor").finish_non_exhaustive()
    }
}

impl DocumentProcessor {
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn Fetch>,
        beautifier: Arc<dyn Beautify>,
        store: Arc<dyn Persist>,
    ) -> Self {
        Self {
            fetcher,
            beautifier,
            store,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn process(&self, url: &str) -> DocumentResult {
        let body = match self.fetcher.fetch(url).await {
            Ok(body) if !body.is_empty() => body,
            Ok(_) => {
                tracing::debug!("Empty document");
                return DocumentResult::empty();
            }
            Err(e) => {
                tracing::debug!(error = %e, "Fetch failed");
                return DocumentResult::empty();
            }
        };

        // Beautify, persist and extract are synchronous and may be slow on
        // large bundles, so they run off the async workers.
        let beautifier = Arc::clone(&self.beautifier);
        let store = Arc::clone(&self.store);
        let name = persist_name(url);
        let work = tokio::task::spawn_blocking(move || {
            let text = beautifier.beautify(&body).unwrap_or(body);
            store.persist(&name, &text);
            extract_document(&text)
        });

        match work.await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "Extraction task failed");
                DocumentResult::empty()
            }
        }
    }
}
