//! Bounded-concurrency fan-out over many documents.

use crate::{AggregateState, DocumentProcessor};
use graphsniper_types::DocumentResult;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Default number of documents processed at once.
pub const DEFAULT_WORKERS: usize = 20;

/// When per-document results are folded into the aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeOrder {
    /// As each document finishes. Which document "wins" a shared operation
    /// name depends on network timing.
    #[default]
    Completion,
    /// In the order the URLs were given, after every document finishes.
    /// Reproducible across runs for the same URL list and responses.
    Submission,
}

/// Progress hooks, called from the merge loop.
pub trait PipelineObserver {
    /// Called after each merge with the document's URL and the state so far.
    fn on_merged(&mut self, _url: &str, _state: &AggregateState) {}
}

impl PipelineObserver for () {}

/// Runs a [`DocumentProcessor`] over a list of URLs.
#[derive(Debug, Clone)]
pub struct Pipeline {
    processor: Arc<DocumentProcessor>,
    workers: usize,
    merge_order: MergeOrder,
}

impl Pipeline {
    #[must_use]
    pub fn new(processor: DocumentProcessor) -> Self {
        Self {
            processor: Arc::new(processor),
            workers: DEFAULT_WORKERS,
            merge_order: MergeOrder::default(),
        }
    }

    /// Maximum concurrent documents; values below 1 are treated as 1.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    #[must_use]
    pub const fn with_merge_order(mut self, merge_order: MergeOrder) -> Self {
        self.merge_order = merge_order;
        self
    }

    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    /// Process every URL and return the merged state.
    pub async fn run(&self, urls: &[String]) -> AggregateState {
        self.run_with_observer(urls, &mut ()).await
    }

    /// Like [`run`](Self::run), reporting each merge to `observer`.
    #[tracing::instrument(skip_all, fields(documents = urls.len(), workers = self.workers))]
    pub async fn run_with_observer(
        &self,
        urls: &[String],
        observer: &mut (dyn PipelineObserver + Send),
    ) -> AggregateState {
        let permits = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();

        for (index, url) in urls.iter().enumerate() {
            let permits = Arc::clone(&permits);
            let processor = Arc::clone(&self.processor);
            let url = url.clone();
            tasks.spawn(async move {
                // Never closed, so `acquire_owned` cannot fail here.
                let _permit = permits.acquire_owned().await.ok();
                let result = processor.process(&url).await;
                (index, result)
            });
        }

        let mut state = AggregateState::new();
        let mut buffered: Vec<Option<DocumentResult>> = match self.merge_order {
            MergeOrder::Completion => Vec::new(),
            MergeOrder::Submission => vec![None; urls.len()],
        };

        while let Some(joined) = tasks.join_next().await {
            let (index, result) = match joined {
                Ok(done) => done,
                Err(e) => {
                    // The URL is lost with the task; count it as an empty
                    // document so progress still reaches the total.
                    tracing::warn!(error = %e, "Document task panicked");
                    state.merge(DocumentResult::empty());
                    observer.on_merged("", &state);
                    continue;
                }
            };

            match self.merge_order {
                MergeOrder::Completion => {
                    state.merge(result);
                    observer.on_merged(&urls[index], &state);
                }
                MergeOrder::Submission => buffered[index] = Some(result),
            }
        }

        for (index, result) in buffered.into_iter().enumerate() {
            if let Some(result) = result {
                state.merge(result);
                observer.on_merged(&urls[index], &state);
            }
        }

        tracing::info!(
            documents = state.documents_merged(),
            queries = state.queries().len(),
            mutations = state.mutations().len(),
            endpoints = state.endpoint_counts().len(),
            "Pipeline finished"
        );
        state
    }
}
