//! Cross-document accumulation of operations and endpoint counts.

use graphsniper_types::{DocumentResult, Endpoint, OperationMap};
use indexmap::IndexMap;

/// Everything merged so far.
///
/// Entries are only ever added. Operation names are first-seen wins, so the
/// order in which documents are merged decides which body is kept when two
/// documents disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateState {
    queries: OperationMap,
    mutations: OperationMap,
    endpoint_counts: IndexMap<Endpoint, usize>,
    documents_merged: usize,
}

impl AggregateState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one document's result into the state.
    pub fn merge(&mut self, result: DocumentResult) {
        for endpoint in result.endpoints {
            *self.endpoint_counts.entry(endpoint).or_insert(0) += 1;
        }
        for (name, operation) in result.queries {
            self.queries.entry(name).or_insert(operation);
        }
        for (name, operation) in result.mutations {
            self.mutations.entry(name).or_insert(operation);
        }
        self.documents_merged += 1;
    }

    /// The most frequently seen endpoint.
    ///
    /// Among equal counts the endpoint that entered the table first wins.
    #[must_use]
    pub fn top_endpoint(&self) -> Option<&Endpoint> {
        let mut best: Option<(&Endpoint, usize)> = None;
        for (endpoint, &count) in &self.endpoint_counts {
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((endpoint, count));
            }
        }
        best.map(|(endpoint, _)| endpoint)
    }

    #[must_use]
    pub const fn queries(&self) -> &OperationMap {
        &self.queries
    }

    #[must_use]
    pub const fn mutations(&self) -> &OperationMap {
        &self.mutations
    }

    #[must_use]
    pub const fn endpoint_counts(&self) -> &IndexMap<Endpoint, usize> {
        &self.endpoint_counts
    }

    /// Number of results merged, including empty ones.
    #[must_use]
    pub const fn documents_merged(&self) -> usize {
        self.documents_merged
    }
}
