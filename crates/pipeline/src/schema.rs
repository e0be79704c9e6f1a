//! The final, formatted output document.

use crate::AggregateState;
use graphsniper_format::format_operation;
use graphsniper_types::OperationMap;
use indexmap::IndexMap;
use serde::Serialize;

/// One formatted operation as it appears in the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationEntry {
    pub query: String,
    pub variables: Vec<String>,
}

/// The single artifact of a run.
///
/// Serializes as
/// `{ "endpoint": .., "queries": { name: { "query", "variables" } }, "mutations": { .. } }`
/// with operations in merge order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FinalSchema {
    pub endpoint: Option<String>,
    pub queries: IndexMap<String, OperationEntry>,
    pub mutations: IndexMap<String, OperationEntry>,
}

impl FinalSchema {
    /// Format every aggregated operation and pick the top endpoint.
    #[tracing::instrument(skip_all, fields(
        queries = state.queries().len(),
        mutations = state.mutations().len()
    ))]
    #[must_use]
    pub fn from_state(state: &AggregateState) -> Self {
        Self {
            endpoint: state.top_endpoint().map(ToString::to_string),
            queries: format_all(state.queries()),
            mutations: format_all(state.mutations()),
        }
    }
}

fn format_all(operations: &OperationMap) -> IndexMap<String, OperationEntry> {
    operations
        .iter()
        .map(|(name, operation)| {
            let formatted = format_operation(&operation.raw_text);
            if !formatted.is_parsed() {
                tracing::debug!(name = &**name, "Operation formatted heuristically");
            }
            let (query, variables) = formatted.into_parts();
            (name.to_string(), OperationEntry { query, variables })
        })
        .collect()
}
