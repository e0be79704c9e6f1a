//! Per-document extraction result.

use crate::{Endpoint, OperationKind, RawOperation};
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;

/// Operations keyed by name, in first-occurrence order.
pub type OperationMap = IndexMap<Arc<str>, RawOperation>;

/// Everything extracted from a single document.
///
/// An empty result is what a failed fetch produces; it merges as a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentResult {
    pub queries: OperationMap,
    pub mutations: OperationMap,
    pub endpoints: IndexSet<Endpoint>,
}

impl DocumentResult {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if nothing at all was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty() && self.mutations.is_empty() && self.endpoints.is_empty()
    }

    /// Operations of the given kind.
    #[must_use]
    pub fn operations(&self, kind: OperationKind) -> &OperationMap {
        match kind {
            OperationKind::Query => &self.queries,
            OperationKind::Mutation => &self.mutations,
        }
    }

    /// Insert an operation unless one with the same name and kind is
    /// already present. Returns `true` if it was inserted.
    pub fn insert_operation(&mut self, operation: RawOperation) -> bool {
        let map = match operation.kind {
            OperationKind::Query => &mut self.queries,
            OperationKind::Mutation => &mut self.mutations,
        };
        if map.contains_key(&operation.name) {
            return false;
        }
        map.insert(Arc::clone(&operation.name), operation);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_operation_keeps_first() {
        let mut result = DocumentResult::empty();
        assert!(result.insert_operation(RawOperation::new(
            OperationKind::Query,
            "Foo",
            "query Foo { a }"
        )));
        assert!(!result.insert_operation(RawOperation::new(
            OperationKind::Query,
            "Foo",
            "query Foo { b }"
        )));

        assert_eq!(result.queries.len(), 1);
        assert_eq!(&*result.queries["Foo"].raw_text, "query Foo { a }");
    }

    #[test]
    fn test_same_name_different_kind_are_independent() {
        let mut result = DocumentResult::empty();
        result.insert_operation(RawOperation::new(OperationKind::Query, "Foo", "query Foo { a }"));
        result.insert_operation(RawOperation::new(
            OperationKind::Mutation,
            "Foo",
            "mutation Foo { a }",
        ));

        assert_eq!(result.operations(OperationKind::Query).len(), 1);
        assert_eq!(result.operations(OperationKind::Mutation).len(), 1);
        assert!(!result.is_empty());
    }
}
