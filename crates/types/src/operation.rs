//! Operation types: [`OperationKind`], [`RawOperation`].

use std::sync::Arc;

/// The kind of a named GraphQL operation found in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    /// Parse an operation keyword, ignoring ASCII case.
    ///
    /// Returns `None` for anything other than `query` or `mutation`.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("query") {
            Some(Self::Query)
        } else if keyword.eq_ignore_ascii_case("mutation") {
            Some(Self::Mutation)
        } else {
            None
        }
    }

    /// The lower-case GraphQL keyword for this kind.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A named operation as it was sliced out of a document.
///
/// `raw_text` spans from the operation keyword through the closing brace
/// of its selection set. It is brace-balanced but otherwise unverified:
/// it may not parse as GraphQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOperation {
    pub kind: OperationKind,
    pub name: Arc<str>,
    pub raw_text: Arc<str>,
}

impl RawOperation {
    #[must_use]
    pub fn new(kind: OperationKind, name: impl Into<Arc<str>>, raw_text: impl Into<Arc<str>>) -> Self {
        Self {
            kind,
            name: name.into(),
            raw_text: raw_text.into(),
        }
    }
}
