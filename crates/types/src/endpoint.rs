//! Endpoint candidate type.

use std::sync::Arc;

/// A string literal that looks like a GraphQL HTTP endpoint.
///
/// Values are already normalized: protocol-relative URLs (`//host/graphql`)
/// carry an explicit `https:` scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Endpoint(Arc<str>);

impl Endpoint {
    /// Create an endpoint from an already-normalized string.
    #[must_use]
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Endpoint {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
