//! Text-level extraction of GraphQL operations from JavaScript bundles.
//!
//! Nothing here parses JavaScript. Operations are located with a keyword
//! pattern and sliced out with a brace counter, and endpoints are picked
//! from quoted string literals. Both work equally well on minified and
//! beautified sources.
//!
//! ```
//! use graphsniper_extract::extract_document;
//!
//! let js = r#"const Q = gql`query GetUser($id: ID!) { user(id: $id) { name } }`;
//! fetch("/api/graphql");"#;
//! let result = extract_document(js);
//! assert!(result.queries.contains_key("GetUser"));
//! assert_eq!(result.endpoints.len(), 1);
//! ```

mod endpoints;
mod operations;
mod scanner;

pub use endpoints::{find_endpoints, looks_like_endpoint, normalize_endpoint};
pub use operations::{extract_operations, MAX_OPERATION_LEN};
pub use scanner::balanced_block;

use graphsniper_types::DocumentResult;

/// Run operation and endpoint extraction over one document's text.
#[tracing::instrument(skip(text), fields(len = text.len()))]
pub fn extract_document(text: &str) -> DocumentResult {
    let mut result = extract_operations(text);
    result.endpoints = find_endpoints(text);
    tracing::debug!(
        queries = result.queries.len(),
        mutations = result.mutations.len(),
        endpoints = result.endpoints.len(),
        "Document extracted"
    );
    result
}
