//! Named operation extraction.

use crate::scanner::balanced_block;
use graphsniper_types::{DocumentResult, OperationKind, RawOperation};
use regex::Regex;
use std::sync::LazyLock;

/// Operations longer than this many characters are dropped.
///
/// Such matches are almost always a keyword that happens to precede an
/// unrelated brace, with the scanner running on through the rest of the
/// bundle.
pub const MAX_OPERATION_LEN: usize = 30_000;

/// `query Name(...) {` / `mutation Name {`, keyword case-insensitive.
static OPERATION_SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(query|mutation)\s+([A-Za-z0-9_]+)\s*(\([^)]*\))?\s*\{")
        .expect("operation signature pattern is valid")
});

/// Extract named queries and mutations from a document's text.
///
/// Within one document the first occurrence of a name wins for each kind;
/// later definitions with the same name are ignored. Endpoints are left
/// empty in the returned result.
#[must_use]
pub fn extract_operations(text: &str) -> DocumentResult {
    let mut result = DocumentResult::empty();

    for captures in OPERATION_SIGNATURE.captures_iter(text) {
        let (Some(signature), Some(keyword), Some(name)) =
            (captures.get(0), captures.get(1), captures.get(2))
        else {
            continue;
        };
        let Some(kind) = OperationKind::from_keyword(keyword.as_str()) else {
            continue;
        };

        // The signature ends with its own `{`; search from there.
        let search_from = signature.end() - 1;
        let Some(brace) = text[search_from..].find('{').map(|i| search_from + i) else {
            continue;
        };
        let Some(block) = balanced_block(text, brace) else {
            tracing::trace!(name = name.as_str(), "Unbalanced operation body");
            continue;
        };

        let mut raw_text = String::with_capacity(brace - signature.start() + block.len());
        raw_text.push_str(&text[signature.start()..brace]);
        raw_text.push_str(block);

        if raw_text.chars().count() > MAX_OPERATION_LEN {
            tracing::trace!(name = name.as_str(), len = raw_text.len(), "Oversized operation dropped");
            continue;
        }

        result.insert_operation(RawOperation::new(kind, name.as_str(), raw_text));
    }

    result
}
