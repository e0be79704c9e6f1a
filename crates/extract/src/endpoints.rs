//! Endpoint candidate detection.

use graphsniper_types::Endpoint;
use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;

/// A single- or double-quoted literal mentioning `graphql` anywhere.
static QUOTED_GRAPHQL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)["']([^"']*graphql[^"']*)["']"#).expect("endpoint pattern is valid")
});

/// Characters that mark a match as a code fragment rather than a literal.
const STRUCTURAL_CHARS: &[char] = &['{', '}', '(', ')', ';', '=', '<', '>', '\t', '\n'];

const MIN_ENDPOINT_LEN: usize = 5;

/// Returns `true` if a string literal plausibly names a GraphQL endpoint.
///
/// The value must mention `graphql`, be free of structural punctuation, be
/// at least five characters long, and look like an absolute, protocol-
/// relative or root-relative URL.
#[must_use]
pub fn looks_like_endpoint(candidate: &str) -> bool {
    let candidate = candidate.trim();
    if candidate.chars().count() < MIN_ENDPOINT_LEN {
        return false;
    }
    if candidate.contains(STRUCTURAL_CHARS) {
        return false;
    }
    let url_like = ["http://", "https://", "//", "/"]
        .iter()
        .any(|prefix| candidate.starts_with(prefix));
    url_like && candidate.to_ascii_lowercase().contains("graphql")
}

/// Give protocol-relative URLs an explicit `https:` scheme.
#[must_use]
pub fn normalize_endpoint(candidate: &str) -> Endpoint {
    if candidate.starts_with("//") {
        Endpoint::new(format!("https:{candidate}"))
    } else {
        Endpoint::new(candidate)
    }
}

/// Find endpoint candidates in a document, deduplicated in first-seen order.
#[must_use]
pub fn find_endpoints(text: &str) -> IndexSet<Endpoint> {
    QUOTED_GRAPHQL
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|literal| literal.as_str().trim())
        .filter(|literal| looks_like_endpoint(literal))
        .map(normalize_endpoint)
        .collect()
}
