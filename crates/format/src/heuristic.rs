//! Regex-based formatting for operations that do not parse.

use regex::Regex;
use std::sync::LazyLock;

static OPEN_BRACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\{\s*").expect("open brace pattern is valid"));

static CLOSE_BRACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\}\s*").expect("close brace pattern is valid"));

static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$([A-Za-z0-9_]+)\s*:").expect("variable pattern is valid")
});

/// Unescape `\n` sequences and put braces on their own lines.
///
/// The result is readable but not guaranteed to be valid GraphQL.
pub(crate) fn reflow(raw: &str) -> String {
    let unescaped = raw.replace("\\n", "\n");
    let opened = OPEN_BRACE.replace_all(&unescaped, " {\n  ");
    CLOSE_BRACE.replace_all(&opened, "\n}").into_owned()
}

/// Every `$name:` token in the text, in order of appearance.
pub(crate) fn variables(raw: &str) -> Vec<String> {
    VARIABLE
        .captures_iter(raw)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflow_braces() {
        assert_eq!(reflow("query A{a{b}}"), "query A {\n  a {\n  b\n}\n}");
    }

    #[test]
    fn test_reflow_unescapes_newlines() {
        assert_eq!(reflow(r"query A\n{ a }"), "query A {\n  a\n}");
    }

    #[test]
    fn test_reflow_without_braces_is_unchanged() {
        assert_eq!(reflow("query A"), "query A");
    }

    #[test]
    fn test_variables_tolerate_spacing() {
        assert_eq!(variables("($a: Int, $b : String)"), vec!["a", "b"]);
    }

    #[test]
    fn test_variable_usages_are_not_declarations() {
        assert!(variables("{ user(id: $id) }").is_empty());
    }
}
