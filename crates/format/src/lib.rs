//! Canonical rendering of extracted GraphQL operations.
//!
//! Text sliced out of a JavaScript bundle is frequently not valid GraphQL:
//! fragments are interpolated at runtime, escapes are left in place, or the
//! brace scanner stopped early. [`format_operation`] tries a real parse
//! first and falls back to a purely textual cleanup, so every operation
//! yields some output.

mod heuristic;

use apollo_compiler::ast;

/// The rendered form of one operation, tagged with how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedOperation {
    /// The text parsed as GraphQL and was pretty-printed from its AST.
    Parsed { text: String, variables: Vec<String> },
    /// Parsing failed; the text was reflowed with regular expressions and
    /// the variables were pattern-matched.
    Heuristic { text: String, variables: Vec<String> },
}

impl FormattedOperation {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Parsed { text, .. } | Self::Heuristic { text, .. } => text,
        }
    }

    /// Declared variable names without the leading `$`, in declaration order.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        match self {
            Self::Parsed { variables, .. } | Self::Heuristic { variables, .. } => variables,
        }
    }

    #[must_use]
    pub const fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed { .. })
    }

    #[must_use]
    pub fn into_parts(self) -> (String, Vec<String>) {
        match self {
            Self::Parsed { text, variables } | Self::Heuristic { text, variables } => {
                (text, variables)
            }
        }
    }
}

/// Format a raw operation, falling back to the heuristic path on parse errors.
#[must_use]
pub fn format_operation(raw: &str) -> FormattedOperation {
    match ast::Document::parse(raw, "operation.graphql") {
        Ok(document) => {
            let text = document.to_string().trim().to_string();
            let variables = declared_variables(&document);
            FormattedOperation::Parsed { text, variables }
        }
        Err(with_errors) => {
            tracing::debug!(
                errors = with_errors.errors.len(),
                "Operation failed to parse, using heuristic formatting"
            );
            FormattedOperation::Heuristic {
                text: heuristic::reflow(raw),
                variables: heuristic::variables(raw),
            }
        }
    }
}

/// Variable names declared by every operation definition in the document.
fn declared_variables(document: &ast::Document) -> Vec<String> {
    document
        .definitions
        .iter()
        .filter_map(|definition| match definition {
            ast::Definition::OperationDefinition(operation) => Some(operation),
            _ => None,
        })
        .flat_map(|operation| operation.variables.iter())
        .map(|variable| variable.name.as_str().to_string())
        .collect()
}
