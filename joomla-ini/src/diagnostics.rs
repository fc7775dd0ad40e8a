//! Non-fatal problems found while parsing.
//!
//! A single broken line never aborts a parse. Instead it is recorded here and
//! mirrored to `tracing` at `warn` level, so callers can both inspect the
//! problems deterministically and see them in their logs.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Neither blank, a comment, nor a `KEY=value` assignment.
    MissingSeparator,
    /// A 1.6+ value that is not wrapped in double quotes.
    UnquotedValue,
    /// Translation-mode key unknown to the source lookup.
    UnknownSourceKey,
    /// Translation-mode value that is empty once trimmed.
    EmptyTranslation,
    /// Assignment with nothing left of the `=`.
    EmptySourceKey,
    /// The entry could not be registered.
    InvalidEntry,
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DiagnosticKind::MissingSeparator => "missing_separator",
            DiagnosticKind::UnquotedValue => "unquoted_value",
            DiagnosticKind::UnknownSourceKey => "unknown_source_key",
            DiagnosticKind::EmptyTranslation => "empty_translation",
            DiagnosticKind::EmptySourceKey => "empty_source_key",
            DiagnosticKind::InvalidEntry => "invalid_entry",
        };
        f.write_str(name)
    }
}

/// One recorded problem, tied to a 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {} ({})", self.line, self.message, self.kind)
    }
}

/// Ordered collection of diagnostics for one parse call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a problem and emits it as a `tracing` warning.
    pub fn warn(&mut self, line: usize, kind: DiagnosticKind, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            line,
            kind,
            message: message.into(),
        };
        tracing::warn!(line, kind = %kind, "{}", diagnostic.message);
        self.items.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// All diagnostics of the given kind, in line order.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.kind == kind)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
