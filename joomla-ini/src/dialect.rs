//! The two flavours of Joomla `.ini` files.
//!
//! Joomla 1.5 files store values bare and write double quotes as `&quot;`.
//! Starting with 1.6, values are wrapped in double quotes and inner quotes are
//! written as `"_QQ_"`. 1.6+ files are recognised by a leading `;`.

use std::{
    fmt::{Display, Formatter},
    ops::Range,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::escape;

/// Character that marks a Joomla 1.6+ file when it opens the content.
pub const MODERN_MARKER: char = ';';

/// Format flavour of a single file, decided once from its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Joomla 1.5: bare values, `&quot;` for quotes.
    #[default]
    Legacy,
    /// Joomla 1.6+: quoted values, `"_QQ_"` for inner quotes.
    Modern,
}

impl Dialect {
    /// Classifies `content` by its first character.
    ///
    /// ```rust
    /// use joomla_ini::Dialect;
    /// assert_eq!(Dialect::detect(";header\nFOO=\"bar\""), Dialect::Modern);
    /// assert_eq!(Dialect::detect("FOO=bar"), Dialect::Legacy);
    /// assert_eq!(Dialect::detect(""), Dialect::Legacy);
    /// ```
    pub fn detect(content: &str) -> Self {
        match content.chars().next() {
            Some(MODERN_MARKER) => Dialect::Modern,
            _ => Dialect::Legacy,
        }
    }

    /// Escapes double quotes inside a translation.
    pub fn escape(&self, text: &str) -> String {
        match self {
            Dialect::Legacy => escape::escape_entity_quotes(text),
            Dialect::Modern => escape::escape_qq_quotes(text),
        }
    }

    /// Reverses [`Dialect::escape`].
    pub fn unescape(&self, text: &str) -> String {
        match self {
            Dialect::Legacy => escape::unescape_entity_quotes(text),
            Dialect::Modern => escape::unescape_qq_quotes(text),
        }
    }

    /// Byte range inside `raw_value` that holds the translation.
    ///
    /// For 1.6+ files the wrapping quotes are excluded, so substituting into
    /// the span keeps them in place. Returns `None` when a 1.6+ value is not
    /// wrapped in quotes.
    pub fn value_span(&self, raw_value: &str) -> Option<Range<usize>> {
        match self {
            Dialect::Legacy => Some(0..raw_value.len()),
            Dialect::Modern => {
                let quoted =
                    raw_value.len() >= 2 && raw_value.starts_with('"') && raw_value.ends_with('"');
                quoted.then(|| 1..raw_value.len() - 1)
            }
        }
    }

    /// Extracts the translation from the raw right-hand side of an assignment.
    ///
    /// The result still carries backslash escapes; see
    /// [`escape::unescape_backslashes`].
    pub fn get_translation(&self, raw_value: &str) -> Option<String> {
        self.value_span(raw_value)
            .map(|span| self.unescape(&raw_value[span]))
    }

    /// Prepares a translation for writing into a template span.
    ///
    /// Wrapping quotes are never added; they belong to the template.
    pub fn get_compilation(&self, text: &str) -> String {
        self.escape(text)
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Legacy => write!(f, "legacy"),
            Dialect::Modern => write!(f, "modern"),
        }
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "1.5" => Ok(Dialect::Legacy),
            "modern" | "1.6" => Ok(Dialect::Modern),
            other => Err(format!("unknown Joomla ini dialect `{}`", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(Dialect::detect(";comment\nFOO=\"bar\""), Dialect::Modern);
        assert_eq!(Dialect::detect("# comment\nFOO=bar"), Dialect::Legacy);
        assert_eq!(Dialect::detect("FOO=bar"), Dialect::Legacy);
        assert_eq!(Dialect::detect(""), Dialect::Legacy);
        // Leading whitespace is not skipped.
        assert_eq!(Dialect::detect(" ;comment"), Dialect::Legacy);
    }

    #[test]
    fn test_legacy_translation() {
        let dialect = Dialect::Legacy;
        assert_eq!(
            dialect.get_translation("&quot;bar&quot;").as_deref(),
            Some("\"bar\"")
        );
        assert_eq!(dialect.get_compilation("\"bar\""), "&quot;bar&quot;");
        assert_eq!(dialect.value_span("abc"), Some(0..3));
    }

    #[test]
    fn test_modern_translation() {
        let dialect = Dialect::Modern;
        assert_eq!(dialect.get_translation("\"bar\"").as_deref(), Some("bar"));
        assert_eq!(
            dialect.get_translation(r#""say "_QQ_"hi"_QQ_"""#).as_deref(),
            Some("say \"hi\"")
        );
        assert_eq!(
            dialect.get_translation("\"&quot;old&quot;\"").as_deref(),
            Some("\"old\"")
        );
        assert_eq!(dialect.get_translation("\"\"").as_deref(), Some(""));
    }

    #[test]
    fn test_modern_requires_quotes() {
        let dialect = Dialect::Modern;
        assert_eq!(dialect.get_translation("bar"), None);
        assert_eq!(dialect.get_translation("\""), None);
        assert_eq!(dialect.get_translation("\"bar"), None);
        assert_eq!(dialect.value_span("\"bar\""), Some(1..4));
    }

    #[test]
    fn test_modern_compilation_does_not_wrap() {
        assert_eq!(Dialect::Modern.get_compilation("bar"), "bar");
        assert_eq!(Dialect::Modern.get_compilation("a\"b"), "a\"_QQ_\"b");
    }

    #[test]
    fn test_display_and_from_str() {
        assert_eq!(Dialect::Legacy.to_string(), "legacy");
        assert_eq!(Dialect::Modern.to_string(), "modern");
        assert_eq!("Modern".parse::<Dialect>(), Ok(Dialect::Modern));
        assert_eq!("1.5".parse::<Dialect>(), Ok(Dialect::Legacy));
        assert!("2.5".parse::<Dialect>().is_err());
    }
}
