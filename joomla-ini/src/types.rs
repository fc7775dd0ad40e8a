//! Core types produced by parsing and consumed by compilation.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Plural variant a translation belongs to.
///
/// Joomla `.ini` files have no plural syntax, so everything parsed from them
/// lands in [`PluralRule::Other`]; the other rules exist so collaborators that
/// store plural variants can share the same model.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Clone, Copy, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PluralRule {
    Zero,
    One,
    Two,
    Few,
    Many,
    #[default]
    Other,
}

impl PluralRule {
    /// Numeric code used by translation stores (`Other` is 5).
    pub fn code(&self) -> u8 {
        match self {
            PluralRule::Zero => 0,
            PluralRule::One => 1,
            PluralRule::Two => 2,
            PluralRule::Few => 3,
            PluralRule::Many => 4,
            PluralRule::Other => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(PluralRule::Zero),
            1 => Some(PluralRule::One),
            2 => Some(PluralRule::Two),
            3 => Some(PluralRule::Few),
            4 => Some(PluralRule::Many),
            5 => Some(PluralRule::Other),
            _ => None,
        }
    }
}

impl FromStr for PluralRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ZERO" => Ok(PluralRule::Zero),
            "ONE" => Ok(PluralRule::One),
            "TWO" => Ok(PluralRule::Two),
            "FEW" => Ok(PluralRule::Few),
            "MANY" => Ok(PluralRule::Many),
            "OTHER" => Ok(PluralRule::Other),
            _ => Err(format!("Unknown plural rule: {}", s)),
        }
    }
}

/// A single translation extracted from a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct TranslationEntry {
    /// The source string (the left-hand side of `KEY=value`).
    pub key: String,

    /// The unescaped translation, with real newlines and carriage returns.
    pub translation: String,

    /// Always empty for Joomla files.
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(default)]
    pub context: String,

    /// Body of the comment line directly above the assignment, if any.
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(default)]
    pub comment: String,

    #[serde(default)]
    pub rule: PluralRule,
}

impl TranslationEntry {
    pub fn new(key: impl Into<String>, translation: impl Into<String>) -> Self {
        TranslationEntry {
            key: key.into(),
            translation: translation.into(),
            context: String::new(),
            comment: String::new(),
            rule: PluralRule::default(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_rule(mut self, rule: PluralRule) -> Self {
        self.rule = rule;
        self
    }
}

impl Display for TranslationEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TranslationEntry {{ key: {}, translation: {}, rule: {:?} }}",
            self.key, self.translation, self.rule
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_rule_codes() {
        assert_eq!(PluralRule::default(), PluralRule::Other);
        assert_eq!(PluralRule::Other.code(), 5);
        for code in 0..=5 {
            assert_eq!(PluralRule::from_code(code).unwrap().code(), code);
        }
        assert_eq!(PluralRule::from_code(6), None);
    }

    #[test]
    fn test_plural_rule_from_str() {
        assert_eq!("one".parse::<PluralRule>(), Ok(PluralRule::One));
        assert_eq!("OTHER".parse::<PluralRule>(), Ok(PluralRule::Other));
        assert!("several".parse::<PluralRule>().is_err());
    }

    #[test]
    fn test_entry_builder() {
        let entry = TranslationEntry::new("FOO", "bar").with_comment(" hint");
        assert_eq!(entry.key, "FOO");
        assert_eq!(entry.translation, "bar");
        assert_eq!(entry.context, "");
        assert_eq!(entry.comment, " hint");
        assert_eq!(entry.rule, PluralRule::Other);
    }

    #[test]
    fn test_entry_display() {
        let entry = TranslationEntry::new("FOO", "bar");
        assert_eq!(
            entry.to_string(),
            "TranslationEntry { key: FOO, translation: bar, rule: Other }"
        );
    }

    #[test]
    fn test_entry_serde_skips_empty_fields() {
        let entry = TranslationEntry::new("FOO", "bar");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["key"], "FOO");
        assert_eq!(json["rule"], "other");
        assert!(json.get("context").is_none());
        assert!(json.get("comment").is_none());

        let back: TranslationEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
