//! Compilation of translations back into Joomla `.ini` content.
//!
//! The template is either a skeleton produced by a source-mode parse, or any
//! file of the same shape. Only the translation span of an assignment is ever
//! rewritten; comments, blank lines, keys, separators and the wrapping quotes
//! of 1.6+ values are copied through as they are.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet},
};

use serde::{Deserialize, Serialize};

use crate::{
    dialect::Dialect,
    error::Error,
    escape::escape_backslashes,
    hash::{hash_tag, is_hash_tag, parse_placeholder},
    lines::{LineKind, LineSeparator, Lines},
    options::{CompileOptions, Untranslated},
    types::TranslationEntry,
};

/// Replacement texts, addressed by source key or by hash tag.
///
/// Texts are unescaped; escaping for the template's dialect happens during
/// compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitutions {
    by_key: BTreeMap<String, String>,
    by_hash: BTreeMap<String, String>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_key(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.by_key.insert(key.into(), text.into());
    }

    pub fn insert_hash(&mut self, hash: impl Into<String>, text: impl Into<String>) {
        self.by_hash.insert(hash.into(), text.into());
    }

    /// Inserts under a hash tag when `reference` looks like one (bare or as a
    /// `<hash>_tr` placeholder), otherwise under a key. A key that is itself
    /// 32 lowercase hex characters still matches its line at compile time.
    pub fn insert(&mut self, reference: &str, text: impl Into<String>) {
        if let Some(hash) = parse_placeholder(reference) {
            self.insert_hash(hash, text);
        } else if is_hash_tag(reference) {
            self.insert_hash(reference, text);
        } else {
            self.insert_key(reference, text);
        }
    }

    /// Reads a JSON object mapping keys (or hash tags) to texts.
    ///
    /// ```rust
    /// use joomla_ini::Substitutions;
    /// let subs = Substitutions::from_json(r#"{"HELLO": "Bonjour"}"#)?;
    /// assert_eq!(subs.len(), 1);
    /// # Ok::<(), joomla_ini::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let map: BTreeMap<String, String> = serde_json::from_str(json)?;
        Ok(map.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.by_key.len() + self.by_hash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty() && self.by_hash.is_empty()
    }
}

impl<'a> FromIterator<&'a TranslationEntry> for Substitutions {
    fn from_iter<I: IntoIterator<Item = &'a TranslationEntry>>(iter: I) -> Self {
        let mut substitutions = Substitutions::new();
        for entry in iter {
            substitutions.insert_key(entry.key.clone(), entry.translation.clone());
        }
        substitutions
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Substitutions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut substitutions = Substitutions::new();
        for (reference, text) in iter {
            substitutions.insert(reference.as_ref(), text);
        }
        substitutions
    }
}

/// Writes `substitutions` into `template`.
///
/// Fails with [`Error::Compile`] when a placeholder sits on a line whose key
/// it does not belong to, when a substitution matches no line (strict mode),
/// or when a placeholder is left without translation and
/// [`Untranslated::Fail`] is set.
///
/// # Example
///
/// ```rust
/// use joomla_ini::{compile, parse_source, CompileOptions, Substitutions};
///
/// let parsed = parse_source(";\nGREETING=\"Hello\"")?;
/// let mut subs = Substitutions::new();
/// subs.insert_key("GREETING", "Say \"hi\"");
/// let compiled = compile(parsed.skeleton.as_deref().unwrap(), &subs, &CompileOptions::default())?;
/// assert_eq!(compiled, ";\nGREETING=\"Say \"_QQ_\"hi\"_QQ_\"\"");
/// # Ok::<(), joomla_ini::Error>(())
/// ```
pub fn compile(
    template: &str,
    substitutions: &Substitutions,
    options: &CompileOptions,
) -> Result<String, Error> {
    let dialect = Dialect::detect(template);
    let line_separator = LineSeparator::detect(template);
    tracing::debug!(%dialect, substitutions = substitutions.len(), "compiling Joomla ini content");

    let mut used_keys: BTreeSet<&str> = BTreeSet::new();
    let mut used_hashes: BTreeSet<&str> = BTreeSet::new();
    let mut output: Vec<Cow<'_, str>> = Vec::new();

    for line in Lines::new(template, line_separator) {
        let LineKind::Assignment { key, value } = line.kind else {
            output.push(Cow::Borrowed(line.text));
            continue;
        };
        let Some(span) = dialect.value_span(value) else {
            output.push(Cow::Borrowed(line.text));
            continue;
        };

        let placeholder_hash = parse_placeholder(&value[span.clone()]);
        let line_hash = (placeholder_hash.is_some() || !substitutions.by_hash.is_empty())
            .then(|| hash_tag(key, ""));
        if let (Some(found), Some(expected)) = (placeholder_hash, line_hash.as_deref()) {
            if found != expected {
                return Err(Error::compile_error(format!(
                    "line {}: placeholder `{}` does not belong to key `{}`",
                    line.number, found, key
                )));
            }
        }

        let by_key = substitutions.by_key.get_key_value(key);
        let by_hash = line_hash
            .as_deref()
            .and_then(|hash| substitutions.by_hash.get_key_value(hash));
        // Keys that look like hash tags are filed under `by_hash` on insert.
        let by_hash_shaped_key = substitutions.by_hash.get_key_value(key);
        for (used, _) in [by_hash, by_hash_shaped_key].into_iter().flatten() {
            used_hashes.insert(used.as_str());
        }

        let replacement = if let Some((used, text)) = by_key {
            used_keys.insert(used.as_str());
            Some(text.as_str())
        } else if let Some((_, text)) = by_hash.or(by_hash_shaped_key) {
            Some(text.as_str())
        } else if placeholder_hash.is_some() {
            match options.untranslated {
                Untranslated::Blank => Some(""),
                Untranslated::Fail => {
                    return Err(Error::compile_error(format!(
                        "line {}: no translation for key `{}`",
                        line.number, key
                    )));
                }
            }
        } else {
            None
        };

        match replacement {
            Some(text) => {
                let value_start = key.len() + 1;
                output.push(Cow::Owned(format!(
                    "{}{}{}",
                    &line.text[..value_start + span.start],
                    dialect.get_compilation(&escape_backslashes(text)),
                    &line.text[value_start + span.end..]
                )));
            }
            None => output.push(Cow::Borrowed(line.text)),
        }
    }

    if options.strict {
        if let Some(key) = substitutions
            .by_key
            .keys()
            .find(|key| !used_keys.contains(key.as_str()))
        {
            return Err(Error::compile_error(format!(
                "no line of the template matches key `{}`",
                key
            )));
        }
        if let Some(hash) = substitutions
            .by_hash
            .keys()
            .find(|hash| !used_hashes.contains(hash.as_str()))
        {
            return Err(Error::compile_error(format!(
                "no line of the template matches placeholder `{}_tr`",
                hash
            )));
        }
    }

    Ok(output.join(line_separator.as_str()))
}

/// Compiles `entries` into `template`, keyed by their source keys.
pub fn compile_entries(
    template: &str,
    entries: &[TranslationEntry],
    options: &CompileOptions,
) -> Result<String, Error> {
    compile(template, &entries.iter().collect(), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::placeholder;

    fn subs(pairs: &[(&str, &str)]) -> Substitutions {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn test_legacy_skeleton_substitution() {
        let template = format!("# c\nFOO={}\nBAR=", placeholder("FOO", ""));
        let compiled = compile(
            &template,
            &subs(&[("FOO", "say \"hi\"")]),
            &CompileOptions::default(),
        )
        .unwrap();
        assert_eq!(compiled, "# c\nFOO=say &quot;hi&quot;\nBAR=");
    }

    #[test]
    fn test_modern_keeps_template_quotes() {
        let template = format!(";\nFOO=\"{}\"", placeholder("FOO", ""));
        let compiled = compile(
            &template,
            &subs(&[("FOO", "a\"b")]),
            &CompileOptions::default(),
        )
        .unwrap();
        assert_eq!(compiled, ";\nFOO=\"a\"_QQ_\"b\"");
    }

    #[test]
    fn test_substitute_by_hash() {
        let hash = hash_tag("FOO", "");
        let template = format!("FOO={}_tr", hash);
        let compiled = compile(
            &template,
            &subs(&[(hash.as_str(), "x")]),
            &CompileOptions::default(),
        )
        .unwrap();
        assert_eq!(compiled, "FOO=x");

        let by_placeholder = subs(&[(format!("{}_tr", hash).as_str(), "y")]);
        assert_eq!(
            compile(&template, &by_placeholder, &CompileOptions::default()).unwrap(),
            "FOO=y"
        );
    }

    #[test]
    fn test_key_and_hash_for_same_line() {
        let template = format!("FOO={}", placeholder("FOO", ""));
        let mut substitutions = Substitutions::new();
        substitutions.insert_key("FOO", "a");
        substitutions.insert_hash(hash_tag("FOO", ""), "b");
        assert_eq!(
            compile(&template, &substitutions, &CompileOptions::default()).unwrap(),
            "FOO=a"
        );
    }

    #[test]
    fn test_hash_shaped_key() {
        let key = "0123456789abcdef0123456789abcdef";
        let template = format!("{}={}\nBAR=bar", key, placeholder(key, ""));
        let compiled = compile(
            &template,
            &subs(&[(key, "translated")]),
            &CompileOptions::default(),
        )
        .unwrap();
        assert_eq!(compiled, format!("{}=translated\nBAR=bar", key));

        // Also when the line holds a value instead of a placeholder.
        let template = format!("{}=old", key);
        let compiled = compile(
            &template,
            &subs(&[(key, "new")]),
            &CompileOptions::default(),
        )
        .unwrap();
        assert_eq!(compiled, format!("{}=new", key));
    }

    #[test]
    fn test_newlines_are_escaped() {
        let template = format!("FOO={}", placeholder("FOO", ""));
        let compiled = compile(
            &template,
            &subs(&[("FOO", "one\ntwo")]),
            &CompileOptions::default(),
        )
        .unwrap();
        assert_eq!(compiled, r"FOO=one\ntwo");
    }

    #[test]
    fn test_original_file_as_template() {
        let template = "; header\nFOO=\"old\"\nBAR=\"keep\"\n";
        let compiled = compile(
            template,
            &subs(&[("FOO", "new")]),
            &CompileOptions::default(),
        )
        .unwrap();
        assert_eq!(compiled, "; header\nFOO=\"new\"\nBAR=\"keep\"\n");
    }

    #[test]
    fn test_unmatched_substitution_fails_in_strict_mode() {
        let template = "FOO=old";
        let err = compile(
            template,
            &subs(&[("MISSING", "x")]),
            &CompileOptions::default(),
        )
        .unwrap_err();
        assert!(err.is_compile());
        assert!(err.to_string().contains("MISSING"));

        let lenient = CompileOptions::default().with_strict(false);
        assert_eq!(
            compile(template, &subs(&[("MISSING", "x")]), &lenient).unwrap(),
            "FOO=old"
        );
    }

    #[test]
    fn test_foreign_placeholder_is_a_structural_error() {
        let template = format!("FOO={}", placeholder("BAR", ""));
        let err = compile(&template, &Substitutions::new(), &CompileOptions::default()).unwrap_err();
        assert!(err.is_compile());
    }

    #[test]
    fn test_untranslated_placeholder_policy() {
        let template = format!(";\nFOO=\"{}\"", placeholder("FOO", ""));
        assert_eq!(
            compile(&template, &Substitutions::new(), &CompileOptions::default()).unwrap(),
            ";\nFOO=\"\""
        );
        let fail = CompileOptions::default().with_untranslated(Untranslated::Fail);
        assert!(compile(&template, &Substitutions::new(), &fail).is_err());
    }

    #[test]
    fn test_compiling_compiled_output_is_idempotent() {
        let template = format!(
            "; header\r\nFOO=\"{}\"\r\n\r\nBAR=\"{}\"\r\n",
            placeholder("FOO", ""),
            placeholder("BAR", "")
        );
        let substitutions = subs(&[("FOO", "Foo \"quoted\""), ("BAR", "Bar\nbaz")]);
        let options = CompileOptions::default();
        let once = compile(&template, &substitutions, &options).unwrap();
        let twice = compile(&once, &substitutions, &options).unwrap();
        assert_eq!(once, twice);
        assert_eq!(
            once,
            "; header\r\nFOO=\"Foo \"_QQ_\"quoted\"_QQ_\"\"\r\n\r\nBAR=\"Bar\\nbaz\"\r\n"
        );
    }

    #[test]
    fn test_from_json_sorts_references() {
        let hash = hash_tag("FOO", "");
        let json = format!(r#"{{"BAR": "b", "{}": "f"}}"#, hash);
        let substitutions = Substitutions::from_json(&json).unwrap();
        assert_eq!(substitutions.by_key.get("BAR").map(String::as_str), Some("b"));
        assert_eq!(substitutions.by_hash.get(&hash).map(String::as_str), Some("f"));
        assert!(Substitutions::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_compile_entries() {
        let template = format!("FOO={}", placeholder("FOO", ""));
        let entries = vec![TranslationEntry::new("FOO", "bar")];
        assert_eq!(
            compile_entries(&template, &entries, &CompileOptions::default()).unwrap(),
            "FOO=bar"
        );
    }
}
