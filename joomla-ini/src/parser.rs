//! Parsing of Joomla `.ini` content into translation entries.
//!
//! Source mode turns every non-blank value into an entry and builds a
//! skeleton: the file with each of those values replaced by a hash-tag
//! placeholder. Translation mode keeps only values whose key the source lookup
//! knows about, and skips empty ones.
//!
//! Broken lines are reported as diagnostics and skipped; they never abort the
//! parse.

use std::borrow::Cow;

use serde::Serialize;

use crate::{
    accumulator::{EntryAccumulator, KeyVariantMap, RegisterError},
    codec::decode,
    diagnostics::{DiagnosticKind, Diagnostics},
    dialect::Dialect,
    error::Error,
    escape::unescape_backslashes,
    hash::placeholder,
    lines::{LineKind, LineSeparator, Lines},
    options::ParseOptions,
    traits::{EntrySink, SourceLookup},
    types::{PluralRule, TranslationEntry},
};

/// Everything a parse produces.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedFile {
    pub dialect: Dialect,
    pub line_separator: LineSeparator,
    /// Accepted entries in file order; a duplicated key sits at the position
    /// of its last occurrence.
    pub entries: Vec<TranslationEntry>,
    /// Source mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skeleton: Option<String>,
    pub diagnostics: Diagnostics,
    #[serde(skip)]
    pub variants: KeyVariantMap,
}

impl ParsedFile {
    pub fn find_entry(&self, key: &str) -> Option<&TranslationEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Hands every entry to `sink`, in order.
    pub fn drain_into<S: EntrySink + ?Sized>(&mut self, sink: &mut S) {
        for entry in self.entries.drain(..) {
            sink.register(entry);
        }
    }
}

/// A parsed source file answers lookups for its own keys.
impl SourceLookup for ParsedFile {
    fn exists(&self, _resource: &str, key: &str) -> bool {
        self.variants.contains_key(key)
    }
}

/// Parses `content` according to `options`.
///
/// `lookup` is only consulted in translation mode.
///
/// # Example
///
/// ```rust
/// use joomla_ini::{parse, ParseOptions};
///
/// let parsed = parse("FOO=Foo\nBAR=\n", &ParseOptions::source(), &|_: &str, _: &str| true)?;
/// assert_eq!(parsed.entries.len(), 1);
/// assert!(parsed.skeleton.unwrap().starts_with("FOO="));
/// # Ok::<(), joomla_ini::Error>(())
/// ```
pub fn parse<L>(content: &str, options: &ParseOptions, lookup: &L) -> Result<ParsedFile, Error>
where
    L: SourceLookup + ?Sized,
{
    let is_source = options.is_source();
    let dialect = Dialect::detect(content);
    let line_separator = LineSeparator::detect(content);
    tracing::debug!(%dialect, mode = ?options.mode, "parsing Joomla ini content");

    let mut accumulator = EntryAccumulator::new();
    let mut diagnostics = Diagnostics::new();
    let mut skeleton: Vec<Cow<'_, str>> = Vec::new();
    let mut pending_comment = "";

    for line in Lines::new(content, line_separator) {
        let (key, value) = match line.kind {
            LineKind::Assignment { key, value } => (key, value),
            LineKind::Blank => {
                pending_comment = "";
                if is_source {
                    skeleton.push(Cow::Borrowed(line.text));
                }
                continue;
            }
            LineKind::Comment { body, .. } => {
                pending_comment = if is_source { body } else { "" };
                if is_source {
                    skeleton.push(Cow::Borrowed(line.text));
                }
                continue;
            }
            LineKind::Unparsable => {
                pending_comment = "";
                diagnostics.warn(
                    line.number,
                    DiagnosticKind::MissingSeparator,
                    format!("could not parse line \"{}\", skipping", line.text),
                );
                if is_source {
                    skeleton.push(Cow::Borrowed(line.text));
                }
                continue;
            }
        };
        let comment = std::mem::take(&mut pending_comment);

        if key.is_empty() {
            diagnostics.warn(
                line.number,
                DiagnosticKind::EmptySourceKey,
                format!("line \"{}\" has no key, skipping", line.text),
            );
            if is_source {
                skeleton.push(Cow::Borrowed(line.text));
            }
            continue;
        }

        let Some(span) = dialect.value_span(value) else {
            diagnostics.warn(
                line.number,
                DiagnosticKind::UnquotedValue,
                format!("value of `{}` is not wrapped in double quotes, skipping", key),
            );
            if is_source {
                skeleton.push(Cow::Borrowed(line.text));
            }
            continue;
        };
        let text = unescape_backslashes(&dialect.unescape(&value[span.clone()]));

        if is_source {
            if text.trim().is_empty() {
                // Untranslated placeholder in the source file.
                skeleton.push(Cow::Borrowed(line.text));
                continue;
            }
            let value_start = key.len() + 1;
            skeleton.push(Cow::Owned(format!(
                "{}{}{}",
                &line.text[..value_start + span.start],
                placeholder(key, ""),
                &line.text[value_start + span.end..]
            )));
        } else if !lookup.exists(&options.resource, key) {
            diagnostics.warn(
                line.number,
                DiagnosticKind::UnknownSourceKey,
                format!("key `{}` does not exist in the source file, skipping", key),
            );
            continue;
        } else if text.trim().is_empty() {
            diagnostics.warn(
                line.number,
                DiagnosticKind::EmptyTranslation,
                format!("key `{}` has no translation, skipping", key),
            );
            continue;
        }

        match accumulator.register(key, text, PluralRule::Other, comment) {
            Ok(Some(previous)) => {
                tracing::debug!(key, line = line.number, previous = %previous.translation, "replacing duplicate key");
            }
            Ok(None) => {}
            Err(RegisterError::EmptyKey) => diagnostics.warn(
                line.number,
                DiagnosticKind::EmptySourceKey,
                "entry has an empty key",
            ),
            Err(e) => diagnostics.warn(line.number, DiagnosticKind::InvalidEntry, e.to_string()),
        }
    }

    let (variants, entries) = accumulator.into_parts();
    Ok(ParsedFile {
        dialect,
        line_separator,
        entries: entries.into_vec(),
        skeleton: is_source.then(|| skeleton.join(line_separator.as_str())),
        diagnostics,
        variants,
    })
}

/// Parses the source-language file.
pub fn parse_source(content: &str) -> Result<ParsedFile, Error> {
    parse(content, &ParseOptions::source(), &|_: &str, _: &str| true)
}

/// Parses a translation of `resource`, keeping only keys `lookup` knows about.
pub fn parse_translation<L>(content: &str, resource: &str, lookup: &L) -> Result<ParsedFile, Error>
where
    L: SourceLookup + ?Sized,
{
    parse(content, &ParseOptions::translation(resource), lookup)
}

/// Parses raw bytes, decoding them first.
///
/// Fails with [`Error::Parse`] when the bytes are not valid text.
pub fn parse_bytes<L>(bytes: &[u8], options: &ParseOptions, lookup: &L) -> Result<ParsedFile, Error>
where
    L: SourceLookup + ?Sized,
{
    let content = decode(bytes)?;
    parse(&content, options, lookup)
}
