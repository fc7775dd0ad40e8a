//! Escaping rules for Joomla `.ini` values.
//!
//! Two independent layers are applied to a value:
//!
//! - the quote layer, which differs per dialect (`&quot;` for 1.5 files,
//!   `"_QQ_"` for 1.6+ files), and
//! - the backslash layer, shared by both dialects, which turns real newlines
//!   and carriage returns into `\n` and `\r`.
//!
//! The backslash layer only doubles a backslash when leaving it alone would
//! make it read back as an escape sequence, so values such as `C:\temp`
//! survive a parse/compile round trip untouched.

/// HTML entity used by Joomla 1.5 files for a double quote.
pub const QUOT_ENTITY: &str = "&quot;";

/// Placeholder used by Joomla 1.6+ files for a double quote inside a value.
pub const QQ_PLACEHOLDER: &str = "\"_QQ_\"";

/// Escapes double quotes the Joomla 1.5 way.
pub fn escape_entity_quotes(value: &str) -> String {
    value.replace('"', QUOT_ENTITY)
}

/// Reverses [`escape_entity_quotes`].
pub fn unescape_entity_quotes(value: &str) -> String {
    value.replace(QUOT_ENTITY, "\"")
}

/// Escapes double quotes the Joomla 1.6+ way.
pub fn escape_qq_quotes(value: &str) -> String {
    value.replace('"', QQ_PLACEHOLDER)
}

/// Reverses [`escape_qq_quotes`].
///
/// Legacy `&quot;` entities are decoded as well, since 1.6+ files converted
/// from 1.5 still carry them.
pub fn unescape_qq_quotes(value: &str) -> String {
    value.replace(QUOT_ENTITY, "\"").replace(QQ_PLACEHOLDER, "\"")
}

/// Turns newlines and carriage returns into `\n` / `\r` sequences.
pub fn escape_backslashes(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\\' => {
                // Only double the backslash if it would otherwise be read back
                // as the start of an escape sequence.
                let ambiguous = matches!(chars.peek(), Some('n' | 'r' | '\\' | '\n' | '\r'));
                out.push('\\');
                if ambiguous {
                    out.push('\\');
                }
            }
            other => out.push(other),
        }
    }

    out
}

/// Turns `\n`, `\r` and `\\` sequences back into the characters they stand for.
/// Any other backslash is kept verbatim.
pub fn unescape_backslashes(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('n') => {
                out.push('\n');
                chars.next();
            }
            Some('r') => {
                out.push('\r');
                chars.next();
            }
            Some('\\') => {
                out.push('\\');
                chars.next();
            }
            _ => out.push('\\'),
        }
    }

    out
}
