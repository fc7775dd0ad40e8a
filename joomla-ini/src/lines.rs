//! Line splitting and classification.
//!
//! A Joomla `.ini` file is a flat sequence of `KEY=value` lines, comments and
//! blank lines. The separator is detected once per file and every line is
//! split on it, so joining the lines back with the same separator reproduces
//! the content exactly.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Markers that open a comment line. `#` is used by 1.5 files, `;` by 1.6+.
pub const COMMENT_MARKERS: [char; 2] = ['#', ';'];

/// Line ending used throughout a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSeparator {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl LineSeparator {
    /// Picks the separator used by `content`, defaulting to `\n`.
    pub fn detect(content: &str) -> Self {
        if content.contains("\r\n") {
            LineSeparator::CrLf
        } else if content.contains('\n') {
            LineSeparator::Lf
        } else if content.contains('\r') {
            LineSeparator::Cr
        } else {
            LineSeparator::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineSeparator::Lf => "\n",
            LineSeparator::CrLf => "\r\n",
            LineSeparator::Cr => "\r",
        }
    }
}

impl Display for LineSeparator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single line of a Joomla `.ini` file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    /// A comment; `body` is everything after the marker.
    Comment { marker: char, body: &'a str },
    /// `key` is left of the first `=`, `value` is the raw remainder.
    Assignment { key: &'a str, value: &'a str },
    /// Neither blank nor a comment, and without any `=`.
    Unparsable,
}

impl<'a> LineKind<'a> {
    pub fn classify(line: &'a str) -> Self {
        let Some(first) = line.chars().next() else {
            return LineKind::Blank;
        };
        if COMMENT_MARKERS.contains(&first) {
            return LineKind::Comment {
                marker: first,
                body: &line[first.len_utf8()..],
            };
        }
        match line.split_once('=') {
            Some((key, value)) => LineKind::Assignment { key, value },
            None => LineKind::Unparsable,
        }
    }
}

/// One logical line together with its 1-based position in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
    pub kind: LineKind<'a>,
}

/// Iterator over the classified lines of a file.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Split<'a, &'static str>>,
}

impl<'a> Lines<'a> {
    pub fn new(content: &'a str, separator: LineSeparator) -> Self {
        Lines {
            inner: content.split(separator.as_str()).enumerate(),
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(index, text)| Line {
            number: index + 1,
            text,
            kind: LineKind::classify(text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_separator() {
        assert_eq!(LineSeparator::detect("a=1\r\nb=2"), LineSeparator::CrLf);
        assert_eq!(LineSeparator::detect("a=1\nb=2\r\n"), LineSeparator::CrLf);
        assert_eq!(LineSeparator::detect("a=1\nb=2"), LineSeparator::Lf);
        assert_eq!(LineSeparator::detect("a=1\rb=2"), LineSeparator::Cr);
        assert_eq!(LineSeparator::detect("a=1"), LineSeparator::Lf);
        assert_eq!(LineSeparator::detect(""), LineSeparator::Lf);
    }

    #[test]
    fn test_classify() {
        assert_eq!(LineKind::classify(""), LineKind::Blank);
        assert_eq!(
            LineKind::classify("# note"),
            LineKind::Comment {
                marker: '#',
                body: " note"
            }
        );
        assert_eq!(
            LineKind::classify(";note"),
            LineKind::Comment {
                marker: ';',
                body: "note"
            }
        );
        assert_eq!(
            LineKind::classify("FOO=bar=baz"),
            LineKind::Assignment {
                key: "FOO",
                value: "bar=baz"
            }
        );
        assert_eq!(
            LineKind::classify("FOO="),
            LineKind::Assignment {
                key: "FOO",
                value: ""
            }
        );
        assert_eq!(LineKind::classify("NOEQUALSIGN"), LineKind::Unparsable);
        // Whitespace-only lines are not blank: they hold no `=` either.
        assert_eq!(LineKind::classify("   "), LineKind::Unparsable);
    }

    #[test]
    fn test_lines_rejoin_to_content() {
        for content in ["a=1\nb=2\n", "a=1\r\n\r\n# c\r\nb=2", "", "\n\n", "x=1\ry=2\r"] {
            let separator = LineSeparator::detect(content);
            let rejoined = Lines::new(content, separator)
                .map(|line| line.text)
                .collect::<Vec<_>>()
                .join(separator.as_str());
            assert_eq!(rejoined, content);
        }
    }

    #[test]
    fn test_line_numbers() {
        let lines = Lines::new("a=1\n\nb=2", LineSeparator::Lf).collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[1].kind, LineKind::Blank);
        assert_eq!(lines[2].number, 3);
        assert_eq!(
            lines[2].kind,
            LineKind::Assignment {
                key: "b",
                value: "2"
            }
        );
    }
}
