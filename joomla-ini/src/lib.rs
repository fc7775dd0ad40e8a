#![forbid(unsafe_code)]
//! Parser and compiler for Joomla `.ini` translation files.
//!
//! Joomla language files are flat `KEY=value` lines with `#` / `;` comments.
//! Two dialects exist: 1.5 files store bare values and write quotes as
//! `&quot;`, while 1.6+ files (recognised by a leading `;`) wrap values in
//! double quotes and write inner quotes as `"_QQ_"`.
//!
//! # Quick Start
//!
//! ```rust
//! use joomla_ini::{compile, parse_source, parse_translation, CompileOptions, Substitutions};
//!
//! // Parse the source file: entries plus a skeleton with hash placeholders.
//! let source = parse_source("; Demo\nHELLO=\"Hello\"\nBYE=\"Bye\"\n")?;
//! assert_eq!(source.entries.len(), 2);
//!
//! // Parse a translation, keeping only keys the source file knows.
//! let fr = parse_translation("; Demo\nHELLO=\"Bonjour\"\nEXTRA=\"?\"\n", "com_demo", &source)?;
//! assert_eq!(fr.entries.len(), 1);
//!
//! // Compile the translation back into the skeleton.
//! let subs: Substitutions = fr.entries.iter().collect();
//! let compiled = compile(source.skeleton.as_deref().unwrap(), &subs, &CompileOptions::default())?;
//! assert_eq!(compiled, "; Demo\nHELLO=\"Bonjour\"\nBYE=\"\"\n");
//! # Ok::<(), joomla_ini::Error>(())
//! ```

pub mod accumulator;
pub mod codec;
pub mod compiler;
pub mod diagnostics;
pub mod dialect;
pub mod error;
pub mod escape;
pub mod hash;
pub mod lines;
pub mod options;
pub mod parser;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{compile_file, parse_file, read_to_string},
    compiler::{Substitutions, compile, compile_entries},
    diagnostics::{Diagnostic, DiagnosticKind, Diagnostics},
    dialect::Dialect,
    error::Error,
    options::{CompileOptions, ParseMode, ParseOptions, Untranslated},
    parser::{ParsedFile, parse, parse_bytes, parse_source, parse_translation},
    traits::{EntrySink, SourceLookup},
    types::{PluralRule, TranslationEntry},
};
