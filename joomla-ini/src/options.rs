//! Options for parsing and compiling.

/// Whether a file is the canonical source file or a translation of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// The source-language file: every non-blank value becomes an entry and a
    /// skeleton is produced.
    #[default]
    Source,
    /// A translated file: only keys known to the source lookup are kept.
    Translation,
}

/// Parse behavior options for [`crate::parser::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub mode: ParseMode,
    /// Resource name passed to the source lookup.
    pub resource: String,
}

impl ParseOptions {
    /// Creates default parse options (source mode).
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for parsing the source file.
    pub fn source() -> Self {
        Self::new().with_mode(ParseMode::Source)
    }

    /// Options for parsing a translation of `resource`.
    pub fn translation(resource: impl Into<String>) -> Self {
        Self::new()
            .with_mode(ParseMode::Translation)
            .with_resource(resource)
    }

    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    pub fn is_source(&self) -> bool {
        self.mode == ParseMode::Source
    }
}

/// What to do with a skeleton placeholder nobody supplied a translation for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Untranslated {
    /// Write an empty value, which Joomla treats as untranslated.
    #[default]
    Blank,
    /// Abort with [`crate::Error::Compile`].
    Fail,
}

/// Compile behavior options for [`crate::compiler::compile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub untranslated: Untranslated,
    /// Fail when a substitution does not match any line of the template.
    pub strict: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            untranslated: Untranslated::Blank,
            strict: true,
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_untranslated(mut self, untranslated: Untranslated) -> Self {
        self.untranslated = untranslated;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
