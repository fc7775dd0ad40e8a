//! All error types for the joomla-ini crate.
//!
//! Only structural failures surface here. Problems confined to a single line
//! (a missing `=`, an unknown source key, ...) are reported as
//! [`crate::diagnostics::Diagnostic`]s and never abort a parse.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The content could not be turned into lines at all.
    #[error("parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The compilation template and the substitutions do not line up.
    #[error("compile error: {0}")]
    Compile(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new parse error with optional source error
    pub fn parse_error(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Parse {
            message: message.into(),
            source,
        }
    }

    /// Creates a new compile error
    pub fn compile_error(message: impl Into<String>) -> Self {
        Error::Compile(message.into())
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    pub fn is_compile(&self) -> bool {
        matches!(self, Error::Compile(_))
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(value: std::str::Utf8Error) -> Self {
        Error::parse_error("content is not valid UTF-8", Some(Box::new(value)))
    }
}
