//! Error types for frump.
//!
//! [`ParseError`] is the parse taxonomy: every variant names the offending
//! line (1-based, counted in the original input) so a caller can point the
//! user at it. [`FrumpError`] wraps it together with configuration
//! failures.

use thiserror::Error;

/// Crate-level error.
#[derive(Debug, Error)]
pub enum FrumpError {
    /// The document text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A configuration file could not be read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A malformed construct found while parsing a document.
///
/// Parsing stops at the first one; no partial document is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `###` heading without a usable type/id pair.
    #[error("line {line}: malformed task heading `{content}`: {reason}")]
    MalformedTask {
        line: usize,
        content: String,
        reason: String,
    },

    /// A property block segment without a `:` separator.
    #[error("line {line}: malformed property `{segment}` in `{content}`")]
    MalformedProperty {
        line: usize,
        content: String,
        segment: String,
    },

    /// A team member entry without a `<email>` pair.
    #[error("line {line}: malformed team member `{content}`: expected `* Name <email> - Role`")]
    MalformedMember { line: usize, content: String },

    /// A comment line without the `:` between author and message.
    #[error("line {line}: malformed comment `{content}`: expected `> Author: Message`")]
    MalformedComment { line: usize, content: String },

    /// The input bytes are not valid UTF-8.
    #[error("line {line}: input is not valid UTF-8 (first invalid byte at offset {valid_up_to})")]
    Encoding { line: usize, valid_up_to: usize },
}

impl ParseError {
    /// The 1-based line number the error points at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::MalformedTask { line, .. }
            | Self::MalformedProperty { line, .. }
            | Self::MalformedMember { line, .. }
            | Self::MalformedComment { line, .. }
            | Self::Encoding { line, .. } => *line,
        }
    }
}
