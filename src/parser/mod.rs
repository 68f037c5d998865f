//! Parser for frump documents.
//!
//! Parsing runs in three passes over the whole input: the tokenizer
//! normalizes raw text into non-empty lines, the classifier tags each line,
//! and the builder folds the tagged lines into a [`Document`].
//!
//! # Format
//!
//! ```text
//! # Project
//! Free text describing the project.
//!
//! ## Team
//! * Ann <ann@example.com> - Lead
//!
//! ## Tasks
//! ### Task 1 - Build authentication
//! Implement login and registration.
//! _Status: working, Assigned To: Ann_
//! Comments
//! > Bob: looks good
//! ```

mod builder;
mod classifier;
mod entries;
mod tokenizer;

pub use classifier::{classify, LineKind};
pub use tokenizer::{tokenize, Line};

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::model::Document;

/// Parse a document with the default parser settings.
///
/// # Errors
///
/// Returns a [`ParseError`] for the first malformed task heading, team
/// member, property block or comment.
///
/// # Examples
///
/// ```
/// let doc = frump::parse("# Proj\n## Tasks\n### Task 1 - Do it\n_Status: open_\n").unwrap();
/// assert_eq!(doc.title, "Proj");
/// assert_eq!(doc.tasks[0].status(), Some("open"));
/// ```
pub fn parse(input: &str) -> Result<Document, ParseError> {
    parse_with(input, &ParserConfig::default())
}

/// Parse a document with explicit parser settings.
///
/// # Errors
///
/// See [`parse`]. With [`crate::config::HeadingPolicy::TasksSection`] a task
/// heading outside a Tasks section is also a [`ParseError::MalformedTask`].
pub fn parse_with(input: &str, config: &ParserConfig) -> Result<Document, ParseError> {
    let lines = tokenize(input);
    tracing::debug!(lines = lines.len(), "parsing document");

    let doc = builder::build(&lines, config)
        .inspect_err(|err| tracing::debug!(error = %err, "document rejected"))?;

    tracing::debug!(
        members = doc.team.len(),
        tasks = doc.tasks.len(),
        "parsed document"
    );
    Ok(doc)
}

/// Parse raw bytes, which must be UTF-8.
///
/// # Errors
///
/// Returns [`ParseError::Encoding`] pointing at the line holding the first
/// invalid byte, or any error [`parse`] returns.
pub fn parse_bytes(bytes: &[u8]) -> Result<Document, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        let valid_up_to = e.valid_up_to();
        let line = bytes[..valid_up_to].iter().filter(|&&b| b == b'\n').count() + 1;
        ParseError::Encoding { line, valid_up_to }
    })?;
    parse(text)
}

impl std::str::FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
