//! frump - plain-text task documents
//!
//! This crate reads and writes a line-oriented Markdown dialect for
//! tracking tasks: a titled header, an optional team roster, and a list of
//! typed, numbered tasks carrying a body, properties and comments.
//!
//! ```
//! let text = "# Proj\n## Team\n* Ann <ann@x.com> - Lead\n## Tasks\n### Task 1 - Do it\n_Status: open_\n";
//!
//! let mut doc = frump::parse(text).unwrap();
//! assert_eq!(doc.apply_default_assignees(), 1);
//! assert_eq!(doc.tasks[0].assignee(), Some("Ann"));
//! assert!(frump::validate(&doc).is_empty());
//!
//! let written = frump::serialize(&doc);
//! assert_eq!(frump::parse(&written).unwrap(), doc);
//! ```

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod serializer;
pub mod validation;

pub use config::Config;
pub use error::{FrumpError, ParseError};
pub use model::{Comment, Document, Property, Task, TaskType, TeamMember};
pub use parser::{parse, parse_bytes, parse_with};
pub use serializer::{serialize, serialize_with};
pub use validation::{validate, validate_with, Violation};

/// Parse and validate a document using the settings in `config`.
///
/// # Errors
///
/// Returns [`FrumpError::Parse`] when the text cannot be parsed.
pub fn check(input: &str, config: &Config) -> Result<(Document, Vec<Violation>), FrumpError> {
    let doc = parse_with(input, &config.parser)?;
    let violations = validate_with(&doc, &config.validation);
    Ok((doc, violations))
}
