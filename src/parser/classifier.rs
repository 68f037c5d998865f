//! Line classification.
//!
//! Patterns are tested in a fixed priority order because several of them
//! share a prefix (`#`, `##` and `###` all start with `#`):
//!
//! 1. `# ...`        title
//! 2. `## ...Tasks`  tasks section marker
//! 3. `## ...Team`   team section marker
//! 4. `### ...`      task heading
//! 5. `* ...`        team member
//! 6. `Comments`     comments marker
//! 7. `> ...`        comment
//! 8. `_..._`        property block
//! 9. anything else  plain text
//!
//! Classification looks at the text only. Whether a line means anything in
//! the current section is decided by the builder.

use once_cell::sync::Lazy;
use regex::Regex;

/// What a normalized line is, with the text after its marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Text after the leading `#`.
    Title(&'a str),
    TasksMarker,
    TeamMarker,
    /// Text after the leading `###`.
    TaskHeading(&'a str),
    /// Text after the leading `*`.
    TeamMember(&'a str),
    CommentsMarker,
    /// Text after the leading `>`.
    Comment(&'a str),
    /// The whole line, underscores included.
    PropertyBlock(&'a str),
    Text(&'a str),
}

// Compiled regex patterns
static TITLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[^#]|$)").unwrap_or_else(|e| panic!("Invalid title regex: {e}")));

static SECTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^##(?:[^#]|$)").unwrap_or_else(|e| panic!("Invalid section regex: {e}"))
});

static TASKS_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\btasks\b").unwrap_or_else(|e| panic!("Invalid tasks regex: {e}")));

static TEAM_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bteam\b").unwrap_or_else(|e| panic!("Invalid team regex: {e}")));

static TASK_HEADING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^###(?:[^#]|$)").unwrap_or_else(|e| panic!("Invalid task heading regex: {e}"))
});

static COMMENTS_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Comments\b").unwrap_or_else(|e| panic!("Invalid comments marker regex: {e}"))
});

/// Classify one normalized line.
#[must_use]
pub fn classify(line: &str) -> LineKind<'_> {
    if TITLE_PATTERN.is_match(line) {
        return LineKind::Title(&line[1..]);
    }

    if SECTION_PATTERN.is_match(line) {
        if TASKS_WORD.is_match(line) {
            return LineKind::TasksMarker;
        }
        if TEAM_WORD.is_match(line) {
            return LineKind::TeamMarker;
        }
    }

    if TASK_HEADING_PATTERN.is_match(line) {
        return LineKind::TaskHeading(&line[3..]);
    }

    if let Some(rest) = line.strip_prefix('*') {
        return LineKind::TeamMember(rest);
    }

    if COMMENTS_MARKER.is_match(line) {
        return LineKind::CommentsMarker;
    }

    if let Some(rest) = line.strip_prefix('>') {
        return LineKind::Comment(rest);
    }

    if line.starts_with('_') {
        return LineKind::PropertyBlock(line);
    }

    LineKind::Text(line)
}
