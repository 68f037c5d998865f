//! Semantic checks over a parsed document.
//!
//! The parser accepts anything the grammar can read. The rules here cover
//! what the format asks of a well-formed document on top of that: property
//! naming, task id uniqueness and order, team emails, and any field the
//! serializer could not write back unchanged.
//!
//! A field survives a round-trip only when it is what the parser would have
//! produced: single-line fields hold no line breaks or uncollapsed
//! whitespace, delimiters (`:` in a comment author, `<` in a member name,
//! `-` in a task type) stay out of the part before them, and text lines
//! never look like markup.
//!
//! Validation never fails; it collects every [`Violation`] it finds.

use std::collections::HashSet;

use thiserror::Error;

use crate::config::ValidationConfig;
use crate::model::{Comment, Document, Property, Task, TaskType, TeamMember};
use crate::parser::{classify, LineKind};

/// One broken rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("task {task}: property name is empty")]
    EmptyPropertyName { task: u32 },

    #[error("task {task}: property `{name}` must start with an uppercase letter")]
    PropertyNameNotCapitalized { task: u32, name: String },

    #[error("task {task}: property `{name}` has {words} words, at most {max} allowed")]
    PropertyNameTooLong {
        task: u32,
        name: String,
        words: usize,
        max: usize,
    },

    /// The property block grammar cannot carry this name or value.
    #[error("task {task}: property `{name}` cannot be written back: {reason}")]
    UnwritableProperty {
        task: u32,
        name: String,
        reason: &'static str,
    },

    #[error("task at position {index} has id 0, ids start at 1")]
    NonPositiveTaskId { index: usize },

    #[error("task id {id} is used more than once")]
    DuplicateTaskId { id: u32 },

    #[error("task id {id} follows {previous}, ids must ascend")]
    TaskIdOutOfOrder { id: u32, previous: u32 },

    /// A description or body line that would be read back as markup.
    #[error("{location}: line `{line}` would be read back as markup")]
    UnwritableText { location: String, line: String },

    /// A single-line field the writer would split or reshape.
    #[error("{location}: {field} cannot be written back: {reason}")]
    UnwritableField {
        location: String,
        field: &'static str,
        reason: &'static str,
    },

    #[error("team member at position {index} has an empty name")]
    EmptyMemberName { index: usize },

    #[error("team member `{name}` has invalid email `{email}`: {reason}")]
    InvalidEmail {
        name: String,
        email: String,
        reason: &'static str,
    },
}

/// Validate with the default rules.
#[must_use]
pub fn validate(doc: &Document) -> Vec<Violation> {
    validate_with(doc, &ValidationConfig::default())
}

/// Validate with explicit rules.
#[must_use]
pub fn validate_with(doc: &Document, config: &ValidationConfig) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_line(&doc.title, "document", "title", &mut violations);
    check_text(&doc.description, "description", &mut violations);

    for (index, member) in doc.team.iter().enumerate() {
        check_member(index, member, config, &mut violations);
    }

    check_ids(&doc.tasks, config, &mut violations);

    for task in &doc.tasks {
        check_task(task, &mut violations);
        for property in &task.properties {
            check_property(task.id, property, config, &mut violations);
        }
    }

    if !violations.is_empty() {
        tracing::debug!(count = violations.len(), "document has violations");
    }
    violations
}

impl Document {
    /// Shorthand for [`validate`].
    #[must_use]
    pub fn validate(&self) -> Vec<Violation> {
        validate(self)
    }
}

/// Why a single-line value would not read back as written.
fn line_problem(value: &str) -> Option<&'static str> {
    if value.contains(['\n', '\r']) {
        Some("contains a line break")
    } else if !value.is_empty() && !value.split_whitespace().eq(value.split(' ')) {
        Some("has whitespace that would be collapsed")
    } else {
        None
    }
}

fn check_line(value: &str, location: &str, field: &'static str, out: &mut Vec<Violation>) {
    if let Some(reason) = line_problem(value) {
        out.push(Violation::UnwritableField {
            location: location.to_string(),
            field,
            reason,
        });
    }
}

/// Multi-line text is kept as `\n`-joined, non-blank, normalized lines.
fn check_text(text: &str, location: &str, out: &mut Vec<Violation>) {
    if text.is_empty() {
        return;
    }

    for line in text.split('\n') {
        let reason = if line.is_empty() {
            Some("blank lines are dropped")
        } else {
            line_problem(line)
        };

        if let Some(reason) = reason {
            out.push(Violation::UnwritableField {
                location: location.to_string(),
                field: "text",
                reason,
            });
        } else if !matches!(classify(line), LineKind::Text(_)) {
            out.push(Violation::UnwritableText {
                location: location.to_string(),
                line: line.to_string(),
            });
        }
    }
}

fn type_problem(task_type: &TaskType) -> Option<&'static str> {
    let token = task_type.as_str();
    if token.is_empty() {
        Some("is empty")
    } else if token.contains(char::is_whitespace) {
        Some("contains whitespace")
    } else if token.contains('-') {
        Some("contains `-`")
    } else if TaskType::parse(token) != *task_type {
        Some("spells a built-in type")
    } else {
        None
    }
}

fn check_task(task: &Task, out: &mut Vec<Violation>) {
    let location = format!("task {}", task.id);

    if let Some(reason) = type_problem(&task.task_type) {
        out.push(Violation::UnwritableField {
            location: location.clone(),
            field: "type",
            reason,
        });
    }
    check_line(&task.subject, &location, "subject", out);
    check_text(&task.body, &format!("{location} body"), out);

    for (n, comment) in task.comments.iter().enumerate() {
        check_comment(comment, &format!("{location} comment {}", n + 1), out);
    }
}

fn check_comment(comment: &Comment, location: &str, out: &mut Vec<Violation>) {
    if comment.author.contains(':') {
        out.push(Violation::UnwritableField {
            location: location.to_string(),
            field: "author",
            reason: "contains `:`",
        });
    }
    check_line(&comment.author, location, "author", out);
    check_line(&comment.message, location, "message", out);
}

fn check_member(
    index: usize,
    member: &TeamMember,
    config: &ValidationConfig,
    out: &mut Vec<Violation>,
) {
    if member.name.trim().is_empty() {
        out.push(Violation::EmptyMemberName { index });
    }

    let location = format!("team member at position {index}");
    if member.name.contains('<') {
        out.push(Violation::UnwritableField {
            location: location.clone(),
            field: "name",
            reason: "contains `<`",
        });
    }
    if member.email.contains('>') {
        out.push(Violation::UnwritableField {
            location: location.clone(),
            field: "email",
            reason: "contains `>`",
        });
    }
    check_line(&member.name, &location, "name", out);
    check_line(&member.email, &location, "email", out);
    check_line(&member.role, &location, "role", out);

    if config.check_emails {
        if let Err(reason) = check_email(&member.email) {
            out.push(Violation::InvalidEmail {
                name: member.name.clone(),
                email: member.email.clone(),
                reason,
            });
        }
    }
}

/// Exactly one `@` with text on both sides.
fn check_email(email: &str) -> Result<(), &'static str> {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err("expected exactly one `@`");
    };

    if local.is_empty() {
        return Err("nothing before `@`");
    }
    if domain.is_empty() {
        return Err("nothing after `@`");
    }
    Ok(())
}

fn check_ids(tasks: &[Task], config: &ValidationConfig, out: &mut Vec<Violation>) {
    let mut seen = HashSet::new();
    let mut previous: Option<u32> = None;

    for (index, task) in tasks.iter().enumerate() {
        if task.id == 0 {
            out.push(Violation::NonPositiveTaskId { index });
        }

        if seen.insert(task.id) {
            let descending = previous.filter(|&prev| config.require_ascending_ids && task.id < prev);
            if let Some(prev) = descending {
                out.push(Violation::TaskIdOutOfOrder {
                    id: task.id,
                    previous: prev,
                });
            }
        } else {
            out.push(Violation::DuplicateTaskId { id: task.id });
        }

        previous = Some(task.id);
    }
}

fn check_property(
    task: u32,
    property: &Property,
    config: &ValidationConfig,
    out: &mut Vec<Violation>,
) {
    let name = property.name.trim();

    if name.is_empty() {
        out.push(Violation::EmptyPropertyName { task });
    } else {
        if !name.starts_with(|c: char| c.is_uppercase()) {
            out.push(Violation::PropertyNameNotCapitalized {
                task,
                name: name.to_string(),
            });
        }

        let words = name.split_whitespace().count();
        if words > config.max_property_words {
            out.push(Violation::PropertyNameTooLong {
                task,
                name: name.to_string(),
                words,
                max: config.max_property_words,
            });
        }
    }

    let reason = if property.name.contains(':') {
        Some("name contains `:`")
    } else if property.name.contains(',') {
        Some("name contains `,`")
    } else if property.value.contains(',') {
        Some("value contains `,`")
    } else if line_problem(&property.name).is_some() {
        Some("name has a line break or extra whitespace")
    } else if line_problem(&property.value).is_some() {
        Some("value has a line break or extra whitespace")
    } else {
        None
    };

    if let Some(reason) = reason {
        out.push(Violation::UnwritableProperty {
            task,
            name: property.name.clone(),
            reason,
        });
    }
}
