//! Field extraction for the structured line kinds.
//!
//! Each function takes the text after the line's marker, as returned by
//! the classifier, and reports failure without line context; the builder
//! wraps failures into [`crate::ParseError`]s.

use crate::config::TitleMarkers;
use crate::model::{Comment, Property, TeamMember};

/// Type, id and subject of a `### <Type> <Id> - <Subject>` heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHeading<'a> {
    pub task_type: &'a str,
    pub id: u32,
    pub subject: &'a str,
}

/// Title text from what follows the `#` marker.
#[must_use]
pub fn parse_title(rest: &str, markers: TitleMarkers) -> String {
    match markers {
        TitleMarkers::Leading => rest.trim().to_string(),
        TitleMarkers::All => rest.replace('#', "").trim().to_string(),
    }
}

/// Split a heading at its first `-`: type and id before it, subject after.
///
/// # Errors
///
/// Returns the reason when the type or id is missing, the id is not a
/// non-negative integer, or extra tokens sit between the id and the `-`.
pub fn parse_task_heading(rest: &str) -> Result<TaskHeading<'_>, String> {
    let (head, subject) = rest
        .split_once('-')
        .map_or((rest, ""), |(head, subject)| (head, subject.trim()));

    let mut tokens = head.split_whitespace();
    let task_type = tokens
        .next()
        .ok_or_else(|| "missing task type".to_string())?;
    let raw_id = tokens
        .next()
        .ok_or_else(|| "missing task id".to_string())?;
    let id = raw_id
        .parse::<u32>()
        .map_err(|_| format!("task id `{raw_id}` is not a number"))?;

    if let Some(extra) = tokens.next() {
        return Err(format!("unexpected `{extra}` after task id"));
    }

    Ok(TaskHeading {
        task_type,
        id,
        subject,
    })
}

/// Name before `<`, email inside `<...>`, optional `- Role` after `>`.
///
/// Returns `None` when the `<...>` pair is missing.
#[must_use]
pub fn parse_member(rest: &str) -> Option<TeamMember> {
    let open = rest.find('<')?;
    let close = open + 1 + rest[open + 1..].find('>')?;

    let name = rest[..open].trim();
    let email = rest[open + 1..close].trim();
    let tail = rest[close + 1..].trim();
    let role = tail.strip_prefix('-').unwrap_or(tail).trim();

    Some(TeamMember::new(name, email).with_role(role))
}

/// Properties from a `_Name: Value, Name: Value_` line.
///
/// Empty segments are skipped, so a trailing comma is harmless.
///
/// # Errors
///
/// Returns the first segment that has no `:`.
pub fn parse_property_block(line: &str) -> Result<Vec<Property>, String> {
    let inner = line.strip_prefix('_').unwrap_or(line);
    let inner = inner.strip_suffix('_').unwrap_or(inner);

    inner
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment
                .split_once(':')
                .map(|(name, value)| Property::new(name.trim(), value.trim()))
                .ok_or_else(|| segment.to_string())
        })
        .collect()
}

/// Author before the first `:`, message after it.
#[must_use]
pub fn parse_comment(rest: &str) -> Option<Comment> {
    let (author, message) = rest.split_once(':')?;
    Some(Comment::new(author.trim(), message.trim()))
}
