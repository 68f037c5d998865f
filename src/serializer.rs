//! Serializer for frump documents.
//!
//! Writes the canonical form of a [`Document`]: re-parsing the output gives
//! back an equal document for everything the format can express. Layout is
//! fixed (title, team, tasks), so section order and blank lines from the
//! source text are not kept.
//!
//! Text the grammar cannot carry (a body line starting with `>`, a property
//! value with a `,`, ...) is written as-is and will not survive a re-parse;
//! [`crate::validation`] reports those cases up front.

use crate::config::WriterConfig;
use crate::model::{Document, Task, TeamMember};

/// Serialize with the default writer settings (`\n`, blank lines between blocks).
///
/// # Examples
///
/// ```
/// use frump::{Document, Task, TaskType};
///
/// let mut doc = Document::new("Proj");
/// doc.add_task(Task::new(1, TaskType::Task, "Do it"));
///
/// let text = frump::serialize(&doc);
/// assert!(text.contains("### Task 1 - Do it"));
/// assert_eq!(frump::parse(&text).unwrap(), doc);
/// ```
#[must_use]
pub fn serialize(doc: &Document) -> String {
    serialize_with(doc, &WriterConfig::default())
}

/// Serialize with explicit writer settings.
#[must_use]
pub fn serialize_with(doc: &Document, config: &WriterConfig) -> String {
    let mut blocks: Vec<Vec<String>> = Vec::new();

    if !doc.title.is_empty() || !doc.description.is_empty() {
        let mut header = vec![marked("#", &doc.title)];
        header.extend(text_lines(&doc.description));
        blocks.push(header);
    }

    if !doc.team.is_empty() {
        let mut team = vec!["## Team".to_string()];
        team.extend(doc.team.iter().map(member_line));
        blocks.push(team);
    }

    if !doc.tasks.is_empty() {
        blocks.push(vec!["## Tasks".to_string()]);
        blocks.extend(doc.tasks.iter().map(task_lines));
    }

    let separator: &[String] = if config.blank_lines {
        &[String::new()]
    } else {
        &[]
    };
    let lines = blocks.join(separator);

    tracing::debug!(
        lines = lines.len(),
        tasks = doc.tasks.len(),
        "serialized document"
    );

    let ending = config.line_ending.as_str();
    let mut out = lines.join(ending);
    if !out.is_empty() {
        out.push_str(ending);
    }
    out
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&serialize(self))
    }
}

/// `marker text`, or just the marker when `text` is empty.
fn marked(marker: &str, text: &str) -> String {
    if text.is_empty() {
        marker.to_string()
    } else {
        format!("{marker} {text}")
    }
}

fn text_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
}

fn member_line(member: &TeamMember) -> String {
    let entry = format!("* {} <{}>", member.name, member.email);
    if member.has_role() {
        format!("{entry} - {}", member.role)
    } else {
        entry
    }
}

fn task_lines(task: &Task) -> Vec<String> {
    let heading = format!("### {} {} -", task.task_type, task.id);
    let mut lines = vec![marked(&heading, &task.subject)];

    lines.extend(text_lines(&task.body));

    if !task.properties.is_empty() {
        let pairs: Vec<String> = task
            .properties
            .iter()
            .map(|p| format!("{}: {}", p.name, p.value))
            .collect();
        lines.push(format!("_{}_", pairs.join(", ")));
    }

    if !task.comments.is_empty() {
        lines.push("Comments".to_string());
        lines.extend(
            task.comments
                .iter()
                .map(|c| format!("> {}: {}", c.author, c.message)),
        );
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LineEnding;
    use crate::model::{Comment, Property, TaskType};
    use crate::parser::parse;

    fn sample_document() -> Document {
        let mut task = Task::new(1, TaskType::Task, "Do it").with_body("first line\nsecond line");
        task.properties = vec![
            Property::new("Status", "open"),
            Property::new("Assigned To", "Ann"),
        ];
        task.comments = vec![Comment::new("Bob", "looks good")];

        Document {
            title: "Proj".to_string(),
            description: "About the project.".to_string(),
            team: vec![
                TeamMember::new("Ann", "ann@x.com").with_role("Lead"),
                TeamMember::new("Bob", "bob@x.com"),
            ],
            tasks: vec![task, Task::new(2, TaskType::Bug, "")],
        }
    }

    // ======
    // Layout
    // ======

    #[test]
    fn test_canonical_layout() {
        let expected = "\
# Proj
About the project.

## Team
* Ann <ann@x.com> - Lead
* Bob <bob@x.com>

## Tasks

### Task 1 - Do it
first line
second line
_Status: open, Assigned To: Ann_
Comments
> Bob: looks good

### Bug 2 -
";
        assert_eq!(serialize(&sample_document()), expected);
    }

    #[test]
    fn test_compact_crlf_layout() {
        let config = WriterConfig {
            line_ending: LineEnding::Crlf,
            blank_lines: false,
        };
        let mut doc = Document::new("P");
        doc.add_task(Task::new(3, TaskType::Feature, "x"));

        assert_eq!(
            serialize_with(&doc, &config),
            "# P\r\n## Tasks\r\n### Feature 3 - x\r\n"
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(serialize(&Document::default()), "");
    }

    #[test]
    fn test_untitled_document_keeps_description() {
        let doc = Document {
            description: "notes".to_string(),
            ..Document::default()
        };
        let text = serialize(&doc);
        assert_eq!(text, "#\nnotes\n");
        assert_eq!(parse(&text).unwrap(), doc);
    }

    #[test]
    fn test_display_matches_serialize() {
        let doc = sample_document();
        assert_eq!(doc.to_string(), serialize(&doc));
    }

    // ==========
    // Round-trip
    // ==========

    #[test]
    fn test_round_trip_sample() {
        let doc = sample_document();
        assert_eq!(parse(&serialize(&doc)).unwrap(), doc);
    }

    #[test]
    fn test_round_trip_from_text() -> anyhow::Result<()> {
        let content = "# Test\n\n## Tasks\n### Task 1 - test task\n\nBody text\n_Status: working_\n\n## Team\n* John Doe <john@example.com> - Developer\n";
        let doc = parse(content)?;
        let again = parse(&serialize(&doc))?;
        assert_eq!(again, doc);
        Ok(())
    }

    #[test]
    fn test_serialize_is_stable() -> anyhow::Result<()> {
        let text = serialize(&sample_document());
        assert_eq!(serialize(&parse(&text)?), text);
        Ok(())
    }

    #[test]
    fn test_crlf_output_parses_back() -> anyhow::Result<()> {
        let config = WriterConfig {
            line_ending: LineEnding::Crlf,
            ..WriterConfig::default()
        };
        let doc = sample_document();
        assert_eq!(parse(&serialize_with(&doc, &config))?, doc);
        Ok(())
    }
}
