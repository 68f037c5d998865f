//! Document builder.
//!
//! A reducer over classified lines. The state is a [`Cursor`]: the active
//! section plus the index of the task being filled in. Each step takes the
//! cursor by value and returns the next one, so nothing is hidden in the
//! builder between lines.
//!
//! ```text
//! none -> header -> team | tasks
//!                          tasks <-> comments
//! ```

use crate::config::{HeadingPolicy, ParserConfig};
use crate::error::ParseError;
use crate::model::{Document, Task, TaskType};

use super::classifier::{classify, LineKind};
use super::entries;
use super::tokenizer::Line;

/// The section the builder is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    /// Before any heading; text is discarded.
    #[default]
    None,
    /// After the title; text goes to the description.
    Header,
    Team,
    Tasks,
    /// Inside a task's `Comments` block.
    Comments,
}

/// Builder state between two lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub section: Section,
    /// Index into `Document::tasks` of the most recently opened task.
    pub current: Option<usize>,
}

impl Cursor {
    const fn enter(section: Section) -> Self {
        Self {
            section,
            current: None,
        }
    }
}

/// Fold all lines into a document, stopping at the first malformed one.
///
/// # Errors
///
/// Returns the [`ParseError`] for the first malformed heading, member,
/// property block or comment.
pub fn build(lines: &[Line], config: &ParserConfig) -> Result<Document, ParseError> {
    let mut doc = Document::default();
    let mut cursor = Cursor::default();

    for line in lines {
        cursor = step(&mut doc, cursor, line, config)?;
    }

    Ok(doc)
}

/// Apply one line to the document and return the next cursor.
///
/// # Errors
///
/// Returns a [`ParseError`] when the line is structurally malformed.
pub fn step(
    doc: &mut Document,
    cursor: Cursor,
    line: &Line,
    config: &ParserConfig,
) -> Result<Cursor, ParseError> {
    let kind = classify(&line.text);
    tracing::trace!(line = line.number, ?kind, section = ?cursor.section, "classified line");

    // Anything but a comment or a repeated marker closes a comments block.
    let cursor = if cursor.section == Section::Comments
        && !matches!(kind, LineKind::Comment(_) | LineKind::CommentsMarker)
    {
        Cursor {
            section: Section::Tasks,
            ..cursor
        }
    } else {
        cursor
    };

    match kind {
        LineKind::Title(rest) => {
            doc.title = entries::parse_title(rest, config.title_markers);
            Ok(Cursor::enter(Section::Header))
        },
        LineKind::TasksMarker => Ok(Cursor::enter(Section::Tasks)),
        LineKind::TeamMarker => Ok(Cursor::enter(Section::Team)),
        LineKind::TaskHeading(rest) => open_task(doc, cursor, line, rest, config),
        LineKind::TeamMember(rest) => {
            if cursor.section != Section::Team {
                return Ok(discard(cursor, line, "team member outside the Team section"));
            }
            let member = entries::parse_member(rest).ok_or_else(|| ParseError::MalformedMember {
                line: line.number,
                content: line.text.clone(),
            })?;
            doc.team.push(member);
            Ok(cursor)
        },
        LineKind::CommentsMarker => {
            if current_task(doc, cursor).is_none() {
                return Ok(discard(cursor, line, "comments marker without a task"));
            }
            Ok(Cursor {
                section: Section::Comments,
                ..cursor
            })
        },
        LineKind::Comment(rest) => {
            if cursor.section != Section::Comments {
                return Ok(discard(cursor, line, "comment outside a comments block"));
            }
            let comment = entries::parse_comment(rest).ok_or_else(|| {
                ParseError::MalformedComment {
                    line: line.number,
                    content: line.text.clone(),
                }
            })?;
            if let Some(task) = current_task(doc, cursor) {
                task.comments.push(comment);
            }
            Ok(cursor)
        },
        LineKind::PropertyBlock(text) => {
            if cursor.section != Section::Tasks || current_task(doc, cursor).is_none() {
                return Ok(discard(cursor, line, "property block without a task"));
            }
            let properties = entries::parse_property_block(text).map_err(|segment| {
                ParseError::MalformedProperty {
                    line: line.number,
                    content: line.text.clone(),
                    segment,
                }
            })?;
            if let Some(task) = current_task(doc, cursor) {
                task.replace_properties(properties);
            }
            Ok(cursor)
        },
        LineKind::Text(text) => {
            let separator = config.body_separator.as_str();
            match cursor.section {
                Section::Header => {
                    if !doc.description.is_empty() {
                        doc.description.push_str(separator);
                    }
                    doc.description.push_str(text);
                },
                Section::Tasks => match current_task(doc, cursor) {
                    Some(task) => task.push_body_fragment(text, separator),
                    None => return Ok(discard(cursor, line, "text before the first task")),
                },
                Section::None | Section::Team | Section::Comments => {
                    return Ok(discard(cursor, line, "text outside header and tasks"));
                },
            }
            Ok(cursor)
        },
    }
}

fn open_task(
    doc: &mut Document,
    cursor: Cursor,
    line: &Line,
    rest: &str,
    config: &ParserConfig,
) -> Result<Cursor, ParseError> {
    let malformed = |reason: String| ParseError::MalformedTask {
        line: line.number,
        content: line.text.clone(),
        reason,
    };

    if config.task_headings == HeadingPolicy::TasksSection && cursor.section != Section::Tasks {
        return Err(malformed(
            "task heading outside the Tasks section".to_string(),
        ));
    }

    let heading = entries::parse_task_heading(rest).map_err(malformed)?;
    doc.tasks.push(Task::new(
        heading.id,
        TaskType::parse(heading.task_type),
        heading.subject,
    ));

    Ok(Cursor {
        section: Section::Tasks,
        current: Some(doc.tasks.len() - 1),
    })
}

fn current_task(doc: &mut Document, cursor: Cursor) -> Option<&mut Task> {
    cursor.current.and_then(|idx| doc.tasks.get_mut(idx))
}

fn discard(cursor: Cursor, line: &Line, reason: &str) -> Cursor {
    tracing::debug!(line = line.number, content = %line.text, reason, "discarding line");
    cursor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BodySeparator;
    use crate::model::{Comment, Property, TeamMember};
    use crate::parser::tokenizer::tokenize;

    fn build_default(input: &str) -> Result<Document, ParseError> {
        build(&tokenize(input), &ParserConfig::default())
    }

    fn line(number: usize, text: &str) -> Line {
        Line {
            number,
            text: text.to_string(),
        }
    }

    // ===========
    // Transitions
    // ===========

    #[test]
    fn test_initial_state() {
        assert_eq!(Cursor::default().section, Section::None);
        assert_eq!(Cursor::default().current, None);
    }

    #[test]
    fn test_title_enters_header() {
        let mut doc = Document::default();
        let next = step(
            &mut doc,
            Cursor::default(),
            &line(1, "# Proj"),
            &ParserConfig::default(),
        )
        .unwrap();
        assert_eq!(next, Cursor::enter(Section::Header));
        assert_eq!(doc.title, "Proj");
    }

    #[test]
    fn test_heading_sets_current_to_new_task() {
        let mut doc = Document::default();
        let config = ParserConfig::default();
        let mut cursor = Cursor::enter(Section::Tasks);
        cursor = step(&mut doc, cursor, &line(1, "### Task 1 - a"), &config).unwrap();
        assert_eq!(cursor.current, Some(0));
        cursor = step(&mut doc, cursor, &line(2, "### Task 2 - b"), &config).unwrap();
        assert_eq!(cursor.current, Some(1));
        assert_eq!(cursor.section, Section::Tasks);
    }

    #[test]
    fn test_section_marker_resets_current_task() {
        let mut doc = Document::default();
        let config = ParserConfig::default();
        let cursor = Cursor {
            section: Section::Tasks,
            current: Some(0),
        };
        doc.tasks.push(Task::new(1, TaskType::Task, "a"));
        let next = step(&mut doc, cursor, &line(5, "## Tasks"), &config).unwrap();
        assert_eq!(next, Cursor::enter(Section::Tasks));
    }

    #[test]
    fn test_comments_marker_enters_comments() {
        let mut doc = Document::default();
        doc.tasks.push(Task::new(1, TaskType::Task, "a"));
        let cursor = Cursor {
            section: Section::Tasks,
            current: Some(0),
        };
        let next = step(&mut doc, cursor, &line(2, "Comments"), &ParserConfig::default()).unwrap();
        assert_eq!(next.section, Section::Comments);
        assert_eq!(next.current, Some(0));
    }

    // =====================
    // Section accumulation
    // =====================

    #[test]
    fn test_description_lines_joined() {
        let doc = build_default("# Proj\nfirst line\nsecond line\n## Tasks").unwrap();
        assert_eq!(doc.description, "first line\nsecond line");
    }

    #[test]
    fn test_body_separator_none_concatenates() {
        let config = ParserConfig {
            body_separator: BodySeparator::None,
            ..ParserConfig::default()
        };
        let doc = build(&tokenize("### Task 1 - a\nfoo\nbar"), &config).unwrap();
        assert_eq!(doc.tasks[0].body, "foobar");
    }

    #[test]
    fn test_text_before_title_discarded() {
        let doc = build_default("preamble\n# Proj\nabout").unwrap();
        assert_eq!(doc.title, "Proj");
        assert_eq!(doc.description, "about");
    }

    #[test]
    fn test_text_in_team_discarded() {
        let doc = build_default("## Team\nsome prose\n* Ann <ann@x.com>").unwrap();
        assert_eq!(doc.team, vec![TeamMember::new("Ann", "ann@x.com")]);
        assert_eq!(doc.description, "");
    }

    #[test]
    fn test_member_outside_team_ignored() {
        let doc = build_default("# Proj\n* Ann <ann@x.com>\n## Tasks\n### Task 1 - a\n* Bob <bob@x.com>")
            .unwrap();
        assert!(doc.team.is_empty());
        assert_eq!(doc.description, "");
        assert_eq!(doc.tasks[0].body, "");
    }

    #[test]
    fn test_text_after_tasks_marker_without_task_discarded() {
        let doc = build_default("## Tasks\nloose text\n_Status: open_\n### Task 1 - a").unwrap();
        assert_eq!(doc.tasks.len(), 1);
        assert_eq!(doc.tasks[0].body, "");
        assert!(doc.tasks[0].properties.is_empty());
    }

    #[test]
    fn test_property_block_replaces() {
        let doc =
            build_default("## Tasks\n### Task 1 - a\n_Status: open, Priority: low_\n_Status: done_")
                .unwrap();
        assert_eq!(doc.tasks[0].properties, vec![Property::new("Status", "done")]);
    }

    #[test]
    fn test_property_block_in_header_ignored() {
        let doc = build_default("# Proj\n_Status: open_").unwrap();
        assert_eq!(doc.description, "");
    }

    // ========
    // Comments
    // ========

    #[test]
    fn test_comments_attach_to_current_task() {
        let doc = build_default(
            "## Tasks\n### Task 1 - a\nComments\n> Bob: one\n> Ann: two\n### Task 2 - b\n> Bob: stray",
        )
        .unwrap();
        assert_eq!(
            doc.tasks[0].comments,
            vec![Comment::new("Bob", "one"), Comment::new("Ann", "two")]
        );
        assert!(doc.tasks[1].comments.is_empty());
    }

    #[test]
    fn test_text_ends_comments_block() {
        let doc = build_default("### Task 1 - a\nComments\n> Bob: one\nmore body\n> Ann: ignored").unwrap();
        let task = &doc.tasks[0];
        assert_eq!(task.comments, vec![Comment::new("Bob", "one")]);
        assert_eq!(task.body, "more body");
    }

    #[test]
    fn test_property_block_after_comments() {
        let doc = build_default("### Task 1 - a\nComments\n> Bob: one\n_Status: done_").unwrap();
        assert_eq!(doc.tasks[0].status(), Some("done"));
        assert_eq!(doc.tasks[0].comments.len(), 1);
    }

    #[test]
    fn test_repeated_comments_marker_keeps_block_open() {
        let doc = build_default("### Task 1 - a\nComments\n> Bob: one\nComments\n> Ann: two").unwrap();
        assert_eq!(doc.tasks[0].comments.len(), 2);
    }

    #[test]
    fn test_comments_marker_without_task_ignored() {
        let doc = build_default("## Tasks\nComments\n> Bob: hi\n### Task 1 - a").unwrap();
        assert!(doc.tasks[0].comments.is_empty());
    }

    // ======
    // Errors
    // ======

    #[test]
    fn test_malformed_comment() {
        let err = build_default("### Task 1 - a\nComments\n> no author here").unwrap_err();
        assert!(matches!(err, ParseError::MalformedComment { line: 3, .. }));
    }

    #[test]
    fn test_malformed_member_reports_line() {
        let err = build_default("# Proj\n\n## Team\n* Ann ann@x.com").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedMember {
                line: 4,
                content: "* Ann ann@x.com".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_property_reports_segment() {
        let err = build_default("### Task 1 - a\n_Status open_").unwrap_err();
        match err {
            ParseError::MalformedProperty { line, segment, .. } => {
                assert_eq!(line, 2);
                assert_eq!(segment, "Status open");
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_strict_heading_policy() {
        let config = ParserConfig {
            task_headings: HeadingPolicy::TasksSection,
            ..ParserConfig::default()
        };
        let err = build(&tokenize("# Proj\n### Task 1 - a"), &config).unwrap_err();
        assert!(matches!(err, ParseError::MalformedTask { line: 2, .. }));

        let doc = build(&tokenize("## Tasks\n### Task 1 - a\nComments\n### Task 2 - b"), &config)
            .unwrap();
        assert_eq!(doc.tasks.len(), 2);
    }
}
