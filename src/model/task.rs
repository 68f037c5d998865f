//! Tasks and the values hanging off them.

use serde::{Deserialize, Serialize};

/// The token before the id in a task heading.
///
/// The common kinds get their own variant; anything else is kept verbatim
/// in [`TaskType::Custom`], so every token survives a round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskType {
    #[default]
    Task,
    Bug,
    Issue,
    Feature,
    Custom(String),
}

impl TaskType {
    /// Parse a task type token.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "Task" => Self::Task,
            "Bug" => Self::Bug,
            "Issue" => Self::Issue,
            "Feature" => Self::Feature,
            _ => Self::Custom(s.to_string()),
        }
    }

    /// The token as written in a heading.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Task => "Task",
            Self::Bug => "Bug",
            Self::Issue => "Issue",
            Self::Feature => "Feature",
            Self::Custom(s) => s,
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TaskType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&str> for TaskType {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<TaskType> for String {
    fn from(task_type: TaskType) -> Self {
        match task_type {
            TaskType::Custom(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// A `Name: Value` annotation on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    /// Workflow state, e.g. `open`, `working`, `done`.
    pub const STATUS: &'static str = "Status";
    /// Name of the team member the task is assigned to.
    pub const ASSIGNED_TO: &'static str = "Assigned To";
    /// Tag list, separated by spaces or `;`.
    pub const TAGS: &'static str = "Tags";
    pub const PRIORITY: &'static str = "Priority";
    pub const DUE_DATE: &'static str = "Due Date";

    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A `> Author: Message` line under a task's `Comments` marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub message: String,
}

impl Comment {
    #[must_use]
    pub fn new(author: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            message: message.into(),
        }
    }
}

/// A single task: heading, free-text body, properties and comments.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Task {
    /// Number from the heading. Not checked for uniqueness by the parser.
    pub id: u32,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub subject: String,
    #[serde(default)]
    pub body: String,
    /// Authoring order is kept.
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Task {
    /// Create a task with an empty body and no properties or comments.
    #[must_use]
    pub fn new(id: u32, task_type: TaskType, subject: impl Into<String>) -> Self {
        Self {
            id,
            task_type,
            subject: subject.into(),
            ..Self::default()
        }
    }

    /// Builder method to set the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Append a body fragment, inserting `separator` when the body is not empty.
    pub fn push_body_fragment(&mut self, fragment: &str, separator: &str) {
        if !self.body.is_empty() {
            self.body.push_str(separator);
        }
        self.body.push_str(fragment);
    }

    /// Value of the first property called `name`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Update a property in place, or append it when absent.
    pub fn set_property(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(prop) = self.properties.iter_mut().find(|p| p.name == name) {
            prop.value = value;
        } else {
            self.properties.push(Property::new(name, value));
        }
    }

    /// Remove every property called `name`. Returns whether any was removed.
    pub fn remove_property(&mut self, name: &str) -> bool {
        let before = self.properties.len();
        self.properties.retain(|p| p.name != name);
        self.properties.len() != before
    }

    /// Replace the whole property list, as a property block line does.
    pub fn replace_properties(&mut self, properties: Vec<Property>) {
        self.properties = properties;
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.property(Property::STATUS)
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.set_property(Property::STATUS, status);
    }

    #[must_use]
    pub fn assignee(&self) -> Option<&str> {
        self.property(Property::ASSIGNED_TO)
    }

    pub fn set_assignee(&mut self, assignee: impl Into<String>) {
        self.set_property(Property::ASSIGNED_TO, assignee);
    }

    /// The entries of the `Tags` property.
    ///
    /// A property block already splits on `,`, so tags inside one value are
    /// separated by spaces or `;`. A `,` is still accepted for tags set
    /// through [`Task::set_property`].
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        self.property(Property::TAGS)
            .map(|tags| {
                tags.split(|c: char| c == ';' || c == ',' || c.is_whitespace())
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn add_comment(&mut self, author: impl Into<String>, message: impl Into<String>) {
        self.comments.push(Comment::new(author, message));
    }
}
