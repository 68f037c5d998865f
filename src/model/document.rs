//! The parsed document.

use serde::{Deserialize, Serialize};

use super::task::{Property, Task, TaskType};
use super::team::TeamMember;

/// A whole document: header, team roster and tasks in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Text of the `#` heading line.
    pub title: String,
    /// Free text between the title and the first section marker.
    #[serde(default)]
    pub description: String,
    /// Roster in authoring order. The first member is the default assignee.
    #[serde(default)]
    pub team: Vec<TeamMember>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Document {
    /// Create an empty document with a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Find the first task with the given id.
    #[must_use]
    pub fn find_task(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Mutable access to the first task with the given id.
    pub fn find_task_mut(&mut self, id: u32) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Highest task id in the document.
    #[must_use]
    pub fn max_id(&self) -> Option<u32> {
        self.tasks.iter().map(|t| t.id).max()
    }

    /// Next free id: one past the highest, or 1 for an empty document.
    #[must_use]
    pub fn next_id(&self) -> u32 {
        self.max_id().map_or(1, |id| id.saturating_add(1))
    }

    /// Append a task, keeping its id as given.
    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove the first task with `id`, returning it if found.
    pub fn remove_task(&mut self, id: u32) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(pos))
    }

    #[must_use]
    pub fn tasks_of_type(&self, task_type: &TaskType) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| &t.task_type == task_type)
            .collect()
    }

    #[must_use]
    pub fn tasks_with_status(&self, status: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.status() == Some(status))
            .collect()
    }

    #[must_use]
    pub fn tasks_assigned_to(&self, assignee: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.assignee() == Some(assignee))
            .collect()
    }

    /// The first team member.
    #[must_use]
    pub fn default_assignee(&self) -> Option<&TeamMember> {
        self.team.first()
    }

    #[must_use]
    pub fn find_member_by_name(&self, name: &str) -> Option<&TeamMember> {
        self.team.iter().find(|m| m.name == name)
    }

    #[must_use]
    pub fn find_member_by_email(&self, email: &str) -> Option<&TeamMember> {
        self.team.iter().find(|m| m.email == email)
    }

    /// Give every task without an `Assigned To` property the default assignee.
    ///
    /// Returns how many tasks were changed. Does nothing without a team.
    pub fn apply_default_assignees(&mut self) -> usize {
        let Some(default) = self.team.first().map(|m| m.name.clone()) else {
            return 0;
        };

        let mut assigned = 0;
        for task in self.tasks.iter_mut().filter(|t| t.assignee().is_none()) {
            task.set_property(Property::ASSIGNED_TO, default.as_str());
            assigned += 1;
        }
        assigned
    }
}
