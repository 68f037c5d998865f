//! Team roster entries.

use serde::{Deserialize, Serialize};

/// One `* Name <email> - Role` entry.
///
/// The email is kept as written; [`crate::validation`] checks its shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub email: String,
    /// Empty when the entry has no `- Role` suffix.
    #[serde(default)]
    pub role: String,
}

impl TeamMember {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: String::new(),
        }
    }

    /// Builder method to set the role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    #[must_use]
    pub fn has_role(&self) -> bool {
        !self.role.is_empty()
    }
}
