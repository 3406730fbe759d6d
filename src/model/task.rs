use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A compact reference to another task (the service's `parent` field)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    pub gid: String,
}

/// A task or subtask as returned by the service.
///
/// Section task listings only ask for `completed` and `name`, so the
/// remaining fields are optional and default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub gid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub completed: bool,
    /// When the task was completed (`completed_at` on the wire)
    #[serde(default, alias = "completed_at", skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TaskRef>,
}

impl Task {
    /// Create an open task with no parent
    pub fn new(gid: impl Into<String>, name: impl Into<String>) -> Self {
        Task {
            gid: gid.into(),
            name: name.into(),
            completed: false,
            completed_on: None,
            parent: None,
        }
    }

    /// Mark the task completed
    pub fn done(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Attach a parent reference
    pub fn with_parent(mut self, parent_gid: impl Into<String>) -> Self {
        self.parent = Some(TaskRef {
            gid: parent_gid.into(),
        });
        self
    }
}
