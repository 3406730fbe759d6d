use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::project::{Layout, Project, Section};
use super::task::Task;

/// Encoding version written into every stored snapshot
pub const SNAPSHOT_VERSION: u32 = 1;

/// Tasks of one list project or one board section, plus the subtasks of
/// those tasks that carry the subtask tag.
///
/// Every key in `subtasks` is the gid of a task in `tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskGroup {
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub subtasks: IndexMap<String, Vec<Task>>,
}

impl TaskGroup {
    /// Subtasks recorded for a task, or an empty slice if none were fetched
    pub fn subtasks_of(&self, task_gid: &str) -> &[Task] {
        self.subtasks
            .get(task_gid)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// A board column with its tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    pub section: Section,
    pub group: TaskGroup,
}

/// The assembled contents of a project, shaped by its layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "lowercase")]
pub enum ProjectBody {
    Board { sections: Vec<SectionEntry> },
    List(TaskGroup),
}

impl ProjectBody {
    pub fn layout(&self) -> Layout {
        match self {
            ProjectBody::Board { .. } => Layout::Board,
            ProjectBody::List(_) => Layout::List,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub project: Project,
    pub body: ProjectBody,
}

/// Everything fetched for one workspace at one point in time, in fetch order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub projects: Vec<ProjectEntry>,
}

impl Snapshot {
    pub fn new(projects: Vec<ProjectEntry>) -> Self {
        Snapshot {
            version: SNAPSHOT_VERSION,
            projects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtasks_of_missing_task_is_empty() {
        let group = TaskGroup {
            tasks: vec![Task::new("1", "Solo")],
            subtasks: IndexMap::new(),
        };
        assert!(group.subtasks_of("1").is_empty());
        assert!(group.subtasks_of("nope").is_empty());
    }

    #[test]
    fn test_subtasks_of_recorded_task() {
        let mut subtasks = IndexMap::new();
        subtasks.insert("1".to_string(), vec![Task::new("2", "Child")]);
        let group = TaskGroup {
            tasks: vec![Task::new("1", "Parent")],
            subtasks,
        };
        assert_eq!(group.subtasks_of("1"), &[Task::new("2", "Child")]);
    }

    #[test]
    fn test_body_is_tagged_by_layout() {
        let body = ProjectBody::List(TaskGroup::default());
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["layout"], "list");
        assert_eq!(body.layout(), Layout::List);

        let body = ProjectBody::Board {
            sections: Vec::new(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["layout"], "board");
        assert_eq!(body.layout(), Layout::Board);
    }
}
