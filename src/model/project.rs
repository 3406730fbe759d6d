use serde::{Deserialize, Serialize};

/// How a project arranges its tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Columns of real sections, each holding tasks
    Board,
    /// A flat task list; `Name:` tasks act as section headers
    List,
    /// Timeline, calendar, or anything else we don't render
    #[default]
    #[serde(other)]
    Other,
}

/// A project in the workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub gid: String,
    pub name: String,
    #[serde(default)]
    pub layout: Layout,
}

/// A board column. Only board-layout projects have these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub gid: String,
    pub name: String,
}

impl Project {
    pub fn new(gid: impl Into<String>, name: impl Into<String>, layout: Layout) -> Self {
        Project {
            gid: gid.into(),
            name: name.into(),
            layout,
        }
    }
}

impl Section {
    pub fn new(gid: impl Into<String>, name: impl Into<String>) -> Self {
        Section {
            gid: gid.into(),
            name: name.into(),
        }
    }
}
