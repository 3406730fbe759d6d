//! An in-memory [`Fetcher`] that records every call it receives.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::model::{Project, Section, Task};
use crate::remote::{FetchError, Fetcher};

#[derive(Default)]
pub struct FakeFetcher {
    pub projects: Vec<Project>,
    pub tagged: Vec<String>,
    pub sections: HashMap<String, Vec<Section>>,
    pub section_tasks: HashMap<String, Vec<Task>>,
    pub project_tasks: HashMap<String, Vec<Task>>,
    pub subtasks: HashMap<String, Vec<Task>>,
    /// A call (as recorded in `calls`) that should fail instead of answering
    pub fail_on: Option<String>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeFetcher {
    fn record(&self, call: String) -> Result<(), FetchError> {
        self.calls.borrow_mut().push(call.clone());
        if self.fail_on.as_deref() == Some(call.as_str()) {
            return Err(FetchError::Status {
                url: call,
                status: 500,
                message: "Server Error".to_string(),
            });
        }
        Ok(())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

fn lookup<T: Clone>(map: &HashMap<String, Vec<T>>, key: &str) -> Vec<T> {
    map.get(key).cloned().unwrap_or_default()
}

impl Fetcher for FakeFetcher {
    fn projects(&self, workspace_id: &str) -> Result<Vec<Project>, FetchError> {
        self.record(format!("projects {}", workspace_id))?;
        Ok(self.projects.clone())
    }

    fn tagged_task_ids(&self, tag_id: &str) -> Result<Vec<String>, FetchError> {
        self.record(format!("tagged {}", tag_id))?;
        Ok(self.tagged.clone())
    }

    fn sections(&self, project_id: &str) -> Result<Vec<Section>, FetchError> {
        self.record(format!("sections {}", project_id))?;
        Ok(lookup(&self.sections, project_id))
    }

    fn section_tasks(&self, section_id: &str) -> Result<Vec<Task>, FetchError> {
        self.record(format!("section_tasks {}", section_id))?;
        Ok(lookup(&self.section_tasks, section_id))
    }

    fn project_tasks(&self, project_id: &str) -> Result<Vec<Task>, FetchError> {
        self.record(format!("project_tasks {}", project_id))?;
        Ok(lookup(&self.project_tasks, project_id))
    }

    fn subtasks(&self, task_id: &str) -> Result<Vec<Task>, FetchError> {
        self.record(format!("subtasks {}", task_id))?;
        Ok(lookup(&self.subtasks, task_id))
    }
}
