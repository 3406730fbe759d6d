use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::model::project::{Layout, Project};
use crate::model::snapshot::{ProjectBody, ProjectEntry, SectionEntry, Snapshot, TaskGroup};
use crate::model::task::Task;
use crate::remote::{FetchError, Fetcher};

/// Gids of tasks carrying the subtask tag. Only these get their subtasks
/// fetched; a task without the tag shows no subtasks even if it has some.
pub struct Allowlist(HashSet<String>);

impl Allowlist {
    pub fn contains(&self, task_gid: &str) -> bool {
        self.0.contains(task_gid)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for Allowlist {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Allowlist(iter.into_iter().collect())
    }
}

/// Fetch everything for a workspace and assemble it into a snapshot.
///
/// Fetches run one at a time in a fixed order: projects, the tagged
/// allowlist, then each project in turn. The first failed fetch aborts the
/// whole build.
pub fn build_snapshot<F: Fetcher + ?Sized>(
    fetcher: &F,
    workspace_id: &str,
    subtask_tag: &str,
) -> Result<Snapshot, FetchError> {
    let projects = fetcher.projects(workspace_id)?;
    debug!(count = projects.len(), "fetched projects");

    let allowlist: Allowlist = fetcher.tagged_task_ids(subtask_tag)?.into_iter().collect();
    debug!(count = allowlist.len(), "fetched tagged tasks");

    let mut entries = Vec::with_capacity(projects.len());
    for project in projects {
        let body = match project.layout {
            Layout::Board => load_board_project(fetcher, &project, &allowlist)?,
            Layout::List => load_list_project(fetcher, &project, &allowlist)?,
            Layout::Other => {
                debug!(project = %project.name, "skipping project with unsupported layout");
                continue;
            }
        };
        entries.push(ProjectEntry { project, body });
    }

    Ok(Snapshot::new(entries))
}

/// Fetch subtasks for every allowlisted task, keyed by parent gid, in task order
fn load_subtasks<F: Fetcher + ?Sized>(
    fetcher: &F,
    tasks: &[Task],
    allowlist: &Allowlist,
) -> Result<IndexMap<String, Vec<Task>>, FetchError> {
    let mut subtasks = IndexMap::new();
    for task in tasks.iter().filter(|t| allowlist.contains(&t.gid)) {
        subtasks.insert(task.gid.clone(), fetcher.subtasks(&task.gid)?);
    }
    Ok(subtasks)
}

fn load_board_project<F: Fetcher + ?Sized>(
    fetcher: &F,
    project: &Project,
    allowlist: &Allowlist,
) -> Result<ProjectBody, FetchError> {
    let sections = fetcher.sections(&project.gid)?;
    debug!(project = %project.name, sections = sections.len(), "loading board project");

    let mut entries = Vec::with_capacity(sections.len());
    for section in sections {
        let tasks = fetcher.section_tasks(&section.gid)?;
        let subtasks = load_subtasks(fetcher, &tasks, allowlist)?;
        entries.push(SectionEntry {
            section,
            group: TaskGroup { tasks, subtasks },
        });
    }
    Ok(ProjectBody::Board { sections: entries })
}

fn load_list_project<F: Fetcher + ?Sized>(
    fetcher: &F,
    project: &Project,
    allowlist: &Allowlist,
) -> Result<ProjectBody, FetchError> {
    let tasks = fetcher.project_tasks(&project.gid)?;
    debug!(project = %project.name, tasks = tasks.len(), "loading list project");

    let subtasks = load_subtasks(fetcher, &tasks, allowlist)?;
    Ok(ProjectBody::List(TaskGroup { tasks, subtasks }))
}
