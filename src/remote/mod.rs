//! Read access to the Asana REST API.
//!
//! [`Fetcher`] is the seam the tree builder talks to; [`AsanaClient`] is the
//! HTTP implementation. Responses are decoded straight into the typed
//! records in [`crate::model`].

pub mod client;
pub mod pages;

pub use client::AsanaClient;
pub use pages::Pages;

use crate::model::{Project, Section, Task};

/// Error type for remote reads
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("could not set up HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },
    #[error("{url} returned {status}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

/// The read queries the tree builder needs. Each call drains every page of
/// its listing before returning.
pub trait Fetcher {
    /// Non-archived projects in a workspace (name and layout)
    fn projects(&self, workspace_id: &str) -> Result<Vec<Project>, FetchError>;
    /// Gids of every task carrying the tag
    fn tagged_task_ids(&self, tag_id: &str) -> Result<Vec<String>, FetchError>;
    /// Sections of a board project
    fn sections(&self, project_id: &str) -> Result<Vec<Section>, FetchError>;
    /// Tasks in a board section (completion state and name only)
    fn section_tasks(&self, section_id: &str) -> Result<Vec<Task>, FetchError>;
    /// All tasks of a list project
    fn project_tasks(&self, project_id: &str) -> Result<Vec<Task>, FetchError>;
    /// Subtasks of a task
    fn subtasks(&self, task_id: &str) -> Result<Vec<Task>, FetchError>;
}
