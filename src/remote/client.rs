use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::pages::{Page, Pages};
use super::{FetchError, Fetcher};
use crate::model::config::Config;
use crate::model::{Project, Section, Task};

/// HTTP request timeout.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Page size for projects, tagged tasks, sections and task listings.
const PAGE_SIZE: usize = 100;

/// Page size for subtask listings.
const SUBTASK_PAGE_SIZE: usize = 50;

const PROJECT_FIELDS: &str = "name,layout";
const SECTION_FIELDS: &str = "name";
const SECTION_TASK_FIELDS: &str = "completed,name";
const TASK_FIELDS: &str = "completed,completed_at,name,parent";

/// Blocking Asana API client authenticated with a personal access token
pub struct AsanaClient {
    http: Client,
    api_base: String,
    access_token: String,
}

#[derive(Deserialize)]
struct Compact {
    gid: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    message: String,
}

/// Pull a human-readable message out of an error response body
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.errors.into_iter().next())
        .map(|e| e.message)
        .unwrap_or_else(|| body.trim().chars().take(200).collect())
}

fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl AsanaClient {
    pub fn new(api_base: &str, access_token: &str) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("asana-tree/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(AsanaClient {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(&config.api_base, &config.access_token)
    }

    /// Lazily page through a listing endpoint
    pub fn paginate<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        limit: usize,
    ) -> Pages<'_, T> {
        Pages::new(self, path.to_string(), query, limit)
    }

    fn collect_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        limit: usize,
    ) -> Result<Vec<T>, FetchError> {
        self.paginate(path, query, limit).collect()
    }

    /// Fetch a single page of a listing
    pub(crate) fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
        limit: usize,
        offset: Option<&str>,
    ) -> Result<Page<T>, FetchError> {
        let url = format!("{}{}", self.api_base, path);
        let mut request = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(query)
            .query(&[("limit", limit.to_string())]);
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }

        debug!(%url, ?offset, "fetching page");
        let response = request.send().map_err(|e| FetchError::Http {
            url: url.clone(),
            source: e,
        })?;
        let status = response.status();
        let body = response.text().map_err(|e| FetchError::Http {
            url: url.clone(),
            source: e,
        })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        serde_json::from_str(&body).map_err(|e| FetchError::Decode { url, source: e })
    }
}

impl Fetcher for AsanaClient {
    fn projects(&self, workspace_id: &str) -> Result<Vec<Project>, FetchError> {
        self.collect_all(
            "/projects",
            query(&[
                ("workspace", workspace_id),
                ("archived", "false"),
                ("opt_fields", PROJECT_FIELDS),
            ]),
            PAGE_SIZE,
        )
    }

    fn tagged_task_ids(&self, tag_id: &str) -> Result<Vec<String>, FetchError> {
        let tasks: Vec<Compact> =
            self.collect_all(&format!("/tags/{}/tasks", tag_id), Vec::new(), PAGE_SIZE)?;
        Ok(tasks.into_iter().map(|t| t.gid).collect())
    }

    fn sections(&self, project_id: &str) -> Result<Vec<Section>, FetchError> {
        self.collect_all(
            &format!("/projects/{}/sections", project_id),
            query(&[("opt_fields", SECTION_FIELDS)]),
            PAGE_SIZE,
        )
    }

    fn section_tasks(&self, section_id: &str) -> Result<Vec<Task>, FetchError> {
        self.collect_all(
            &format!("/sections/{}/tasks", section_id),
            query(&[("opt_fields", SECTION_TASK_FIELDS)]),
            PAGE_SIZE,
        )
    }

    fn project_tasks(&self, project_id: &str) -> Result<Vec<Task>, FetchError> {
        self.collect_all(
            &format!("/projects/{}/tasks", project_id),
            query(&[("opt_fields", TASK_FIELDS)]),
            PAGE_SIZE,
        )
    }

    fn subtasks(&self, task_id: &str) -> Result<Vec<Task>, FetchError> {
        self.collect_all(
            &format!("/tasks/{}/subtasks", task_id),
            query(&[("opt_fields", TASK_FIELDS)]),
            SUBTASK_PAGE_SIZE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_service_body() {
        let body = r#"{"errors":[{"message":"Not Authorized","help":"..."}]}"#;
        assert_eq!(error_message(body), "Not Authorized");
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("  Bad Gateway\n"), "Bad Gateway");
        assert_eq!(error_message(r#"{"errors":[]}"#), r#"{"errors":[]}"#);
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = AsanaClient::new("http://localhost:1234/api/", "token").unwrap();
        assert_eq!(client.api_base, "http://localhost:1234/api");
    }
}
