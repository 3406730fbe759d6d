use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

/// Base URL of the Asana REST API
pub const DEFAULT_API_BASE: &str = "https://app.asana.com/api/1.0";

/// Settings from the user's config.toml
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Personal access token, sent as a bearer credential
    pub access_token: String,
    /// Workspace whose projects are listed
    pub workspace_id: String,
    /// Tag marking tasks whose subtasks should be fetched
    pub has_subtask_tag: String,
    /// Where the snapshot is stored between runs
    pub dump_path: PathBuf,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

/// Default: the public Asana endpoint
fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("access_token", &"<redacted>")
            .field("workspace_id", &self.workspace_id)
            .field("has_subtask_tag", &self.has_subtask_tag)
            .field("dump_path", &self.dump_path)
            .field("api_base", &self.api_base)
            .finish()
    }
}
