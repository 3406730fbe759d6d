use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::model::Layout;
use crate::model::snapshot::{ProjectBody, SNAPSHOT_VERSION, Snapshot, TaskGroup};

/// Error type for storing and loading snapshots
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Cached run with nothing cached yet
    #[error("No saved data available. Invoke with --load.")]
    NoSavedData { path: PathBuf },
    /// Refresh run whose dump file does not exist yet
    #[error("No saved data available.")]
    NoDumpFile { path: PathBuf },
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not decode snapshot {path}: {source}")]
    DecodeError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not encode snapshot: {0}")]
    EncodeError(#[from] serde_json::Error),
    #[error(
        "unsupported snapshot version {found} in {path} (expected {expected})",
        expected = SNAPSHOT_VERSION
    )]
    UnsupportedVersion { path: PathBuf, found: u32 },
    #[error("snapshot {path}: project {project} is {project_layout:?} but its body is {body_layout:?}")]
    LayoutMismatch {
        path: PathBuf,
        project: String,
        project_layout: Layout,
        body_layout: Layout,
    },
    #[error("snapshot {path}: project {project} has subtasks for unknown task {task}")]
    OrphanSubtasks {
        path: PathBuf,
        project: String,
        task: String,
    },
}

#[derive(Deserialize)]
struct VersionHeader {
    version: u32,
}

/// Encode a snapshot. Identical snapshots always encode to identical bytes.
pub fn encode_snapshot(snapshot: &Snapshot) -> Result<Vec<u8>, CacheError> {
    let mut bytes = serde_json::to_vec_pretty(snapshot)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decode a snapshot, checking the version first. `path` is only used for
/// error messages.
pub fn decode_snapshot(bytes: &[u8], path: &Path) -> Result<Snapshot, CacheError> {
    let decode_error = |source| CacheError::DecodeError {
        path: path.to_path_buf(),
        source,
    };
    let header: VersionHeader = serde_json::from_slice(bytes).map_err(decode_error)?;
    if header.version != SNAPSHOT_VERSION {
        return Err(CacheError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: header.version,
        });
    }
    let snapshot: Snapshot = serde_json::from_slice(bytes).map_err(decode_error)?;
    check_snapshot(&snapshot, path)?;
    Ok(snapshot)
}

/// Reject snapshots whose project layout disagrees with the body, or whose
/// subtask maps are keyed by a task outside their group.
fn check_snapshot(snapshot: &Snapshot, path: &Path) -> Result<(), CacheError> {
    for entry in &snapshot.projects {
        let project = &entry.project;
        let body_layout = entry.body.layout();
        if project.layout != body_layout {
            return Err(CacheError::LayoutMismatch {
                path: path.to_path_buf(),
                project: project.gid.clone(),
                project_layout: project.layout,
                body_layout,
            });
        }
        let groups: Vec<&TaskGroup> = match &entry.body {
            ProjectBody::Board { sections } => sections.iter().map(|s| &s.group).collect(),
            ProjectBody::List(group) => vec![group],
        };
        for group in groups {
            if let Some(task) = group
                .subtasks
                .keys()
                .find(|gid| !group.tasks.iter().any(|t| &t.gid == *gid))
            {
                return Err(CacheError::OrphanSubtasks {
                    path: path.to_path_buf(),
                    project: project.gid.clone(),
                    task: task.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Write `content` to `path` atomically via a temp file in the same directory.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Store a snapshot at `path`, replacing whatever was there
pub fn store_snapshot(snapshot: &Snapshot, path: &Path) -> Result<(), CacheError> {
    let bytes = encode_snapshot(snapshot)?;
    atomic_write(path, &bytes).map_err(|e| CacheError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(
        path = %path.display(),
        projects = snapshot.projects.len(),
        "stored snapshot"
    );
    Ok(())
}

/// Load the snapshot stored at `path` for a cached run
pub fn load_snapshot(path: &Path) -> Result<Snapshot, CacheError> {
    if !path.exists() {
        return Err(CacheError::NoSavedData {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|e| CacheError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let snapshot = decode_snapshot(&bytes, path)?;
    info!(
        path = %path.display(),
        projects = snapshot.projects.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

/// Precondition for a refresh run: the dump file must already exist.
pub fn ensure_dump_file(path: &Path) -> Result<(), CacheError> {
    if path.exists() {
        Ok(())
    } else {
        Err(CacheError::NoDumpFile {
            path: path.to_path_buf(),
        })
    }
}
