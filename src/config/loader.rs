// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{RawTaskFile, TaskFile};
use crate::errors::Result;

/// Read a task file and deserialize it into a `RawTaskFile`.
///
/// Only TOML deserialization happens here; use [`load_and_validate`] for the
/// semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawTaskFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let file: RawTaskFile = toml::from_str(&contents)?;
    debug!(path = %path.display(), tasks = file.task.len(), "task file parsed");

    Ok(file)
}

/// Read, deserialize and validate a task file.
///
/// Rejects empty or duplicate ids, self-dependencies, zero estimates and
/// invalid `[scheduler]` tuning. Unknown dependency ids and cycles only
/// produce warnings.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<TaskFile> {
    let raw = load_from_path(&path)?;
    TaskFile::try_from(raw)
}

/// `Qwix.toml` in the current working directory.
pub fn default_task_file_path() -> PathBuf {
    PathBuf::from("Qwix.toml")
}
