//! JSON file repository.
//!
//! # Responsibility
//! - Map each collection to one pretty-printed JSON document in a data
//!   directory (`medialab/` by default).
//! - Bootstrap the directory on first save.
//!
//! # Invariants
//! - A missing file loads as an empty collection.
//! - Each file is replaced via temp-file + rename, never truncated in place.
//! - Dates are written as `YYYY-MM-DD`, enums by symbolic name.

use super::data_repo::{DataSnapshot, RepoError, RepoResult, TaskDataRepository};
use crate::model::category::Category;
use crate::model::priority::Priority;
use crate::model::reminder::Reminder;
use crate::model::task::Task;
use log::{error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const DEFAULT_DATA_DIR: &str = "medialab";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const PRIORITIES_FILE: &str = "priorities.json";
pub const TASKS_FILE: &str = "tasks.json";
pub const REMINDERS_FILE: &str = "reminders.json";

/// File-backed repository rooted at one data directory.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Repository over `./medialab`, relative to the working directory.
    pub fn in_default_dir() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    fn load_snapshot(&self) -> RepoResult<DataSnapshot> {
        Ok(DataSnapshot {
            categories: read_collection(&self.file_path(CATEGORIES_FILE))?,
            priorities: read_collection(&self.file_path(PRIORITIES_FILE))?,
            tasks: read_collection(&self.file_path(TASKS_FILE))?,
            reminders: read_collection(&self.file_path(REMINDERS_FILE))?,
        })
    }

    fn save_snapshot(
        &self,
        categories: &[Category],
        priorities: &[Priority],
        tasks: &[Task],
        reminders: &[Reminder],
    ) -> RepoResult<()> {
        fs::create_dir_all(&self.dir).map_err(|source| RepoError::Io {
            path: self.dir.clone(),
            source,
        })?;
        write_collection(&self.file_path(CATEGORIES_FILE), categories)?;
        write_collection(&self.file_path(PRIORITIES_FILE), priorities)?;
        write_collection(&self.file_path(TASKS_FILE), tasks)?;
        write_collection(&self.file_path(REMINDERS_FILE), reminders)
    }
}

impl Default for JsonFileRepository {
    fn default() -> Self {
        Self::in_default_dir()
    }
}

impl TaskDataRepository for JsonFileRepository {
    fn load_all(&self) -> RepoResult<DataSnapshot> {
        let started_at = Instant::now();
        match self.load_snapshot() {
            Ok(snapshot) => {
                info!(
                    "event=store_load module=repo status=ok duration_ms={} categories={} priorities={} tasks={} reminders={}",
                    started_at.elapsed().as_millis(),
                    snapshot.categories.len(),
                    snapshot.priorities.len(),
                    snapshot.tasks.len(),
                    snapshot.reminders.len()
                );
                Ok(snapshot)
            }
            Err(err) => {
                error!(
                    "event=store_load module=repo status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn save_all(
        &self,
        categories: &[Category],
        priorities: &[Priority],
        tasks: &[Task],
        reminders: &[Reminder],
    ) -> RepoResult<()> {
        let started_at = Instant::now();
        match self.save_snapshot(categories, priorities, tasks, reminders) {
            Ok(()) => {
                info!(
                    "event=store_save module=repo status=ok duration_ms={} categories={} priorities={} tasks={} reminders={}",
                    started_at.elapsed().as_millis(),
                    categories.len(),
                    priorities.len(),
                    tasks.len(),
                    reminders.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=repo status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> RepoResult<Vec<T>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(RepoError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&text).map_err(|source| RepoError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> RepoResult<()> {
    let mut json = serde_json::to_string_pretty(items).map_err(|source| RepoError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    json.push('\n');

    let staging = path.with_extension("json.tmp");
    fs::write(&staging, json).map_err(|source| RepoError::Io {
        path: staging.clone(),
        source,
    })?;
    fs::rename(&staging, path).map_err(|source| RepoError::Io {
        path: path.to_path_buf(),
        source,
    })
}
