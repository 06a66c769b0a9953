use crate::command::{DateTimeFormat, TaskDraft};
use crate::tasks::{Task, TaskList};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct DataFile {
    version: u32,
    tasks: Vec<TaskRecord>,
}

// Date/times are kept in the same literal form users type.
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TaskRecord {
    Todo {
        description: String,
        done: bool,
    },
    Deadline {
        description: String,
        done: bool,
        by: String,
    },
    Event {
        description: String,
        done: bool,
        from: String,
        to: String,
    },
}

impl TaskRecord {
    fn from_task(task: &Task, format: &DateTimeFormat) -> Self {
        let done = task.done;
        match &task.draft {
            TaskDraft::Todo { description } => TaskRecord::Todo {
                description: description.clone(),
                done,
            },
            TaskDraft::Deadline { description, by } => TaskRecord::Deadline {
                description: description.clone(),
                done,
                by: format.encode(*by),
            },
            TaskDraft::Event {
                description,
                start,
                end,
            } => TaskRecord::Event {
                description: description.clone(),
                done,
                from: format.encode(*start),
                to: format.encode(*end),
            },
        }
    }

    fn into_task(self, format: &DateTimeFormat) -> Result<Task> {
        let decode = |literal: &str| {
            format
                .decode(literal)
                .with_context(|| format!("Invalid date/time '{}'", literal))
        };

        let (draft, done) = match self {
            TaskRecord::Todo { description, done } => (TaskDraft::Todo { description }, done),
            TaskRecord::Deadline {
                description,
                done,
                by,
            } => (
                TaskDraft::Deadline {
                    description,
                    by: decode(&by)?,
                },
                done,
            ),
            TaskRecord::Event {
                description,
                done,
                from,
                to,
            } => (
                TaskDraft::Event {
                    description,
                    start: decode(&from)?,
                    end: decode(&to)?,
                },
                done,
            ),
        };

        if draft.description().trim().is_empty() {
            bail!("Task has an empty description");
        }

        Ok(Task { draft, done })
    }
}

/// Keeps the task list in a JSON file between sessions.
pub struct Storage {
    path: PathBuf,
    format: DateTimeFormat,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>, format: DateTimeFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved list. A missing file is a fresh start, not an error.
    pub async fn load(&self) -> Result<TaskList> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no saved tasks, starting empty");
                return Ok(TaskList::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        let file: DataFile = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        if file.version != FORMAT_VERSION {
            bail!(
                "{} has format version {}, expected {}",
                self.path.display(),
                file.version,
                FORMAT_VERSION
            );
        }

        let tasks = file
            .tasks
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                record
                    .into_task(&self.format)
                    .with_context(|| format!("Task #{} in {}", i + 1, self.path.display()))
            })
            .collect::<Result<Vec<_>>>()?;

        info!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(TaskList::from_tasks(tasks))
    }

    pub async fn save(&self, tasks: &TaskList) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let file = DataFile {
            version: FORMAT_VERSION,
            tasks: tasks
                .iter()
                .map(|task| TaskRecord::from_task(task, &self.format))
                .collect(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        // The data file is only ever replaced whole.
        let staging = self.sibling("tmp");
        fs::write(&staging, json)
            .await
            .with_context(|| format!("Failed to write {}", staging.display()))?;
        fs::rename(&staging, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        info!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }

    /// Move an unreadable data file out of the way so later saves cannot
    /// overwrite it. Returns where it was moved to.
    pub async fn quarantine(&self) -> Result<PathBuf> {
        let target = self.sibling("corrupt");
        fs::rename(&self.path, &target).await.with_context(|| {
            format!(
                "Failed to move {} to {}",
                self.path.display(),
                target.display()
            )
        })?;

        warn!(from = %self.path.display(), to = %target.display(), "quarantined data file");
        Ok(target)
    }

    /// `tasks.json` -> `tasks.json.<suffix>`
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }
}
