use chrono::NaiveDateTime;

/// One fully validated user instruction.
///
/// Indices are zero-based and may be negative or past the end of the list;
/// the task list rejects those when the command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    List,
    Mark(i64),
    Unmark(i64),
    Add(TaskDraft),
    Delete(i64),
    Find(String),
}

/// A task as typed by the user, before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskDraft {
    Todo {
        description: String,
    },
    Deadline {
        description: String,
        by: NaiveDateTime,
    },
    /// `start` and `end` are taken as given; an end before the start is accepted.
    Event {
        description: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl TaskDraft {
    pub fn description(&self) -> &str {
        match self {
            TaskDraft::Todo { description }
            | TaskDraft::Deadline { description, .. }
            | TaskDraft::Event { description, .. } => description,
        }
    }

    /// Single-letter kind marker used when rendering, `T`, `D` or `E`.
    pub fn symbol(&self) -> char {
        match self {
            TaskDraft::Todo { .. } => 'T',
            TaskDraft::Deadline { .. } => 'D',
            TaskDraft::Event { .. } => 'E',
        }
    }
}
