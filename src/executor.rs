use crate::command::Command;
use crate::storage::Storage;
use crate::tasks::{TaskList, TaskListError};
use crate::ui::Ui;
use std::io::{self, Write};
use thiserror::Error;
use tracing::debug;

/// Whether the session keeps reading input after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error(transparent)]
    Task(#[from] TaskListError),

    /// The in-memory change stands; only the save failed.
    #[error("Could not save your tasks: {0:#}")]
    Storage(anyhow::Error),

    #[error(transparent)]
    Output(#[from] io::Error),
}

/// Run one command against the task list, saving after every change.
pub async fn execute<W: Write>(
    command: Command,
    tasks: &mut TaskList,
    ui: &mut Ui<W>,
    storage: &Storage,
) -> Result<Flow, ExecuteError> {
    debug!(?command, "executing");

    match command {
        Command::Exit => {
            ui.show_goodbye()?;
            return Ok(Flow::Exit);
        }
        Command::List => ui.show_list(tasks)?,
        Command::Mark(index) => {
            tasks.mark_done(index)?;
            persist(tasks, storage).await?;
            ui.show_marked(tasks.get(index)?)?;
        }
        Command::Unmark(index) => {
            tasks.mark_undone(index)?;
            persist(tasks, storage).await?;
            ui.show_unmarked(tasks.get(index)?)?;
        }
        Command::Add(draft) => {
            let added = tasks.add(draft).clone();
            persist(tasks, storage).await?;
            ui.show_added(&added, tasks.len())?;
        }
        Command::Delete(index) => {
            let removed = tasks.delete(index)?;
            persist(tasks, storage).await?;
            ui.show_deleted(&removed, tasks.len())?;
        }
        Command::Find(keyword) => ui.show_found(&tasks.find_by_keyword(&keyword))?,
    }

    Ok(Flow::Continue)
}

async fn persist(tasks: &TaskList, storage: &Storage) -> Result<(), ExecuteError> {
    storage.save(tasks).await.map_err(ExecuteError::Storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{DateTimeFormat, TaskDraft};
    use pretty_assertions::assert_eq;
    use tokio_test::block_on;

    struct Fixture {
        _dir: tempfile::TempDir,
        storage: Storage,
        tasks: TaskList,
        ui: Ui<Vec<u8>>,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let storage = Storage::new(dir.path().join("tasks.json"), DateTimeFormat::default());
            Self {
                _dir: dir,
                storage,
                tasks: TaskList::new(),
                ui: Ui::new(Vec::new(), DateTimeFormat::default(), false),
            }
        }

        fn run(&mut self, command: Command) -> Result<Flow, ExecuteError> {
            block_on(execute(command, &mut self.tasks, &mut self.ui, &self.storage))
        }
    }

    fn todo(description: &str) -> Command {
        Command::Add(TaskDraft::Todo {
            description: description.to_string(),
        })
    }

    #[test]
    fn test_add_persists() {
        let mut fx = Fixture::new();
        assert_eq!(fx.run(todo("Buy milk")).unwrap(), Flow::Continue);

        let saved = block_on(fx.storage.load()).unwrap();
        assert_eq!(saved, fx.tasks);
        assert_eq!(saved.len(), 1);
    }

    #[test]
    fn test_mark_unmark_delete() {
        let mut fx = Fixture::new();
        fx.run(todo("Buy milk")).unwrap();
        fx.run(todo("Read book")).unwrap();

        fx.run(Command::Mark(1)).unwrap();
        assert!(fx.tasks.get(1).unwrap().done);
        assert!(block_on(fx.storage.load()).unwrap().get(1).unwrap().done);

        fx.run(Command::Unmark(1)).unwrap();
        assert!(!fx.tasks.get(1).unwrap().done);

        fx.run(Command::Delete(0)).unwrap();
        assert_eq!(fx.tasks.len(), 1);
        assert_eq!(block_on(fx.storage.load()).unwrap().len(), 1);
    }

    #[test]
    fn test_out_of_range_leaves_everything_untouched() {
        let mut fx = Fixture::new();
        fx.run(todo("Buy milk")).unwrap();

        let err = fx.run(Command::Mark(-1)).unwrap_err();
        assert!(matches!(
            err,
            ExecuteError::Task(TaskListError::IndexOutOfRange { number: 0, len: 1 })
        ));
        assert!(matches!(
            fx.run(Command::Delete(5)),
            Err(ExecuteError::Task(_))
        ));
        assert_eq!(fx.tasks.len(), 1);
        assert!(!fx.tasks.get(0).unwrap().done);
    }

    #[test]
    fn test_read_only_commands_do_not_write_file() {
        let mut fx = Fixture::new();
        fx.run(Command::List).unwrap();
        fx.run(Command::Find("milk".to_string())).unwrap();
        assert!(!fx.storage.path().exists());
    }

    #[test]
    fn test_exit() {
        let mut fx = Fixture::new();
        assert_eq!(fx.run(Command::Exit).unwrap(), Flow::Exit);
    }
}
