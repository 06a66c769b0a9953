use crate::command::Parser;
use crate::executor::{ExecuteError, Flow, execute};
use crate::storage::Storage;
use crate::tasks::TaskList;
use crate::ui::Ui;
use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

/// What became of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done(Flow),
    /// The line was rejected or the command failed; the user has been told why.
    Failed,
}

/// Load saved tasks, or start empty when the file is unreadable. The
/// unreadable file is moved aside first so it is never overwritten.
pub async fn restore_tasks<W: Write>(storage: &Storage, ui: &mut Ui<W>) -> Result<TaskList> {
    match storage.load().await {
        Ok(tasks) => Ok(tasks),
        Err(e) => {
            warn!(error = %format!("{e:#}"), "could not load saved tasks");
            let moved_to = storage.quarantine().await?;
            ui.show_loading_error(&e, &moved_to)?;
            Ok(TaskList::new())
        }
    }
}

/// One user session: every line is parsed, executed and rendered before the
/// next one is read.
pub struct Session<W: Write> {
    parser: Parser,
    storage: Storage,
    tasks: TaskList,
    ui: Ui<W>,
}

impl<W: Write> Session<W> {
    pub fn new(parser: Parser, storage: Storage, tasks: TaskList, ui: Ui<W>) -> Self {
        Self {
            parser,
            storage,
            tasks,
            ui,
        }
    }

    /// Parse and run a single line. Bad input and failed commands are shown
    /// to the user; only a broken output stream is returned as an error.
    pub async fn run_line(&mut self, line: &str) -> Result<Outcome> {
        let command = match self.parser.parse(line) {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %e, "rejected input");
                self.ui.show_error(&e)?;
                return Ok(Outcome::Failed);
            }
        };

        match execute(command, &mut self.tasks, &mut self.ui, &self.storage).await {
            Ok(flow) => Ok(Outcome::Done(flow)),
            Err(ExecuteError::Output(e)) => Err(e).context("Failed to write to the terminal"),
            Err(e) => {
                warn!(error = %e, "command failed");
                self.ui.show_error(&e)?;
                Ok(Outcome::Failed)
            }
        }
    }

    /// Read lines until `bye` or end of input.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        self.ui.show_welcome()?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await.context("Failed to read input")? {
            if line.trim().is_empty() {
                continue;
            }
            if self.run_line(&line).await? == Outcome::Done(Flow::Exit) {
                info!("session ended by user");
                return Ok(());
            }
        }

        info!("input closed, ending session");
        Ok(())
    }

    #[cfg(test)]
    fn into_parts(self) -> (TaskList, W) {
        (self.tasks, self.ui.into_inner())
    }
}
