use crate::command::DateTimeFormat;
use crate::tasks::{Task, TaskList};
use crossterm::style::Stylize;
use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;

const DIVIDER: &str = "____________________________________________________________";

/// Renders command results and errors for the user.
pub struct Ui<W: Write> {
    out: W,
    format: DateTimeFormat,
    colored: bool,
}

impl<W: Write> Ui<W> {
    pub fn new(out: W, format: DateTimeFormat, colored: bool) -> Self {
        Self {
            out,
            format,
            colored,
        }
    }

    pub fn show_welcome(&mut self) -> io::Result<()> {
        let greeting = self.accent("Hello! I'm Taskline.");
        self.respond(&[greeting, "What can I do for you?".to_string()])
    }

    pub fn show_goodbye(&mut self) -> io::Result<()> {
        self.respond(&["Bye. Hope to see you again soon!".to_string()])
    }

    pub fn show_list(&mut self, tasks: &TaskList) -> io::Result<()> {
        if tasks.is_empty() {
            return self.respond(&["Your task list is empty.".to_string()]);
        }

        let mut lines = vec!["Here are the tasks in your list:".to_string()];
        lines.extend(
            tasks
                .iter()
                .enumerate()
                .map(|(i, task)| format!("{}.{}", i + 1, task.render(&self.format))),
        );
        self.respond(&lines)
    }

    pub fn show_added(&mut self, task: &Task, count: usize) -> io::Result<()> {
        let lines = [
            "Got it. I've added this task:".to_string(),
            format!("  {}", task.render(&self.format)),
            count_line(count),
        ];
        self.respond(&lines)
    }

    pub fn show_marked(&mut self, task: &Task) -> io::Result<()> {
        let lines = [
            "Nice! I've marked this task as done:".to_string(),
            format!("  {}", task.render(&self.format)),
        ];
        self.respond(&lines)
    }

    pub fn show_unmarked(&mut self, task: &Task) -> io::Result<()> {
        let lines = [
            "OK, I've marked this task as not done yet:".to_string(),
            format!("  {}", task.render(&self.format)),
        ];
        self.respond(&lines)
    }

    pub fn show_deleted(&mut self, task: &Task, count: usize) -> io::Result<()> {
        let lines = [
            "Noted. I've removed this task:".to_string(),
            format!("  {}", task.render(&self.format)),
            count_line(count),
        ];
        self.respond(&lines)
    }

    /// `matches` carry zero-based positions in the full list.
    pub fn show_found(&mut self, matches: &[(usize, &Task)]) -> io::Result<()> {
        if matches.is_empty() {
            return self.respond(&["No matching tasks found.".to_string()]);
        }

        let mut lines = vec!["Here are the matching tasks in your list:".to_string()];
        lines.extend(
            matches
                .iter()
                .map(|(i, task)| format!("{}.{}", i + 1, task.render(&self.format))),
        );
        self.respond(&lines)
    }

    pub fn show_error(&mut self, error: &dyn Display) -> io::Result<()> {
        let line = self.alert(&format!("OOPS!!! {}", error));
        self.respond(&[line])
    }

    /// `moved_to` is where the unreadable file now lives.
    pub fn show_loading_error(
        &mut self,
        error: &anyhow::Error,
        moved_to: &Path,
    ) -> io::Result<()> {
        let lines = [
            self.alert(&format!("Could not load saved tasks: {:#}", error)),
            format!("The old file was kept as {}", moved_to.display()),
            "Starting with an empty list.".to_string(),
        ];
        self.respond(&lines)
    }

    fn respond(&mut self, lines: &[String]) -> io::Result<()> {
        writeln!(self.out, "{}", DIVIDER)?;
        for line in lines {
            writeln!(self.out, " {}", line)?;
        }
        writeln!(self.out, "{}", DIVIDER)?;
        self.out.flush()
    }

    fn accent(&self, text: &str) -> String {
        if self.colored {
            text.cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn alert(&self, text: &str) -> String {
        if self.colored {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn count_line(count: usize) -> String {
    let noun = if count == 1 { "task" } else { "tasks" };
    format!("Now you have {} {} in the list.", count, noun)
}
