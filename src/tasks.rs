use crate::command::{DateTimeFormat, TaskDraft};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskListError {
    /// `number` is the one-based position the user typed.
    #[error("There is no task number {number}. Your list has {len} task(s), see `list`")]
    IndexOutOfRange { number: i64, len: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub draft: TaskDraft,
    pub done: bool,
}

impl Task {
    pub fn new(draft: TaskDraft) -> Self {
        Self { draft, done: false }
    }

    pub fn description(&self) -> &str {
        self.draft.description()
    }

    /// `[D][X] Submit report (by: Dec 02 2024 23:59)`
    pub fn render(&self, format: &DateTimeFormat) -> String {
        let status = if self.done { 'X' } else { ' ' };
        let head = format!("[{}][{}] {}", self.draft.symbol(), status, self.description());

        match &self.draft {
            TaskDraft::Todo { .. } => head,
            TaskDraft::Deadline { by, .. } => format!("{} (by: {})", head, format.display(*by)),
            TaskDraft::Event { start, end, .. } => format!(
                "{} (from: {} to: {})",
                head,
                format.display(*start),
                format.display(*end)
            ),
        }
    }
}

/// The in-memory, ordered task list commands run against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn get(&self, index: i64) -> Result<&Task, TaskListError> {
        let position = self.position(index)?;
        Ok(&self.tasks[position])
    }

    pub fn add(&mut self, draft: TaskDraft) -> &Task {
        self.tasks.push(Task::new(draft));
        &self.tasks[self.tasks.len() - 1]
    }

    pub fn mark_done(&mut self, index: i64) -> Result<&Task, TaskListError> {
        self.set_done(index, true)
    }

    pub fn mark_undone(&mut self, index: i64) -> Result<&Task, TaskListError> {
        self.set_done(index, false)
    }

    pub fn delete(&mut self, index: i64) -> Result<Task, TaskListError> {
        let position = self.position(index)?;
        Ok(self.tasks.remove(position))
    }

    /// Case-sensitive substring match on descriptions, paired with each
    /// task's zero-based position in the full list.
    pub fn find_by_keyword(&self, keyword: &str) -> Vec<(usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.description().contains(keyword))
            .collect()
    }

    fn set_done(&mut self, index: i64, done: bool) -> Result<&Task, TaskListError> {
        let position = self.position(index)?;
        let task = &mut self.tasks[position];
        task.done = done;
        Ok(task)
    }

    fn position(&self, index: i64) -> Result<usize, TaskListError> {
        usize::try_from(index)
            .ok()
            .filter(|&position| position < self.tasks.len())
            .ok_or(TaskListError::IndexOutOfRange {
                number: index.saturating_add(1),
                len: self.tasks.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn todo(description: &str) -> TaskDraft {
        TaskDraft::Todo {
            description: description.to_string(),
        }
    }

    fn sample() -> TaskList {
        let mut tasks = TaskList::new();
        tasks.add(todo("Buy milk"));
        tasks.add(todo("Read book"));
        tasks.add(todo("Buy oat milk"));
        tasks
    }

    #[test]
    fn test_add_appends_undone_task() {
        let mut tasks = TaskList::new();
        let added = tasks.add(todo("Buy milk")).clone();
        assert_eq!(added, Task::new(todo("Buy milk")));
        assert!(!added.done);
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn test_mark_and_unmark() {
        let mut tasks = sample();
        assert!(tasks.mark_done(1).unwrap().done);
        assert!(tasks.get(1).unwrap().done);
        assert!(!tasks.mark_undone(1).unwrap().done);
        assert!(!tasks.get(1).unwrap().done);
    }

    #[test]
    fn test_out_of_range_indices() {
        let mut tasks = sample();
        assert_eq!(
            tasks.get(3),
            Err(TaskListError::IndexOutOfRange { number: 4, len: 3 })
        );
        assert_eq!(
            tasks.mark_done(-1).unwrap_err(),
            TaskListError::IndexOutOfRange { number: 0, len: 3 }
        );
        assert!(tasks.delete(i64::MAX).is_err());
        assert_eq!(tasks.len(), 3);
    }

    #[test]
    fn test_delete_shifts_following_tasks() {
        let mut tasks = sample();
        let removed = tasks.delete(0).unwrap();
        assert_eq!(removed.description(), "Buy milk");
        assert_eq!(tasks.get(0).unwrap().description(), "Read book");
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn test_find_keeps_positions_and_is_case_sensitive() {
        let tasks = sample();
        let found: Vec<usize> = tasks
            .find_by_keyword("milk")
            .into_iter()
            .map(|(position, _)| position)
            .collect();
        assert_eq!(found, vec![0, 2]);
        assert!(tasks.find_by_keyword("MILK").is_empty());
    }

    #[test]
    fn test_render() {
        let format = DateTimeFormat::default();
        let at = |h| {
            NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };

        let mut task = Task::new(todo("Buy milk"));
        assert_eq!(task.render(&format), "[T][ ] Buy milk");
        task.done = true;
        assert_eq!(task.render(&format), "[T][X] Buy milk");

        let deadline = Task::new(TaskDraft::Deadline {
            description: "Report".to_string(),
            by: at(23),
        });
        assert_eq!(
            deadline.render(&format),
            "[D][ ] Report (by: Jan 01 2025 23:00)"
        );

        let event = Task::new(TaskDraft::Event {
            description: "Trip".to_string(),
            start: at(9),
            end: at(8),
        });
        assert_eq!(
            event.render(&format),
            "[E][ ] Trip (from: Jan 01 2025 09:00 to: Jan 01 2025 08:00)"
        );
    }
}
