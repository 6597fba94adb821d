#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use qwix::config::{RawTaskFile, SchedulerSection, TaskFile};
use qwix::task::Task;
use qwix::types::Priority;

/// Builder for `TaskFile` to simplify test setup.
pub struct TaskFileBuilder {
    file: RawTaskFile,
}

impl TaskFileBuilder {
    pub fn new() -> Self {
        Self {
            file: RawTaskFile {
                scheduler: SchedulerSection::default(),
                task: Vec::new(),
            },
        }
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.file.task.push(task);
        self
    }

    pub fn spread_factor(mut self, factor: f64) -> Self {
        self.file.scheduler.spread_factor = factor;
        self
    }

    pub fn iterations(mut self, iterations: u32) -> Self {
        self.file.scheduler.iterations = iterations;
        self
    }

    pub fn build(self) -> TaskFile {
        TaskFile::try_from(self.file).expect("Failed to build valid task file from builder")
    }
}

impl Default for TaskFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `Task`.
///
/// Deadlines are expressed relative to [`crate::fixed_now`] so tests stay
/// deterministic.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(id: &str) -> Self {
        let mut task = Task::new(id, id);
        task.created_at = crate::fixed_now() - Duration::days(7);
        Self { task }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.task.title = title.to_string();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.task.priority = priority;
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.dependencies.push(dep.to_string());
        self
    }

    pub fn completed(mut self) -> Self {
        self.task.completed = true;
        self
    }

    pub fn deadline(mut self, at: DateTime<Utc>) -> Self {
        self.task.deadline = Some(at);
        self
    }

    /// Deadline `hours` after the fixed test instant; negative means overdue.
    pub fn due_in_hours(self, hours: i64) -> Self {
        self.deadline(crate::fixed_now() + Duration::hours(hours))
    }

    pub fn estimated_minutes(mut self, minutes: u32) -> Self {
        self.task.estimated_minutes = Some(minutes);
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.task.tags.push(tag.to_string());
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}
