// src/config/model.rs

use std::collections::HashMap;

use chrono::Duration;
use serde::Deserialize;

use crate::analytics::DEFAULT_UPCOMING_WINDOW_HOURS;
use crate::dag::activation::{ActivationConfig, DEFAULT_ITERATIONS, DEFAULT_SPREAD_FACTOR};
use crate::task::Task;

/// Task file as read from TOML, before validation.
///
/// ```toml
/// [scheduler]
/// spread_factor = 0.3
/// iterations = 3
/// upcoming_window_hours = 48
///
/// [[task]]
/// id = "design"
/// title = "Design"
/// priority = "high"
/// deadline = "2026-10-20T12:00:00Z"
///
/// [[task]]
/// id = "build"
/// title = "Build"
/// dependencies = ["design"]
/// estimated_minutes = 90
/// ```
///
/// Every section is optional; an empty file is an empty task list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTaskFile {
    #[serde(default)]
    pub scheduler: SchedulerSection,

    /// All `[[task]]` entries, in file order.
    #[serde(default)]
    pub task: Vec<Task>,
}

/// Validated task file.
///
/// Construct through `TaskFile::try_from(raw)`, which runs validation.
#[derive(Debug, Clone)]
pub struct TaskFile {
    pub scheduler: SchedulerSection,
    pub task: Vec<Task>,
}

impl TaskFile {
    /// Build without validation. Callers must have validated `task` already.
    pub(crate) fn new_unchecked(scheduler: SchedulerSection, task: Vec<Task>) -> Self {
        Self { scheduler, task }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.task
    }

    pub fn get_task(&self, id: &str) -> Option<&Task> {
        self.task.iter().find(|task| task.id == id)
    }

    /// Id to position in the task list.
    pub fn index(&self) -> HashMap<&str, usize> {
        self.task
            .iter()
            .enumerate()
            .map(|(idx, task)| (task.id.as_str(), idx))
            .collect()
    }
}

/// `[scheduler]` section: tuning for activation and analytics.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SchedulerSection {
    /// Fraction of a prerequisite's activation added to each dependent per round.
    #[serde(default = "default_spread_factor")]
    pub spread_factor: f64,

    /// Number of propagation rounds.
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// How far ahead a deadline counts as "upcoming".
    #[serde(default = "default_upcoming_window_hours")]
    pub upcoming_window_hours: u32,
}

fn default_spread_factor() -> f64 {
    DEFAULT_SPREAD_FACTOR
}

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

fn default_upcoming_window_hours() -> u32 {
    DEFAULT_UPCOMING_WINDOW_HOURS
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            spread_factor: default_spread_factor(),
            iterations: default_iterations(),
            upcoming_window_hours: default_upcoming_window_hours(),
        }
    }
}

impl SchedulerSection {
    pub fn activation_config(&self) -> ActivationConfig {
        ActivationConfig {
            spread_factor: self.spread_factor,
            iterations: self.iterations,
        }
    }

    pub fn upcoming_window(&self) -> Duration {
        Duration::hours(i64::from(self.upcoming_window_hours))
    }
}
