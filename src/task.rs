// src/task.rs

//! The task entity and the dependency link derived from it.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::Priority;

/// Canonical task identifier type used throughout the crate.
pub type TaskId = String;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// A single task as owned by the surrounding application.
///
/// The task collection is the only source of truth; every graph, atom space
/// and score in this crate is derived from a slice of these on demand.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Ids of the tasks that must be completed before this one can start.
    ///
    /// Order carries no meaning; a repeated id still counts as one link.
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_minutes: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Task {
    /// New incomplete, medium-priority task without dependencies.
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            completed: false,
            priority: Priority::default(),
            deadline: None,
            dependencies: Vec::new(),
            estimated_minutes: None,
            created_at: Utc::now(),
            completed_at: None,
            actual_minutes: None,
            tags: Vec::new(),
        }
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }

    /// Whether `id` is one of this task's prerequisites.
    pub fn depends_on(&self, id: &str) -> bool {
        self.dependencies.iter().any(|d| d == id)
    }

    /// Fractional days until the deadline (negative once overdue).
    pub fn days_until_deadline(&self, now: DateTime<Utc>) -> Option<f64> {
        self.deadline.map(|deadline| days_until(deadline, now))
    }

    /// Incomplete and past its deadline.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.deadline.is_some_and(|deadline| deadline < now)
    }
}

/// Fractional days from `now` until `instant`.
pub fn days_until(instant: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (instant - now).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// Directed edge `source -> target`: `source` must be done before `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyLink {
    /// The prerequisite.
    pub source: TaskId,
    /// The dependent task.
    pub target: TaskId,
}

/// Every (prerequisite, dependent) pair in the collection.
///
/// Tasks are walked in input order and dependencies in stored order, so the
/// output is deterministic. Dependencies pointing at unknown tasks are kept:
/// hiding them is the renderer's decision.
pub fn dependency_links(tasks: &[Task]) -> Vec<DependencyLink> {
    let mut links = Vec::new();

    for task in tasks {
        for (pos, dep) in task.dependencies.iter().enumerate() {
            if task.dependencies[..pos].contains(dep) {
                continue;
            }
            links.push(DependencyLink {
                source: dep.clone(),
                target: task.id.clone(),
            });
        }
    }

    links
}
