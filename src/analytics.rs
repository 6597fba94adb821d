// src/analytics.rs

//! Numbers behind the analytics panels.
//!
//! Nothing here feeds back into scheduling; these are read-only summaries of
//! a task collection at a given instant.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::dag::activation::Activation;
use crate::task::{Task, TaskId};
use crate::types::{DisplayColor, Priority};

/// Default look-ahead for "upcoming deadline".
pub const DEFAULT_UPCOMING_WINDOW_HOURS: u32 = 48;
/// Bars shown on the activation chart.
pub const DEFAULT_CHART_LIMIT: usize = 8;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriorityDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Summary statistics over a task collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Incomplete tasks whose deadline has passed.
    pub overdue_tasks: usize,
    /// Incomplete tasks due inside the upcoming window.
    pub upcoming_deadlines: usize,
    /// Percentage in `[0, 100]`.
    pub completion_rate: f64,
    /// Mean hours from creation to completion over completed tasks.
    pub avg_completion_hours: f64,
    pub total_estimated_minutes: u64,
    /// Minutes spent on completed tasks, estimate standing in for a missing actual.
    pub total_actual_minutes: u64,
    /// Actual over estimated minutes, for completed tasks that have both.
    pub estimated_vs_actual_ratio: f64,
    pub priority_distribution: PriorityDistribution,
    pub tag_distribution: BTreeMap<String, usize>,
}

impl TaskStats {
    pub fn compute(tasks: &[Task], now: DateTime<Utc>, upcoming_window: Duration) -> Self {
        let mut stats = TaskStats {
            total_tasks: tasks.len(),
            ..TaskStats::default()
        };

        let horizon = now + upcoming_window;
        let mut completion_hours = 0.0;
        let mut paired_estimated = 0u64;
        let mut paired_actual = 0u64;

        for task in tasks {
            match task.priority {
                Priority::High => stats.priority_distribution.high += 1,
                Priority::Medium => stats.priority_distribution.medium += 1,
                Priority::Low => stats.priority_distribution.low += 1,
            }
            for tag in &task.tags {
                *stats.tag_distribution.entry(tag.clone()).or_default() += 1;
            }
            stats.total_estimated_minutes += u64::from(task.estimated_minutes.unwrap_or(0));

            if !task.completed {
                if let Some(deadline) = task.deadline {
                    if deadline < now {
                        stats.overdue_tasks += 1;
                    } else if now < deadline && deadline < horizon {
                        stats.upcoming_deadlines += 1;
                    }
                }
                continue;
            }

            stats.completed_tasks += 1;
            stats.total_actual_minutes += u64::from(
                task.actual_minutes
                    .or(task.estimated_minutes)
                    .unwrap_or(0),
            );
            if let Some(completed_at) = task.completed_at {
                completion_hours +=
                    (completed_at - task.created_at).num_milliseconds() as f64 / MILLIS_PER_HOUR;
            }
            if let (Some(estimated), Some(actual)) = (task.estimated_minutes, task.actual_minutes) {
                paired_estimated += u64::from(estimated);
                paired_actual += u64::from(actual);
            }
        }

        if stats.total_tasks > 0 {
            stats.completion_rate =
                stats.completed_tasks as f64 * 100.0 / stats.total_tasks as f64;
        }
        if stats.completed_tasks > 0 {
            stats.avg_completion_hours = completion_hours / stats.completed_tasks as f64;
        }
        if paired_estimated > 0 {
            stats.estimated_vs_actual_ratio = paired_actual as f64 / paired_estimated as f64;
        }

        stats
    }
}

/// One bar of the activation chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationBar {
    pub task_id: TaskId,
    pub title: String,
    /// Activation rounded to two decimals.
    pub value: f64,
    pub color: DisplayColor,
}

/// Incomplete tasks by descending activation, at most `limit` of them.
///
/// Ties keep input order.
pub fn activation_chart(
    tasks: &[Task],
    activation: &Activation,
    limit: usize,
) -> Vec<ActivationBar> {
    let mut bars: Vec<ActivationBar> = tasks
        .iter()
        .filter(|task| !task.completed)
        .map(|task| {
            let raw = activation.get(&task.id).unwrap_or(0.0);
            ActivationBar {
                task_id: task.id.clone(),
                title: task.title.clone(),
                value: (raw * 100.0).round() / 100.0,
                color: DisplayColor::for_activation(raw),
            }
        })
        .collect();

    bars.sort_by(|a, b| b.value.total_cmp(&a.value));
    bars.truncate(limit);
    bars
}
