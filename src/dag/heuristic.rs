// src/dag/heuristic.rs

//! Deterministic point-based scorer used when the activation engine fails.

use chrono::{DateTime, Utc};

use crate::dag::scorer::{Scorer, Scores};
use crate::errors::Result;
use crate::task::Task;

/// Deadline points start here and lose `DEADLINE_POINTS_PER_DAY` per day left.
pub const DEADLINE_MAX_POINTS: f64 = 50.0;
pub const DEADLINE_POINTS_PER_DAY: f64 = 5.0;
/// Extra points when the deadline is less than 24 hours away (or passed).
pub const DUE_SOON_BONUS: f64 = 10.0;
/// Short tasks get up to this many points, one less per estimated hour.
pub const SHORT_TASK_MAX_POINTS: f64 = 10.0;
pub const NO_DEPENDENCY_BONUS: f64 = 5.0;

/// Point score for one task; higher means "do sooner".
///
/// - priority: high 30, medium 20, low 10
/// - deadline: `max(0, 50 - 5 * whole days left)`, days clamped at zero,
///   plus [`DUE_SOON_BONUS`] inside the last 24 hours
/// - duration: `max(0, 10 - estimated hours)`
/// - [`NO_DEPENDENCY_BONUS`] for tasks without dependencies
pub fn heuristic_score(task: &Task, now: DateTime<Utc>) -> f64 {
    let mut score = task.priority.heuristic_weight();

    if let Some(days) = task.days_until_deadline(now) {
        let whole_days = days.max(0.0).floor();
        score += (DEADLINE_MAX_POINTS - whole_days * DEADLINE_POINTS_PER_DAY).max(0.0);
        if days < 1.0 {
            score += DUE_SOON_BONUS;
        }
    }

    if let Some(minutes) = task.estimated_minutes.filter(|&m| m > 0) {
        score += (SHORT_TASK_MAX_POINTS - f64::from(minutes) / 60.0).max(0.0);
    }

    if !task.has_dependencies() {
        score += NO_DEPENDENCY_BONUS;
    }

    score
}

/// [`Scorer`] wrapper around [`heuristic_score`]. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub fn scores(&self, tasks: &[Task], now: DateTime<Utc>) -> Scores {
        tasks
            .iter()
            .map(|task| (task.id.clone(), heuristic_score(task, now)))
            .collect()
    }
}

impl Scorer for HeuristicScorer {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn score(&self, tasks: &[Task], now: DateTime<Utc>) -> Result<Scores> {
        Ok(self.scores(tasks, now))
    }
}
