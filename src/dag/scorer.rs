// src/dag/scorer.rs

//! Pluggable per-task scoring.
//!
//! The schedule composer asks a primary `Scorer` (the activation engine in
//! production) for scores and falls back to the heuristic scorer when the
//! primary returns an error. Tests can plug in their own implementation, for
//! example one that always fails.

use std::collections::HashMap;
use std::fmt::Debug;

use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::task::{Task, TaskId};

/// Score per task id; higher means "do sooner".
pub type Scores = HashMap<TaskId, f64>;

/// Trait abstracting how tasks are scored for ordering.
pub trait Scorer: Send + Sync + Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Score every task in the collection, evaluated at `now`.
    fn score(&self, tasks: &[Task], now: DateTime<Utc>) -> Result<Scores>;
}
