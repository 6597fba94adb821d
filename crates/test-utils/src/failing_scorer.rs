use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use qwix::dag::{Scorer, Scores};
use qwix::errors::{QwixError, Result};
use qwix::task::Task;

/// A scorer that:
/// - counts how often it was asked to score
/// - always fails, forcing the composer onto its fallback path.
#[derive(Debug, Clone, Default)]
pub struct FailingScorer {
    calls: Arc<AtomicUsize>,
}

impl FailingScorer {
    pub fn new(calls: Arc<AtomicUsize>) -> Self {
        Self { calls }
    }
}

impl Scorer for FailingScorer {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn score(&self, tasks: &[Task], _now: DateTime<Utc>) -> Result<Scores> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(QwixError::ScorerFailure(format!(
            "refusing to score {} tasks",
            tasks.len()
        )))
    }
}
