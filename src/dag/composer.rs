// src/dag/composer.rs

//! Final recommended work sequence.
//!
//! The composer merges the topological order with per-task scores:
//! - incomplete tasks are placed one at a time; a task becomes available once
//!   all of its incomplete prerequisites are placed, and the available task
//!   with the highest score goes next (ties keep topological position)
//! - completed tasks follow, in topological order
//!
//! If the primary scorer fails, the composer logs a warning and switches to
//! the heuristic scorer with the ready / blocked / completed partitioning.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::dag::activation::{ActivationConfig, ActivationEngine};
use crate::dag::eligibility::can_task_start;
use crate::dag::graph::TaskGraph;
use crate::dag::heuristic::HeuristicScorer;
use crate::dag::scorer::{Scorer, Scores};
use crate::dag::topo::topological_indices;
use crate::task::Task;

/// Result of composing a schedule.
#[derive(Debug, Clone)]
pub struct ComposedSchedule<'a> {
    /// Every input task exactly once, incomplete tasks first.
    pub order: Vec<&'a Task>,
    /// Scores the order was built from.
    pub scores: Scores,
    /// Name of the scorer that produced `scores`.
    pub scorer: &'static str,
    /// Whether the primary scorer failed and the heuristic was used.
    pub fell_back: bool,
}

impl<'a> ComposedSchedule<'a> {
    /// First incomplete task of the order.
    pub fn next(&self) -> Option<&'a Task> {
        self.order.iter().copied().find(|task| !task.completed)
    }
}

/// Combines topological order and scores into one recommended sequence.
#[derive(Debug)]
pub struct ScheduleComposer {
    primary: Box<dyn Scorer>,
    fallback: HeuristicScorer,
    clock: Box<dyn Clock>,
}

impl Default for ScheduleComposer {
    fn default() -> Self {
        Self::with_config(ActivationConfig::default())
    }
}

impl ScheduleComposer {
    pub fn new(primary: Box<dyn Scorer>, clock: Box<dyn Clock>) -> Self {
        Self {
            primary,
            fallback: HeuristicScorer,
            clock,
        }
    }

    /// Activation engine with the given tuning, evaluated against the system clock.
    pub fn with_config(config: ActivationConfig) -> Self {
        Self::new(
            Box::new(ActivationEngine::new(config)),
            Box::new(SystemClock),
        )
    }

    /// Compose the schedule and keep the scores it was built from.
    pub fn compose<'a>(&self, tasks: &'a [Task]) -> ComposedSchedule<'a> {
        let now = self.clock.now();
        let graph = TaskGraph::new(tasks);

        match self.primary.score(tasks, now) {
            Ok(scores) => {
                let order = merge_topological(&graph, &scores);
                debug!(
                    scorer = self.primary.name(),
                    tasks = tasks.len(),
                    "composed schedule"
                );
                ComposedSchedule {
                    order,
                    scores,
                    scorer: self.primary.name(),
                    fell_back: false,
                }
            }
            Err(err) => {
                warn!(
                    scorer = self.primary.name(),
                    error = %err,
                    "primary scorer failed; falling back to heuristic ordering"
                );
                let scores = self.fallback.scores(tasks, now);
                ComposedSchedule {
                    order: partition_by_readiness(&graph, &scores),
                    scores,
                    scorer: self.fallback.name(),
                    fell_back: true,
                }
            }
        }
    }

    /// Recommended work sequence over all tasks.
    pub fn optimized_order<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        self.compose(tasks).order
    }

    /// First incomplete task of the recommended sequence.
    ///
    /// `None` when the collection is empty or everything is completed.
    pub fn recommended_next<'a>(&self, tasks: &'a [Task]) -> Option<&'a Task> {
        self.compose(tasks).next()
    }
}

/// Topological order for incomplete tasks, reordered by score among tasks
/// that do not constrain each other, then completed tasks.
fn merge_topological<'a>(graph: &TaskGraph<'a>, scores: &Scores) -> Vec<&'a Task> {
    let topo = topological_indices(graph);
    let mut rank = vec![0; graph.len()];
    for (position, &idx) in topo.iter().enumerate() {
        rank[idx] = position;
    }

    let (completed, incomplete): (Vec<usize>, Vec<usize>) =
        topo.iter().partition(|&&idx| graph.task(idx).completed);

    prioritized(graph, &incomplete, &rank, scores)
        .into_iter()
        .chain(completed)
        .map(|idx| graph.task(idx))
        .collect()
}

/// Ready tasks, then blocked tasks, then completed tasks.
///
/// Within the first two groups tasks are ordered by score; between two
/// blocked tasks a direct dependency wins over score.
fn partition_by_readiness<'a>(graph: &TaskGraph<'a>, scores: &Scores) -> Vec<&'a Task> {
    let tasks = graph.tasks();
    let rank: Vec<usize> = (0..graph.len()).collect();

    let mut ready = Vec::new();
    let mut blocked = Vec::new();
    let mut completed = Vec::new();
    for (idx, task) in tasks.iter().enumerate() {
        if task.completed {
            completed.push(idx);
        } else if can_task_start(task, tasks) {
            ready.push(idx);
        } else {
            blocked.push(idx);
        }
    }

    let mut order = prioritized(graph, &ready, &rank, scores);
    order.extend(prioritized(graph, &blocked, &rank, scores));
    order.extend(completed);
    order.into_iter().map(|idx| graph.task(idx)).collect()
}

/// Heap entry: highest score first, then lowest rank.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    score: f64,
    rank: usize,
    idx: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.rank.cmp(&self.rank))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Order `members` so that a member never precedes another member it depends
/// on, choosing by score whenever several members are free to go next.
///
/// If every remaining member waits on another one (a cycle), the member with
/// the lowest rank is placed anyway so the result stays total.
fn prioritized(
    graph: &TaskGraph<'_>,
    members: &[usize],
    rank: &[usize],
    scores: &Scores,
) -> Vec<usize> {
    let n = graph.len();
    let mut in_set = vec![false; n];
    for &idx in members {
        in_set[idx] = true;
    }

    let mut waiting_on = vec![0usize; n];
    for &idx in members {
        waiting_on[idx] = graph
            .dependencies_of(idx)
            .iter()
            .filter(|&&dep| in_set[dep])
            .count();
    }

    let candidate = |idx: usize| Candidate {
        score: scores
            .get(&graph.task(idx).id)
            .copied()
            .unwrap_or(0.0),
        rank: rank[idx],
        idx,
    };

    let mut heap: BinaryHeap<Candidate> = members
        .iter()
        .filter(|&&idx| waiting_on[idx] == 0)
        .map(|&idx| candidate(idx))
        .collect();

    let mut by_rank = members.to_vec();
    by_rank.sort_by_key(|&idx| rank[idx]);
    let mut stalled_cursor = 0;

    let mut placed = vec![false; n];
    let mut order = Vec::with_capacity(members.len());

    while order.len() < members.len() {
        let next = match heap.pop() {
            Some(c) if placed[c.idx] => continue,
            Some(c) => c.idx,
            None => {
                while placed[by_rank[stalled_cursor]] {
                    stalled_cursor += 1;
                }
                let idx = by_rank[stalled_cursor];
                debug!(
                    task = %graph.task(idx).id,
                    "no task free of pending prerequisites; placing by topological rank"
                );
                idx
            }
        };

        placed[next] = true;
        order.push(next);

        for &dependent in graph.dependents_of(next) {
            if !in_set[dependent] || placed[dependent] {
                continue;
            }
            waiting_on[dependent] = waiting_on[dependent].saturating_sub(1);
            if waiting_on[dependent] == 0 {
                heap.push(candidate(dependent));
            }
        }
    }

    order
}
