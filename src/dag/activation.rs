// src/dag/activation.rs

//! Spreading-activation urgency scores.
//!
//! Every task starts with a seed in `[0, 1]` derived from its priority and
//! how close its deadline is. Activation then flows along dependency links
//! from prerequisite to dependent for a fixed number of rounds, so work that
//! unblocks urgent tasks lights up the tasks it unblocks.
//!
//! Results depend on `now` for deadline-driven seeds; two calls at different
//! instants may legitimately differ.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::dag::atoms::{Atom, AtomSpace, AtomType, TaskNodeValue};
use crate::dag::scorer::{Scorer, Scores};
use crate::errors::{QwixError, Result};
use crate::task::{Task, TaskId, days_until};
use crate::types::DisplayColor;

pub const DEFAULT_SPREAD_FACTOR: f64 = 0.3;
pub const DEFAULT_ITERATIONS: u32 = 3;

/// Tuning knobs for the spreading pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationConfig {
    /// Share of a prerequisite's activation added to each dependent per round.
    pub spread_factor: f64,
    /// Number of propagation rounds.
    pub iterations: u32,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            spread_factor: DEFAULT_SPREAD_FACTOR,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Activation of a single task, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationResult {
    pub task_id: TaskId,
    pub value: f64,
    pub display_color: DisplayColor,
}

/// Final activation per task, in task-node order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Activation {
    results: Vec<ActivationResult>,
    index: HashMap<TaskId, usize>,
}

impl Activation {
    pub fn get(&self, task_id: &str) -> Option<f64> {
        self.index.get(task_id).map(|&pos| self.results[pos].value)
    }

    pub fn results(&self) -> &[ActivationResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_scores(self) -> Scores {
        self.results
            .into_iter()
            .map(|r| (r.task_id, r.value))
            .collect()
    }
}

/// Initial activation for a task node, before any spreading.
///
/// The deadline only ever raises the priority base: overdue means at least
/// 1.0, due within a day at least 0.9, within three days at least 0.7.
pub fn seed_activation(node: &TaskNodeValue, now: DateTime<Utc>) -> f64 {
    let mut activation = node.priority.base_activation();

    if let Some(deadline) = node.deadline {
        let days = days_until(deadline, now);
        let floor = if days < 0.0 {
            1.0
        } else if days < 1.0 {
            0.9
        } else if days < 3.0 {
            0.7
        } else {
            0.0
        };
        activation = activation.max(floor);
    }

    activation
}

/// Spreading-activation scorer.
#[derive(Debug, Clone, Default)]
pub struct ActivationEngine {
    config: ActivationConfig,
}

impl ActivationEngine {
    pub fn new(config: ActivationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ActivationConfig {
        &self.config
    }

    /// Build a fresh atom space for `tasks` and spread activation over it.
    pub fn compute(&self, tasks: &[Task], now: DateTime<Utc>) -> Result<Activation> {
        let space = AtomSpace::from_tasks(tasks);
        self.spread(&space, now)
    }

    /// Seed every task node of `space` and run the propagation rounds.
    ///
    /// Each round reads from a snapshot taken at its start, so all updates
    /// within a round are simultaneous. Links with an endpoint that is not a
    /// task node are skipped.
    pub fn spread(&self, space: &AtomSpace, now: DateTime<Utc>) -> Result<Activation> {
        let factor = self.config.spread_factor;
        if !factor.is_finite() || factor < 0.0 {
            return Err(QwixError::ScorerFailure(format!(
                "spread factor must be a finite non-negative number (got {factor})"
            )));
        }

        let mut order: Vec<&str> = Vec::new();
        let mut values: HashMap<&str, f64> = HashMap::new();

        for atom in space.atoms_of_type(AtomType::TaskNode) {
            if let (Some(id), Some(node)) = (atom.key.task_id(), atom.task_node()) {
                order.push(id);
                values.insert(id, seed_activation(node, now));
            }
        }

        let links: Vec<(&str, &str)> = space
            .atoms()
            .iter()
            .filter_map(Atom::link_endpoints)
            .filter(|(source, target)| {
                source != target && values.contains_key(source) && values.contains_key(target)
            })
            .collect();

        for round in 0..self.config.iterations {
            let snapshot = values.clone();
            for &(source, target) in &links {
                let inflow = snapshot[source] * factor;
                if let Some(value) = values.get_mut(target) {
                    *value += inflow;
                }
            }
            trace!(round, links = links.len(), "activation round complete");
        }

        if let Some((id, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(QwixError::ScorerFailure(format!(
                "activation for task '{id}' is not finite ({value})"
            )));
        }

        let mut activation = Activation::default();
        for id in order {
            let value = values[id];
            activation.index.insert(id.to_string(), activation.results.len());
            activation.results.push(ActivationResult {
                task_id: id.to_string(),
                value,
                display_color: DisplayColor::for_activation(value),
            });
        }

        debug!(
            tasks = activation.len(),
            links = links.len(),
            iterations = self.config.iterations,
            "spreading activation computed"
        );
        Ok(activation)
    }
}

impl Scorer for ActivationEngine {
    fn name(&self) -> &'static str {
        "activation"
    }

    fn score(&self, tasks: &[Task], now: DateTime<Utc>) -> Result<Scores> {
        Ok(self.compute(tasks, now)?.into_scores())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;
    use chrono::{Duration, TimeZone};

    const EPS: f64 = 1e-9;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 9, 0, 0).unwrap()
    }

    fn task(id: &str, priority: Priority, deps: &[&str]) -> Task {
        let mut t = Task::new(id, id);
        t.priority = priority;
        t.dependencies = deps.iter().map(|d| d.to_string()).collect();
        t
    }

    fn with_deadline(mut t: Task, offset: Duration) -> Task {
        t.deadline = Some(now() + offset);
        t
    }

    fn seeds(tasks: &[Task]) -> Activation {
        ActivationEngine::new(ActivationConfig {
            iterations: 0,
            ..ActivationConfig::default()
        })
        .compute(tasks, now())
        .unwrap()
    }

    #[test]
    fn priority_sets_the_base_seed() {
        let tasks = vec![
            task("h", Priority::High, &[]),
            task("m", Priority::Medium, &[]),
            task("l", Priority::Low, &[]),
        ];
        let a = seeds(&tasks);

        assert_eq!(a.get("h"), Some(1.0));
        assert_eq!(a.get("m"), Some(0.6));
        assert_eq!(a.get("l"), Some(0.3));
    }

    #[test]
    fn deadline_raises_but_never_lowers_the_seed() {
        let tasks = vec![
            with_deadline(task("overdue", Priority::Low, &[]), Duration::hours(-1)),
            with_deadline(task("today", Priority::Low, &[]), Duration::hours(20)),
            with_deadline(task("soon", Priority::Low, &[]), Duration::hours(60)),
            with_deadline(task("later", Priority::Low, &[]), Duration::days(10)),
            with_deadline(task("high_soon", Priority::High, &[]), Duration::hours(60)),
        ];
        let a = seeds(&tasks);

        assert_eq!(a.get("overdue"), Some(1.0));
        assert_eq!(a.get("today"), Some(0.9));
        assert_eq!(a.get("soon"), Some(0.7));
        assert_eq!(a.get("later"), Some(0.3));
        assert_eq!(a.get("high_soon"), Some(1.0));
    }

    #[test]
    fn each_round_adds_thirty_percent_of_the_prerequisite() {
        let tasks = vec![
            task("a", Priority::High, &[]),
            task("b", Priority::Medium, &["a"]),
        ];

        for (rounds, expected) in [(1, 0.9), (2, 1.2), (3, 1.5)] {
            let engine = ActivationEngine::new(ActivationConfig {
                iterations: rounds,
                ..ActivationConfig::default()
            });
            let a = engine.compute(&tasks, now()).unwrap();
            assert!((a.get("a").unwrap() - 1.0).abs() < EPS);
            assert!((a.get("b").unwrap() - expected).abs() < EPS, "rounds={rounds}");
        }
    }

    #[test]
    fn rounds_read_from_the_start_of_round_snapshot() {
        // a -> b -> c. With simultaneous updates c only sees b's boost one
        // round later.
        let tasks = vec![
            task("a", Priority::High, &[]),
            task("b", Priority::Low, &["a"]),
            task("c", Priority::Low, &["b"]),
        ];
        let engine = ActivationEngine::new(ActivationConfig {
            iterations: 2,
            ..ActivationConfig::default()
        });
        let a = engine.compute(&tasks, now()).unwrap();

        // b: 0.3 + 0.3 + 0.3 = 0.9
        // c: 0.3 + 0.3*0.3 + 0.6*0.3 = 0.57
        assert!((a.get("b").unwrap() - 0.9).abs() < EPS);
        assert!((a.get("c").unwrap() - 0.57).abs() < EPS);
    }

    #[test]
    fn dangling_links_are_ignored() {
        let tasks = vec![task("a", Priority::Low, &["ghost"])];
        let a = ActivationEngine::default().compute(&tasks, now()).unwrap();
        assert_eq!(a.get("a"), Some(0.3));
    }

    #[test]
    fn cycles_do_not_break_spreading() {
        let tasks = vec![
            task("a", Priority::High, &["b"]),
            task("b", Priority::High, &["a"]),
        ];
        let a = ActivationEngine::default().compute(&tasks, now()).unwrap();
        // 1.0 -> 1.3 -> 1.69 -> 2.197
        assert!((a.get("a").unwrap() - 2.197).abs() < EPS);
        assert!((a.get("b").unwrap() - 2.197).abs() < EPS);
    }

    #[test]
    fn results_carry_display_colors_in_task_order() {
        let tasks = vec![
            task("l", Priority::Low, &[]),
            task("h", Priority::High, &[]),
        ];
        let a = ActivationEngine::default().compute(&tasks, now()).unwrap();

        let colors: Vec<(&str, DisplayColor)> = a
            .results()
            .iter()
            .map(|r| (r.task_id.as_str(), r.display_color))
            .collect();
        assert_eq!(
            colors,
            vec![("l", DisplayColor::Green), ("h", DisplayColor::Red)]
        );
    }

    #[test]
    fn invalid_spread_factor_is_a_scorer_failure() {
        let engine = ActivationEngine::new(ActivationConfig {
            spread_factor: f64::NAN,
            iterations: 3,
        });
        let err = engine
            .score(&[task("a", Priority::Low, &[])], now())
            .unwrap_err();
        assert!(matches!(err, QwixError::ScorerFailure(_)));
    }

    #[test]
    fn overflowing_activation_is_a_scorer_failure() {
        let engine = ActivationEngine::new(ActivationConfig {
            spread_factor: f64::MAX,
            iterations: 3,
        });
        let tasks = vec![
            task("a", Priority::High, &[]),
            task("b", Priority::High, &["a"]),
            task("c", Priority::High, &["b"]),
        ];
        assert!(matches!(
            engine.compute(&tasks, now()),
            Err(QwixError::ScorerFailure(_))
        ));
    }

    #[test]
    fn dashed_ids_spread_along_every_link() {
        // (a, b-c) and (a-b, c) would share the printed link name "rel-a-b-c".
        let tasks = vec![
            task("a", Priority::High, &[]),
            task("a-b", Priority::Low, &[]),
            task("b-c", Priority::Low, &["a"]),
            task("c", Priority::Low, &["a-b"]),
        ];
        let a = ActivationEngine::default().compute(&tasks, now()).unwrap();

        assert_eq!(a.len(), tasks.len());
        // b-c: 0.3 + 3 * 0.3 * 1.0
        assert!((a.get("b-c").unwrap() - 1.2).abs() < EPS);
        // c: 0.3 + 3 * 0.3 * 0.3
        assert!((a.get("c").unwrap() - 0.57).abs() < EPS);
        assert_eq!(AtomSpace::from_tasks(&tasks).stats().task_nodes, tasks.len());
    }

    #[test]
    fn task_named_like_a_link_keeps_its_activation() {
        let tasks = vec![
            task("x", Priority::High, &[]),
            task("y", Priority::Medium, &["x"]),
            task("rel-x-y", Priority::High, &[]),
        ];
        let a = ActivationEngine::default().compute(&tasks, now()).unwrap();

        assert_eq!(a.len(), tasks.len());
        assert_eq!(a.get("rel-x-y"), Some(1.0));
        assert!((a.get("y").unwrap() - 1.5).abs() < EPS);
        assert_eq!(AtomSpace::from_tasks(&tasks).stats().task_nodes, tasks.len());
    }
}
