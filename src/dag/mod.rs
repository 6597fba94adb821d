// src/dag/mod.rs

//! Dependency graph representation and scheduling.
//!
//! - [`graph`] holds the indexed dependency graph of a task slice.
//! - [`eligibility`] decides whether a task's prerequisites are satisfied.
//! - [`atoms`] provides the typed atom space the activation engine runs on.
//! - [`activation`] computes spreading-activation urgency scores.
//! - [`topo`] produces the dependency-respecting order, fail-soft on cycles.
//! - [`scorer`] defines the pluggable scoring seam.
//! - [`heuristic`] contains the deterministic fallback scorer.
//! - [`composer`] merges order and scores into the recommended sequence.

pub mod activation;
pub mod atoms;
pub mod composer;
pub mod eligibility;
pub mod graph;
pub mod heuristic;
pub mod scorer;
pub mod topo;

pub use activation::{Activation, ActivationConfig, ActivationEngine, ActivationResult};
pub use atoms::{Atom, AtomKey, AtomSpace, AtomStats, AtomType};
pub use composer::{ComposedSchedule, ScheduleComposer};
pub use eligibility::{can_task_start, ready_tasks};
pub use graph::TaskGraph;
pub use heuristic::HeuristicScorer;
pub use scorer::{Scorer, Scores};
pub use topo::topological_order;
