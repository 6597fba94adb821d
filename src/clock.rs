// src/clock.rs

//! Source of "now" for deadline-sensitive scoring.
//!
//! Activation seeds, the heuristic scorer and the overdue statistics all
//! depend on wall-clock time. Going through a `Clock` lets the CLI pin the
//! instant with `--now` and lets tests stay deterministic.

use std::fmt::Debug;

use chrono::{DateTime, Utc};

/// Abstract time source.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Implementation backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
