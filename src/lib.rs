// src/lib.rs

pub mod analytics;
pub mod cli;
pub mod clock;
pub mod config;
pub mod dag;
pub mod errors;
pub mod logging;
pub mod task;
pub mod types;

use std::fmt::Write as _;

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info};

use crate::analytics::{TaskStats, activation_chart};
use crate::cli::{CliArgs, Command};
use crate::clock::{Clock, FixedClock, SystemClock};
use crate::config::loader::load_and_validate;
use crate::config::model::TaskFile;
use crate::dag::activation::{ActivationEngine, ActivationResult};
use crate::dag::atoms::AtomSpace;
use crate::dag::composer::ScheduleComposer;
use crate::dag::eligibility::ready_tasks;
use crate::dag::graph::TaskGraph;
use crate::errors::QwixError;

pub use crate::dag::eligibility::can_task_start;
pub use crate::task::{DependencyLink, Task, TaskId, dependency_links};

/// Recommended work sequence with default tuning, evaluated now.
pub fn optimized_task_order(tasks: &[Task]) -> Vec<&Task> {
    ScheduleComposer::default().optimized_order(tasks)
}

/// First incomplete task of [`optimized_task_order`].
pub fn recommended_next_task(tasks: &[Task]) -> Option<&Task> {
    ScheduleComposer::default().recommended_next(tasks)
}

/// Activation of every task with default tuning, evaluated now.
pub fn activation_scores(tasks: &[Task]) -> errors::Result<Vec<ActivationResult>> {
    let activation = ActivationEngine::default().compute(tasks, Utc::now())?;
    Ok(activation.results().to_vec())
}

/// High-level entry point used by `main.rs`.
///
/// Loads and validates the task file, runs the requested command and prints
/// its report to stdout.
pub fn run(args: CliArgs) -> Result<()> {
    let file = load_and_validate(&args.file)?;
    info!(path = %args.file.display(), tasks = file.tasks().len(), "task file loaded");

    let clock: Box<dyn Clock> = match args.now {
        Some(now) => Box::new(FixedClock(now)),
        None => Box::new(SystemClock),
    };

    let report = execute(&file, &args.command, clock)?;
    print!("{report}");
    Ok(())
}

/// Run one command against a loaded task file and render its report.
pub fn execute(file: &TaskFile, command: &Command, clock: Box<dyn Clock>) -> Result<String> {
    let tasks = file.tasks();
    let now = clock.now();
    let config = file.scheduler.activation_config();
    let mut out = String::new();

    match command {
        Command::Order => {
            let composer = ScheduleComposer::new(Box::new(ActivationEngine::new(config)), clock);
            let schedule = composer.compose(tasks);
            if schedule.fell_back {
                writeln!(out, "(scored by {} fallback)", schedule.scorer)?;
            }
            for (pos, task) in schedule.order.iter().enumerate() {
                let score = schedule.scores.get(&task.id).copied().unwrap_or(0.0);
                writeln!(
                    out,
                    "{:>3}. [{}] {:<12} {:<32} {:<6} {:>7.2}",
                    pos + 1,
                    if task.completed { 'x' } else { ' ' },
                    task.id,
                    task.title,
                    task.priority,
                    score
                )?;
            }
        }
        Command::Next => {
            let composer = ScheduleComposer::new(Box::new(ActivationEngine::new(config)), clock);
            match composer.recommended_next(tasks) {
                Some(task) => writeln!(out, "{}  {}", task.id, task.title)?,
                None => writeln!(out, "nothing left to do")?,
            }
        }
        Command::Ready => {
            for task in ready_tasks(tasks) {
                writeln!(out, "{}  {}", task.id, task.title)?;
            }
        }
        Command::Links => {
            for link in dependency_links(tasks) {
                writeln!(out, "{} -> {}", link.source, link.target)?;
            }
        }
        Command::Activation { limit } => {
            let activation = ActivationEngine::new(config).compute(tasks, now)?;
            for bar in activation_chart(tasks, &activation, *limit) {
                writeln!(
                    out,
                    "{:<12} {:<32} {:>6.2} {}",
                    bar.task_id,
                    bar.title,
                    bar.value,
                    bar.color.hex()
                )?;
            }
        }
        Command::Atoms => {
            let stats = AtomSpace::from_tasks(tasks).stats();
            writeln!(out, "task nodes:       {}", stats.task_nodes)?;
            writeln!(out, "dependency links: {}", stats.dependency_links)?;
            writeln!(out, "total atoms:      {}", stats.total_atoms)?;
        }
        Command::Stats => {
            let stats = TaskStats::compute(tasks, now, file.scheduler.upcoming_window());
            write_stats(&mut out, &stats)?;
        }
        Command::Path { from, to } => {
            for id in [from, to] {
                if file.get_task(id).is_none() {
                    return Err(QwixError::TaskNotFound(id.clone()).into());
                }
            }
            let path = AtomSpace::from_tasks(tasks).resolve_dependency_path(from, to);
            if path.is_empty() {
                writeln!(out, "no dependency path from {from} to {to}")?;
            } else {
                writeln!(out, "{}", path.join(" -> "))?;
            }
        }
        Command::Check => {
            let graph = TaskGraph::new(tasks);
            let cycles = graph.cyclic_groups();
            writeln!(out, "{} tasks, {} links", tasks.len(), dependency_links(tasks).len())?;
            if cycles.is_empty() {
                writeln!(out, "no dependency cycles")?;
            }
            for group in cycles {
                writeln!(out, "cycle: {}", group.join(", "))?;
            }
        }
    }

    debug!(?command, "command complete");
    Ok(out)
}

fn write_stats(out: &mut String, stats: &TaskStats) -> std::fmt::Result {
    writeln!(out, "tasks:              {}", stats.total_tasks)?;
    writeln!(
        out,
        "completed:          {} ({:.1}%)",
        stats.completed_tasks, stats.completion_rate
    )?;
    writeln!(out, "overdue:            {}", stats.overdue_tasks)?;
    writeln!(out, "upcoming deadlines: {}", stats.upcoming_deadlines)?;
    writeln!(out, "avg completion:     {:.1} h", stats.avg_completion_hours)?;
    writeln!(
        out,
        "minutes:            {} estimated, {} actual (ratio {:.2})",
        stats.total_estimated_minutes, stats.total_actual_minutes, stats.estimated_vs_actual_ratio
    )?;
    let dist = stats.priority_distribution;
    writeln!(
        out,
        "priority:           high {}, medium {}, low {}",
        dist.high, dist.medium, dist.low
    )?;
    for (tag, count) in &stats.tag_distribution {
        writeln!(out, "tag {tag}: {count}")?;
    }
    Ok(())
}
