// src/config/validate.rs

use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::warn;

use crate::config::model::{RawTaskFile, SchedulerSection, TaskFile};
use crate::errors::{QwixError, Result};

impl TryFrom<RawTaskFile> for TaskFile {
    type Error = QwixError;

    fn try_from(raw: RawTaskFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_file(&raw)?;
        Ok(TaskFile::new_unchecked(raw.scheduler, raw.task))
    }
}

fn validate_raw_file(file: &RawTaskFile) -> Result<()> {
    validate_scheduler(&file.scheduler)?;
    validate_tasks(file)?;
    warn_dangling_dependencies(file);
    warn_cycles(file);
    Ok(())
}

fn validate_scheduler(section: &SchedulerSection) -> Result<()> {
    if !section.spread_factor.is_finite() || section.spread_factor < 0.0 {
        return Err(QwixError::ConfigError(format!(
            "[scheduler].spread_factor must be a finite number >= 0 (got {})",
            section.spread_factor
        )));
    }

    if section.upcoming_window_hours == 0 {
        return Err(QwixError::ConfigError(
            "[scheduler].upcoming_window_hours must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_tasks(file: &RawTaskFile) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(file.task.len());

    for task in file.task.iter() {
        if task.id.trim().is_empty() {
            return Err(QwixError::ConfigError(format!(
                "task titled '{}' has an empty id",
                task.title
            )));
        }
        if !seen.insert(task.id.as_str()) {
            return Err(QwixError::ConfigError(format!(
                "duplicate task id '{}'",
                task.id
            )));
        }
        if task.depends_on(&task.id) {
            return Err(QwixError::ConfigError(format!(
                "task '{}' cannot depend on itself",
                task.id
            )));
        }
        if task.estimated_minutes == Some(0) {
            return Err(QwixError::ConfigError(format!(
                "task '{}' has estimated_minutes = 0; omit it or use a positive value",
                task.id
            )));
        }
    }

    Ok(())
}

/// Unknown ids keep a task blocked forever, but the file is still usable.
fn warn_dangling_dependencies(file: &RawTaskFile) {
    let known: HashSet<&str> = file.task.iter().map(|t| t.id.as_str()).collect();

    for task in file.task.iter() {
        for dep in task.dependencies.iter() {
            if !known.contains(dep.as_str()) {
                warn!(
                    task = %task.id,
                    dependency = %dep,
                    "task depends on an unknown id and can never start"
                );
            }
        }
    }
}

/// Cycles are tolerated by the scheduler, so they are reported, not rejected.
fn warn_cycles(file: &RawTaskFile) {
    // Edge direction: dependency -> dependent.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for task in file.task.iter() {
        graph.add_node(task.id.as_str());
    }

    for task in file.task.iter() {
        for dep in task.dependencies.iter() {
            if graph.contains_node(dep.as_str()) {
                graph.add_edge(dep.as_str(), task.id.as_str(), ());
            }
        }
    }

    if let Err(cycle) = toposort(&graph, None) {
        warn!(
            task = cycle.node_id(),
            "dependency cycle detected; ordering will fall back to file order"
        );
    }
}
