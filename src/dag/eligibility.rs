// src/dag/eligibility.rs

//! Whether a task's prerequisites are satisfied.

use tracing::debug;

use crate::task::Task;

/// Whether `task` can be started given the rest of the collection.
///
/// A task without dependencies can always start. Otherwise every dependency
/// must resolve to a task in `all_tasks` that is marked completed; an id with
/// no matching task counts as not completed and blocks the task.
pub fn can_task_start(task: &Task, all_tasks: &[Task]) -> bool {
    for dep_id in &task.dependencies {
        let dep = match all_tasks.iter().find(|t| t.id == *dep_id) {
            Some(d) => d,
            None => {
                debug!(
                    task = %task.id,
                    dep = %dep_id,
                    "dependency missing from task collection; treating as unsatisfied"
                );
                return false;
            }
        };

        if !dep.completed {
            return false;
        }
    }

    true
}

/// Incomplete tasks that can be started right now, in input order.
pub fn ready_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| !task.completed && can_task_start(task, tasks))
        .collect()
}
