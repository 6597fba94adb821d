// src/dag/topo.rs

//! Dependency-respecting order over a task collection.

use tracing::{debug, warn};

use crate::dag::graph::TaskGraph;
use crate::task::Task;

/// Visit state of a task during the depth-first walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Order task indices so every task comes after its dependencies.
///
/// Depth-first postorder with three-colour marking, driven by an explicit
/// stack. Roots are taken in input order and dependencies in stored order;
/// ids that do not resolve to a task are skipped.
///
/// On the first cycle the walk is abandoned and the result degrades to
/// `[every task not yet done, in input order] ++ [tasks done so far]`. The
/// result always contains every index exactly once.
pub fn topological_indices(graph: &TaskGraph<'_>) -> Vec<usize> {
    let n = graph.len();
    let mut marks = vec![Mark::Unvisited; n];
    let mut done: Vec<usize> = Vec::with_capacity(n);

    for root in 0..n {
        if marks[root] != Mark::Unvisited {
            continue;
        }

        // Each frame: (task index, position of the next dependency to visit).
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        marks[root] = Mark::InProgress;

        while let Some(frame) = stack.last_mut() {
            let (idx, next) = *frame;
            let deps = graph.dependencies_of(idx);

            let Some(&dep) = deps.get(next) else {
                marks[idx] = Mark::Done;
                done.push(idx);
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match marks[dep] {
                Mark::Done => {}
                Mark::Unvisited => {
                    marks[dep] = Mark::InProgress;
                    stack.push((dep, 0));
                }
                Mark::InProgress => {
                    warn!(
                        task = %graph.task(idx).id,
                        dep = %graph.task(dep).id,
                        "dependency cycle detected; placing unsorted tasks first"
                    );
                    let mut order: Vec<usize> =
                        (0..n).filter(|&i| marks[i] != Mark::Done).collect();
                    order.extend(done);
                    return order;
                }
            }
        }
    }

    debug!(tasks = n, "topological order computed");
    done
}

/// Tasks in dependency order, see [`topological_indices`].
pub fn topological_order(tasks: &[Task]) -> Vec<&Task> {
    let graph = TaskGraph::new(tasks);
    topological_indices(&graph)
        .into_iter()
        .map(|idx| &tasks[idx])
        .collect()
}
