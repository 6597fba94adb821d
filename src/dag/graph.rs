// src/dag/graph.rs

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, warn};

use crate::task::{Task, TaskId};

/// Internal node structure: stores immediate deps and dependents as indices
/// into the task slice.
#[derive(Debug, Clone, Default)]
struct GraphNode {
    /// Direct dependencies: tasks that must be completed before this one.
    deps: Vec<usize>,
    /// Direct dependents: tasks that list this one as a dependency.
    dependents: Vec<usize>,
}

/// In-memory dependency graph borrowed from a task slice.
///
/// Nodes are addressed by their position in the slice, so input order is
/// preserved for every traversal built on top of this. Dependency ids that
/// do not resolve to a task are dropped here (the scheduler skips them), as
/// are self-dependencies. When the same id appears twice, references resolve
/// to the first occurrence.
#[derive(Debug, Clone)]
pub struct TaskGraph<'a> {
    tasks: &'a [Task],
    index: HashMap<&'a str, usize>,
    nodes: Vec<GraphNode>,
}

impl<'a> TaskGraph<'a> {
    /// Build the graph for a task collection.
    pub fn new(tasks: &'a [Task]) -> Self {
        let mut index: HashMap<&'a str, usize> = HashMap::with_capacity(tasks.len());
        for (i, task) in tasks.iter().enumerate() {
            if index.contains_key(task.id.as_str()) {
                warn!(task = %task.id, "duplicate task id; references resolve to the first one");
                continue;
            }
            index.insert(task.id.as_str(), i);
        }

        let mut nodes = vec![GraphNode::default(); tasks.len()];

        for (i, task) in tasks.iter().enumerate() {
            for dep in &task.dependencies {
                if *dep == task.id {
                    warn!(task = %task.id, "task depends on itself; ignoring edge");
                    continue;
                }
                let Some(&j) = index.get(dep.as_str()) else {
                    debug!(task = %task.id, dep = %dep, "dependency does not resolve to a task");
                    continue;
                };
                if nodes[i].deps.contains(&j) {
                    continue;
                }
                nodes[i].deps.push(j);
                nodes[j].dependents.push(i);
            }
        }

        Self {
            tasks,
            index,
            nodes,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The underlying task slice, in input order.
    pub fn tasks(&self) -> &'a [Task] {
        self.tasks
    }

    pub fn task(&self, idx: usize) -> &'a Task {
        &self.tasks[idx]
    }

    /// Position of the first task carrying `id`.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Resolved dependencies of the task at `idx`, in stored order.
    pub fn dependencies_of(&self, idx: usize) -> &[usize] {
        self.nodes
            .get(idx)
            .map(|n| n.deps.as_slice())
            .unwrap_or(&[])
    }

    /// Tasks that depend on the task at `idx`, in input order.
    pub fn dependents_of(&self, idx: usize) -> &[usize] {
        self.nodes
            .get(idx)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// Groups of tasks that sit on a dependency cycle.
    ///
    /// Each group is a strongly connected component with more than one
    /// member, listed in input order; groups are ordered by their first
    /// member.
    pub fn cyclic_groups(&self) -> Vec<Vec<TaskId>> {
        // Edge direction: dep -> dependent.
        let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();
        for idx in 0..self.len() {
            graph.add_node(idx);
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            for &dep in &node.deps {
                graph.add_edge(dep, idx, ());
            }
        }

        let mut groups: Vec<Vec<usize>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|mut component| {
                component.sort_unstable();
                component
            })
            .collect();
        groups.sort_by_key(|component| component[0]);

        groups
            .into_iter()
            .map(|component| {
                component
                    .into_iter()
                    .map(|idx| self.tasks[idx].id.clone())
                    .collect()
            })
            .collect()
    }
}
