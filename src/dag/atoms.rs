// src/dag/atoms.rs

//! Typed atom graph that the activation engine runs on.
//!
//! An [`AtomSpace`] holds two kinds of atoms:
//! - one `TaskNode` per task, whose outgoing list is the task's dependency ids
//! - one `DependencyLink` per (prerequisite, dependent) pair, whose outgoing
//!   list is `[prerequisite, dependent]`
//!
//! Atoms are keyed by [`AtomKey`], so a task id never collides with a link,
//! whatever characters the ids contain.
//!
//! The space is built from a task slice by [`AtomSpace::from_tasks`] and owned
//! by the caller; every query builds its own.

use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::task::{Task, TaskId};
use crate::types::Priority;

/// Label carried by every dependency link atom.
pub const DEPENDS_ON: &str = "depends_on";

/// Kind of an atom, for type queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomType {
    TaskNode,
    DependencyLink,
}

/// Identity of an atom within a space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AtomKey {
    Task(TaskId),
    Link { source: TaskId, target: TaskId },
}

impl AtomKey {
    pub fn task(id: &str) -> Self {
        AtomKey::Task(id.to_string())
    }

    pub fn link(source: &str, target: &str) -> Self {
        AtomKey::Link {
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    pub fn atom_type(&self) -> AtomType {
        match self {
            AtomKey::Task(_) => AtomType::TaskNode,
            AtomKey::Link { .. } => AtomType::DependencyLink,
        }
    }

    /// The task id, for task node keys.
    pub fn task_id(&self) -> Option<&str> {
        match self {
            AtomKey::Task(id) => Some(id),
            AtomKey::Link { .. } => None,
        }
    }
}

/// Task ids print as-is, links as `rel-<prerequisite>-<dependent>`.
///
/// The printed form is for display only and may be ambiguous when ids
/// contain dashes; lookups always go through the key.
impl fmt::Display for AtomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomKey::Task(id) => f.write_str(id),
            AtomKey::Link { source, target } => write!(f, "rel-{source}-{target}"),
        }
    }
}

/// Scheduling-relevant snapshot of a task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskNodeValue {
    pub title: String,
    pub priority: Priority,
    pub completed: bool,
    pub estimated_minutes: Option<u32>,
    pub deadline: Option<DateTime<Utc>>,
}

/// Payload of an atom.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomValue {
    TaskNode(TaskNodeValue),
    DependencyLink { label: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub key: AtomKey,
    pub value: AtomValue,
    /// Task ids this atom points at.
    pub outgoing: Vec<TaskId>,
}

impl Atom {
    pub fn from_task(task: &Task) -> Self {
        Self {
            key: AtomKey::task(&task.id),
            value: AtomValue::TaskNode(TaskNodeValue {
                title: task.title.clone(),
                priority: task.priority,
                completed: task.completed,
                estimated_minutes: task.estimated_minutes,
                deadline: task.deadline,
            }),
            outgoing: task.dependencies.clone(),
        }
    }

    pub fn dependency_link(prerequisite: &str, dependent: &str) -> Self {
        Self {
            key: AtomKey::link(prerequisite, dependent),
            value: AtomValue::DependencyLink { label: DEPENDS_ON },
            outgoing: vec![prerequisite.to_string(), dependent.to_string()],
        }
    }

    pub fn atom_type(&self) -> AtomType {
        self.key.atom_type()
    }

    pub fn task_node(&self) -> Option<&TaskNodeValue> {
        match &self.value {
            AtomValue::TaskNode(value) => Some(value),
            AtomValue::DependencyLink { .. } => None,
        }
    }

    /// `(prerequisite, dependent)` for dependency link atoms.
    pub fn link_endpoints(&self) -> Option<(&str, &str)> {
        match &self.key {
            AtomKey::Link { source, target } => Some((source.as_str(), target.as_str())),
            AtomKey::Task(_) => None,
        }
    }
}

/// Atom counts for the analytics panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AtomStats {
    pub task_nodes: usize,
    pub dependency_links: usize,
    pub total_atoms: usize,
}

/// Insertion-ordered atom store keyed by [`AtomKey`].
#[derive(Debug, Clone, Default)]
pub struct AtomSpace {
    atoms: Vec<Atom>,
    index: HashMap<AtomKey, usize>,
}

impl AtomSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the atom space for a task collection.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut space = Self::new();

        for task in tasks {
            space.add_atom(Atom::from_task(task));
        }

        for task in tasks {
            for dep in &task.dependencies {
                space.add_atom(Atom::dependency_link(dep, &task.id));
            }
        }

        debug!(
            atoms = space.len(),
            tasks = tasks.len(),
            "built atom space from task collection"
        );
        space
    }

    /// Insert an atom, replacing any atom with the same key in place.
    pub fn add_atom(&mut self, atom: Atom) -> Option<Atom> {
        match self.index.get(&atom.key) {
            Some(&pos) => {
                trace!(atom = %atom.key, "replacing atom with the same key");
                Some(std::mem::replace(&mut self.atoms[pos], atom))
            }
            None => {
                self.index.insert(atom.key.clone(), self.atoms.len());
                self.atoms.push(atom);
                None
            }
        }
    }

    pub fn get(&self, key: &AtomKey) -> Option<&Atom> {
        self.index.get(key).map(|&pos| &self.atoms[pos])
    }

    /// Task node atom for `id`.
    pub fn task(&self, id: &str) -> Option<&Atom> {
        self.get(&AtomKey::task(id))
    }

    /// Link atom joining `prerequisite` to `dependent`.
    pub fn link(&self, prerequisite: &str, dependent: &str) -> Option<&Atom> {
        self.get(&AtomKey::link(prerequisite, dependent))
    }

    /// All atoms in insertion order.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atoms_of_type(&self, kind: AtomType) -> impl Iterator<Item = &Atom> {
        self.atoms.iter().filter(move |atom| atom.atom_type() == kind)
    }

    pub fn dependency_link_atoms(&self) -> Vec<&Atom> {
        self.atoms_of_type(AtomType::DependencyLink).collect()
    }

    /// Task nodes that the atom at `key` points at and that exist in the space.
    pub fn connected(&self, key: &AtomKey) -> Vec<&Atom> {
        let Some(atom) = self.get(key) else {
            return Vec::new();
        };
        atom.outgoing
            .iter()
            .filter_map(|out| self.task(out))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn stats(&self) -> AtomStats {
        let task_nodes = self.atoms_of_type(AtomType::TaskNode).count();
        AtomStats {
            task_nodes,
            dependency_links: self.len() - task_nodes,
            total_atoms: self.len(),
        }
    }

    /// Find a chain of dependency links connecting `start` to `end`.
    ///
    /// Links are followed in either direction, depth-first, in insertion
    /// order. Returns the ids along the path including both ends, `[start]`
    /// when `start == end`, and an empty vector when `start` is not a task
    /// node or `end` cannot be reached.
    pub fn resolve_dependency_path(&self, start: &str, end: &str) -> Vec<TaskId> {
        if start == end {
            return vec![start.to_string()];
        }
        if self.task(start).is_none() {
            return Vec::new();
        }

        let links: Vec<(&str, &str)> = self
            .atoms
            .iter()
            .filter_map(Atom::link_endpoints)
            .filter(|(source, target)| source != target)
            .collect();

        // Each frame: (task id, position of the next link to try).
        let mut stack: Vec<(&str, usize)> = vec![(start, 0)];
        let mut visited: HashSet<&str> = HashSet::from([start]);

        while let Some(frame) = stack.last_mut() {
            let (current, next) = *frame;

            let step = links[next..]
                .iter()
                .enumerate()
                .find_map(|(offset, &(source, target))| {
                    let neighbour = if source == current {
                        target
                    } else if target == current {
                        source
                    } else {
                        return None;
                    };
                    Some((next + offset, neighbour))
                });

            let Some((link_pos, neighbour)) = step else {
                stack.pop();
                continue;
            };
            frame.1 = link_pos + 1;

            if neighbour == end {
                let mut path: Vec<TaskId> =
                    stack.iter().map(|(id, _)| id.to_string()).collect();
                path.push(end.to_string());
                return path;
            }

            if self.task(neighbour).is_some() && visited.insert(neighbour) {
                stack.push((neighbour, 0));
            }
        }

        Vec::new()
    }
}
