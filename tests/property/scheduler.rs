use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use qwix::dag::{ActivationEngine, ScheduleComposer, topological_order};
use qwix::task::Task;
use qwix::types::Priority;
use qwix_test_utils::builders::TaskBuilder;
use qwix_test_utils::fixed_clock;

fn priority(n: usize) -> Priority {
    match n % 3 {
        0 => Priority::Low,
        1 => Priority::Medium,
        _ => Priority::High,
    }
}

// Strategy to generate an acyclic task set.
// Acyclicity comes from only letting task N depend on tasks 0..N-1; the list
// is then shuffled so input order is not already topological.
fn acyclic_tasks_strategy(max_tasks: usize) -> impl Strategy<Value = Vec<Task>> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        let deps_strat = proptest::collection::vec(
            (
                proptest::collection::vec(any::<usize>(), 0..4),
                any::<usize>(),
                any::<bool>(),
                proptest::option::of(-72i64..240),
            ),
            num_tasks,
        );

        deps_strat
            .prop_map(move |specs| {
                specs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (potential_deps, prio, completed, due))| {
                        let mut builder =
                            TaskBuilder::new(&format!("task_{i}")).priority(priority(prio));
                        let valid: HashSet<usize> = if i > 0 {
                            potential_deps.into_iter().map(|d| d % i).collect()
                        } else {
                            HashSet::new()
                        };
                        for dep in valid {
                            builder = builder.after(&format!("task_{dep}"));
                        }
                        if completed {
                            builder = builder.completed();
                        }
                        if let Some(hours) = due {
                            builder = builder.due_in_hours(hours);
                        }
                        builder.build()
                    })
                    .collect::<Vec<_>>()
            })
            .prop_shuffle()
    })
}

// Arbitrary dependencies between any two distinct tasks, cycles included.
fn any_tasks_strategy(max_tasks: usize) -> impl Strategy<Value = Vec<Task>> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        proptest::collection::vec(
            (proptest::collection::vec(0..num_tasks, 0..4), any::<bool>()),
            num_tasks,
        )
        .prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (deps, completed))| {
                    let mut builder = TaskBuilder::new(&format!("task_{i}"));
                    for dep in deps.into_iter().filter(|&d| d != i) {
                        builder = builder.after(&format!("task_{dep}"));
                    }
                    if completed {
                        builder = builder.completed();
                    }
                    builder.build()
                })
                .collect::<Vec<_>>()
        })
    })
}

fn positions(order: &[&Task]) -> HashMap<String, usize> {
    order
        .iter()
        .enumerate()
        .map(|(pos, t)| (t.id.clone(), pos))
        .collect()
}

fn is_permutation(order: &[&Task], tasks: &[Task]) -> bool {
    let mut seen: Vec<&str> = order.iter().map(|t| t.id.as_str()).collect();
    let mut expected: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    seen.sort_unstable();
    expected.sort_unstable();
    seen == expected
}

fn composer() -> ScheduleComposer {
    ScheduleComposer::new(Box::new(ActivationEngine::default()), fixed_clock())
}

proptest! {
    #[test]
    fn topological_order_puts_prerequisites_first(tasks in acyclic_tasks_strategy(12)) {
        let order = topological_order(&tasks);
        prop_assert!(is_permutation(&order, &tasks));

        let pos = positions(&order);
        for task in &tasks {
            for dep in &task.dependencies {
                prop_assert!(pos[dep] < pos[&task.id], "{} must precede {}", dep, task.id);
            }
        }
    }

    #[test]
    fn composed_order_respects_incomplete_prerequisites(tasks in acyclic_tasks_strategy(12)) {
        let order = composer().optimized_order(&tasks);
        prop_assert!(is_permutation(&order, &tasks));

        let pos = positions(&order);
        let completed: HashMap<&str, bool> =
            tasks.iter().map(|t| (t.id.as_str(), t.completed)).collect();

        for task in tasks.iter().filter(|t| !t.completed) {
            for dep in task.dependencies.iter().filter(|d| !completed[d.as_str()]) {
                prop_assert!(pos[dep] < pos[&task.id], "{} must precede {}", dep, task.id);
            }
        }

        // Completed tasks trail every incomplete one.
        let first_done = order.iter().position(|t| t.completed).unwrap_or(order.len());
        prop_assert!(order[first_done..].iter().all(|t| t.completed));
    }

    #[test]
    fn recommendation_is_never_completed(tasks in acyclic_tasks_strategy(12)) {
        match composer().recommended_next(&tasks) {
            Some(task) => prop_assert!(!task.completed),
            None => prop_assert!(tasks.iter().all(|t| t.completed)),
        }
    }

    #[test]
    fn cyclic_inputs_still_give_total_orders(tasks in any_tasks_strategy(10)) {
        prop_assert!(is_permutation(&topological_order(&tasks), &tasks));
        prop_assert!(is_permutation(&composer().optimized_order(&tasks), &tasks));
    }
}
