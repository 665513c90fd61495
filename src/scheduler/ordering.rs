//! Demand ordering policy.
//!
//! A single fixed dispatch order, applied before placement:
//!
//! 1. demands with a deadline before demands without one;
//! 2. earlier deadline first (EDD);
//! 3. higher priority first;
//! 4. ascending task id.
//!
//! Deadline-free demands carry the lowest time pressure regardless of
//! priority ties with deadlined ones. The order is part of the engine's
//! contract: identical inputs must produce identical reports, so there is
//! deliberately no pluggable rule layer here.
//!
//! Demands may also name prerequisite task ids; a deterministic topological
//! pass moves prerequisites ahead of their dependents while popping ready
//! demands in the comparator order above, so dependency-free inputs reduce
//! exactly to the plain sort.
//!
//! # Reference
//! Jackson (1955), EDD minimizes maximum lateness on a single machine.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::warn;

use crate::models::Task;

/// Compares two demands by the dispatch order.
///
/// Never returns `Equal` for demands with distinct ids.
pub fn demand_order(a: &Task, b: &Task) -> Ordering {
    match (a.deadline, b.deadline) {
        (Some(da), Some(db)) => da
            .cmp(&db)
            .then_with(|| b.priority.cmp(&a.priority))
            .then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id)),
    }
}

/// Result of dependency-aware ordering.
#[derive(Debug, Clone)]
pub struct OrderedDemands {
    /// Demands in placement order, prerequisites before dependents.
    /// Demands on a dependency cycle are absent.
    pub ordered: Vec<Task>,
    /// Ids of demands on a dependency cycle, ascending.
    pub cyclic: Vec<String>,
}

/// Orders demands for placement.
///
/// Kahn's algorithm over the dependency edges; the ready set is always
/// popped in `demand_order`, which keeps the result deterministic and makes
/// the pass a no-op reordering when no demand declares dependencies.
/// References to unknown task ids are ignored with a warning; a demand
/// depending on itself counts as a cycle.
pub fn order_demands(demands: Vec<Task>) -> OrderedDemands {
    let n = demands.len();
    let mut indegree = vec![0usize; n];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];

    {
        let index_of: HashMap<&str, usize> = demands
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();

        for (i, task) in demands.iter().enumerate() {
            for dep in &task.depends_on {
                match index_of.get(dep.as_str()) {
                    Some(&j) if j != i => {
                        dependents[j].push(i);
                        indegree[i] += 1;
                    }
                    Some(_) => {
                        // Self-dependency: unsatisfiable, lands in `cyclic`.
                        indegree[i] += 1;
                    }
                    None => {
                        warn!(task = %task.id, dependency = %dep, "ignoring unknown dependency id");
                    }
                }
            }
        }
    }

    let mut ready: Vec<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();
    let mut order: Vec<usize> = Vec::with_capacity(n);

    while !ready.is_empty() {
        let mut best = 0;
        for k in 1..ready.len() {
            if demand_order(&demands[ready[k]], &demands[ready[best]]) == Ordering::Less {
                best = k;
            }
        }
        let i = ready.swap_remove(best);
        order.push(i);
        for &dependent in &dependents[i] {
            indegree[dependent] -= 1;
            if indegree[dependent] == 0 {
                ready.push(dependent);
            }
        }
    }

    let mut in_order = vec![false; n];
    for &i in &order {
        in_order[i] = true;
    }
    let mut cyclic: Vec<String> = demands
        .iter()
        .enumerate()
        .filter(|(i, _)| !in_order[*i])
        .map(|(_, t)| t.id.clone())
        .collect();
    cyclic.sort();

    let mut slots: Vec<Option<Task>> = demands.into_iter().map(Some).collect();
    let ordered: Vec<Task> = order.iter().filter_map(|&i| slots[i].take()).collect();

    OrderedDemands { ordered, cyclic }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::{DateTime, TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, d, 17, 0, 0).unwrap()
    }

    fn ids(demands: &[Task]) -> Vec<&str> {
        demands.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_deadline_presence_wins() {
        let a = Task::new("a").with_priority(Priority::Low).with_deadline(day(9));
        let b = Task::new("b").with_priority(Priority::High);
        assert_eq!(demand_order(&a, &b), Ordering::Less);
        assert_eq!(demand_order(&b, &a), Ordering::Greater);
    }

    #[test]
    fn test_earlier_deadline_first() {
        let a = Task::new("a").with_deadline(day(7));
        let b = Task::new("b").with_deadline(day(6));
        assert_eq!(demand_order(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_priority_breaks_deadline_tie() {
        let a = Task::new("a").with_deadline(day(7)).with_priority(Priority::Low);
        let b = Task::new("b").with_deadline(day(7)).with_priority(Priority::High);
        assert_eq!(demand_order(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_priority_orders_deadline_free() {
        let a = Task::new("a").with_priority(Priority::Medium);
        let b = Task::new("b").with_priority(Priority::High);
        assert_eq!(demand_order(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_id_is_final_tie_break() {
        let a = Task::new("a").with_priority(Priority::High);
        let b = Task::new("b").with_priority(Priority::High);
        assert_eq!(demand_order(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_dependency_free_reduces_to_plain_sort() {
        let demands = vec![
            Task::new("late").with_deadline(day(9)),
            Task::new("none").with_priority(Priority::High),
            Task::new("soon").with_deadline(day(6)),
        ];
        let mut expected = demands.clone();
        expected.sort_by(demand_order);

        let result = order_demands(demands);
        assert!(result.cyclic.is_empty());
        assert_eq!(ids(&result.ordered), ids(&expected));
        assert_eq!(ids(&result.ordered), vec!["soon", "late", "none"]);
    }

    #[test]
    fn test_prerequisite_moves_ahead_of_dependent() {
        // "b" sorts first (earlier deadline) but depends on "a".
        let demands = vec![
            Task::new("a").with_deadline(day(9)),
            Task::new("b").with_deadline(day(6)).with_dependency("a"),
        ];
        let result = order_demands(demands);
        assert_eq!(ids(&result.ordered), vec!["a", "b"]);
    }

    #[test]
    fn test_ready_set_popped_in_dispatch_order() {
        let demands = vec![
            Task::new("free").with_priority(Priority::Low),
            Task::new("root").with_deadline(day(8)),
            Task::new("leaf").with_deadline(day(6)).with_dependency("root"),
        ];
        let result = order_demands(demands);
        // root (deadlined) before free (not), leaf released after root.
        assert_eq!(ids(&result.ordered), vec!["root", "leaf", "free"]);
    }

    #[test]
    fn test_cycle_detected() {
        let demands = vec![
            Task::new("a").with_dependency("b"),
            Task::new("b").with_dependency("a"),
            Task::new("c"),
        ];
        let result = order_demands(demands);
        assert_eq!(ids(&result.ordered), vec!["c"]);
        assert_eq!(result.cyclic, vec!["a", "b"]);
    }

    #[test]
    fn test_self_dependency_is_cyclic() {
        let demands = vec![Task::new("a").with_dependency("a")];
        let result = order_demands(demands);
        assert!(result.ordered.is_empty());
        assert_eq!(result.cyclic, vec!["a"]);
    }

    #[test]
    fn test_unknown_dependency_ignored() {
        let demands = vec![Task::new("a").with_dependency("ghost")];
        let result = order_demands(demands);
        assert_eq!(ids(&result.ordered), vec!["a"]);
        assert!(result.cyclic.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let result = order_demands(Vec::new());
        assert!(result.ordered.is_empty());
        assert!(result.cyclic.is_empty());
    }
}
