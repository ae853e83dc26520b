use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::NodeIndex;

use crate::graph::builder::DepGraph;
use crate::model::ident::Scope;
use crate::model::item::TestItem;

/// Returns `true` if the declaration graph contains a cycle.
pub fn has_cycle(dg: &DepGraph) -> bool {
    toposort(&dg.graph, None).is_err()
}

/// Find a cycle in the declaration graph, returning the names along the
/// cycle path. Returns `None` if the graph is acyclic.
pub fn find_cycle(dg: &DepGraph) -> Option<Vec<String>> {
    use std::collections::HashSet;

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();
    let mut stack_path = Vec::new();

    for start in dg.graph.node_indices() {
        if !visited.contains(&start)
            && let Some(cycle) =
                dfs_find_cycle(dg, start, &mut visited, &mut in_stack, &mut stack_path)
        {
            return Some(cycle);
        }
    }

    None
}

fn dfs_find_cycle(
    dg: &DepGraph,
    node: NodeIndex,
    visited: &mut std::collections::HashSet<NodeIndex>,
    in_stack: &mut std::collections::HashSet<NodeIndex>,
    stack_path: &mut Vec<NodeIndex>,
) -> Option<Vec<String>> {
    visited.insert(node);
    in_stack.insert(node);
    stack_path.push(node);

    for neighbor in dg.graph.neighbors_directed(node, Direction::Outgoing) {
        if !visited.contains(&neighbor) {
            if let Some(cycle) = dfs_find_cycle(dg, neighbor, visited, in_stack, stack_path) {
                return Some(cycle);
            }
        } else if in_stack.contains(&neighbor) {
            let cycle_start = stack_path.iter().position(|&n| n == neighbor)?;
            let cycle: Vec<String> = stack_path[cycle_start..]
                .iter()
                .map(|&idx| dg.graph[idx].clone())
                .collect();
            return Some(cycle);
        }
    }

    stack_path.pop();
    in_stack.remove(&node);
    None
}

/// Dependencies that are first produced *after* their dependent's position
/// in collection order, as `(dependent name, dependency name)` pairs.
///
/// Execution order is the host's; a dependency that runs later than its
/// dependent is never registered at check time, so the dependent always
/// skips. Advisory only — gating behavior is unchanged.
pub fn order_conflicts(items: &[TestItem]) -> Vec<(String, String)> {
    use std::collections::HashMap;

    // Earliest collection position for every name an item can register
    // under: its canonical name at each scope, plus any explicit mark names.
    let mut first_produced: HashMap<String, usize> = HashMap::new();
    for (i, item) in items.iter().enumerate() {
        for scope in Scope::ALL {
            first_produced
                .entry(item.id.canonical(scope))
                .or_insert(i);
        }
        for mark in &item.marks {
            if let Some(name) = &mark.name {
                first_produced.entry(name.clone()).or_insert(i);
            }
        }
    }

    let mut conflicts = Vec::new();
    for (i, item) in items.iter().enumerate() {
        for mark in &item.marks {
            for dep in &mark.depends {
                if first_produced.get(dep).is_some_and(|&j| j > i) {
                    conflicts.push((item.name().to_owned(), dep.clone()));
                }
            }
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::build;
    use crate::model::ident::TestId;
    use crate::model::item::DependencyMark;

    fn item(node_id: &str) -> TestItem {
        TestItem::new(TestId::parse(node_id).expect("valid node id"))
    }

    fn dep_item(node_id: &str, depends: &[&str]) -> TestItem {
        item(node_id).with_mark(DependencyMark::new().depends_on(depends.iter().copied()))
    }

    #[test]
    fn acyclic_chain_has_no_cycle() {
        let dg = build(&[
            dep_item("a.py::test_b", &["test_a"]),
            dep_item("a.py::test_c", &["test_b"]),
        ]);
        assert!(!has_cycle(&dg));
        assert!(find_cycle(&dg).is_none());
    }

    #[test]
    fn mutual_dependency_is_a_cycle() {
        let dg = build(&[
            dep_item("a.py::test_a", &["test_b"]),
            dep_item("a.py::test_b", &["test_a"]),
        ]);
        assert!(has_cycle(&dg));
        let cycle = find_cycle(&dg).unwrap();
        assert_eq!(cycle.len(), 2);
        assert!(cycle.contains(&"test_a".to_owned()));
        assert!(cycle.contains(&"test_b".to_owned()));
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let dg = build(&[dep_item("a.py::test_a", &["test_a"])]);
        assert!(has_cycle(&dg));
        assert_eq!(find_cycle(&dg).unwrap(), vec!["test_a"]);
    }

    #[test]
    fn no_conflicts_when_dependencies_come_first() {
        let items = vec![item("a.py::test_a"), dep_item("a.py::test_b", &["test_a"])];
        assert!(order_conflicts(&items).is_empty());
    }

    #[test]
    fn dependency_collected_later_is_flagged() {
        let items = vec![dep_item("a.py::test_b", &["test_a"]), item("a.py::test_a")];
        assert_eq!(
            order_conflicts(&items),
            vec![("test_b".to_owned(), "test_a".to_owned())]
        );
    }

    #[test]
    fn unknown_dependency_is_not_an_order_conflict() {
        let items = vec![dep_item("a.py::test_b", &["test_never_collected"])];
        assert!(order_conflicts(&items).is_empty());
    }

    #[test]
    fn explicit_mark_name_counts_as_produced() {
        let producer =
            item("a.py::test_late").with_mark(DependencyMark::new().named("late_alias"));
        let items = vec![dep_item("a.py::test_b", &["late_alias"]), producer];
        assert_eq!(
            order_conflicts(&items),
            vec![("test_b".to_owned(), "late_alias".to_owned())]
        );
    }

    #[test]
    fn session_canonical_dependency_is_tracked() {
        let consumer = item("pkg/test_b.py::test_b").with_mark(
            DependencyMark::new()
                .depends_on(["pkg/test_a.py::test_a"])
                .in_scope(Scope::Session),
        );
        let items = vec![consumer, item("pkg/test_a.py::test_a")];
        assert_eq!(order_conflicts(&items).len(), 1);
    }
}
