use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::model::item::TestItem;

/// The dependency graph over test declarations, backed by petgraph.
///
/// One node per registration name (the name a test registers under at its
/// declaration's scope, or an explicit declared name) and one per referenced
/// dependency name; edges run dependency -> dependent. Purely diagnostic —
/// gating never consults this graph.
pub struct DepGraph {
    pub graph: DiGraph<String, ()>,
    pub nodes: HashMap<String, NodeIndex>,
}

impl DepGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Build the dependency graph from a (typically resolved) item list.
pub fn build(items: &[TestItem]) -> DepGraph {
    let mut graph = DiGraph::new();
    let mut nodes: HashMap<String, NodeIndex> = HashMap::new();

    for item in items {
        for mark in &item.marks {
            let dependent = mark
                .name
                .clone()
                .unwrap_or_else(|| item.id.canonical(mark.scope));
            let dependent_idx = node(&mut graph, &mut nodes, &dependent);
            for dep in &mark.depends {
                let dep_idx = node(&mut graph, &mut nodes, dep);
                graph.add_edge(dep_idx, dependent_idx, ());
            }
        }
    }

    DepGraph { graph, nodes }
}

fn node(
    graph: &mut DiGraph<String, ()>,
    nodes: &mut HashMap<String, NodeIndex>,
    name: &str,
) -> NodeIndex {
    if let Some(&idx) = nodes.get(name) {
        return idx;
    }
    let idx = graph.add_node(name.to_owned());
    nodes.insert(name.to_owned(), idx);
    idx
}
