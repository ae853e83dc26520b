use crate::graph::builder::DepGraph;

/// Emit the dependency graph as a DOT (Graphviz) diagram.
pub fn emit_dot(dg: &DepGraph) -> String {
    let mut out = String::from("digraph dependencies {\n");

    let mut names: Vec<&str> = dg.nodes.keys().map(String::as_str).collect();
    names.sort_unstable();
    for name in &names {
        out.push_str(&format!("  \"{name}\";\n"));
    }

    let mut edges: Vec<(String, String)> = dg
        .graph
        .edge_indices()
        .filter_map(|edge_idx| {
            let (src, dst) = dg.graph.edge_endpoints(edge_idx)?;
            Some((dg.graph[src].clone(), dg.graph[dst].clone()))
        })
        .collect();
    edges.sort();
    for (src, dst) in &edges {
        out.push_str(&format!("  \"{src}\" -> \"{dst}\";\n"));
    }

    out.push_str("}\n");
    out
}
