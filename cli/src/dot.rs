//! Renders a [`graph::Graph`] as a DOT `digraph` block.

use std::collections::HashMap;
use std::fmt::Write as _;

use graph::{Graph, NodeIndex};

/// Prints every edge `producer -> user`, labelling nodes by their position in
/// `graph`'s current chain order, and styling copy nodes red.
pub fn render(graph: &Graph) -> String {
    let positions: HashMap<NodeIndex, usize> = graph.chain_positions();
    let mut out = String::new();
    out.push_str("digraph nodes { \n");

    let mut copy_nodes = Vec::new();
    for idx in graph.iter_chain() {
        let node = graph.node(idx);
        if node.is_copy() {
            copy_nodes.push(idx);
        }
        for &user in node.users() {
            let _ = writeln!(out, "  {}->{}", positions[&idx], positions[&user]);
        }
    }
    for idx in copy_nodes {
        let _ = writeln!(out, "  {} [color=red]", positions[&idx]);
    }

    out.push_str("}\n");
    out
}
