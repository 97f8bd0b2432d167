//! The validity predicate: define-before-use, and optionally the distance bound.

use crate::graph::Graph;
use crate::node::NodeIndex;

/// Checks `graph`'s *current chain order* against define-before-use and,
/// if `check_distance`, the `d_max` use-to-def distance bound.
///
/// Positions are derived by walking `prev`/`next` from the head, which keeps this
/// check in lockstep with whatever the chain actually represents (invariant 3).
pub fn satisfies(graph: &Graph, check_distance: bool, d_max: usize) -> bool {
    let positions = graph.chain_positions();
    check(graph, check_distance, d_max, |idx| positions[&idx])
}

/// Checks the same requirements as [`satisfies`], but against each node's
/// search-scratch `position` rather than the chain order. Used by the ordering
/// search mid-flight, before a solution has been relinked into the chain.
///
/// Returns `false` (rather than panicking) if any node's position is still
/// unassigned, since that can only mean the search has not finished yet.
pub fn satisfies_assigned(graph: &Graph, check_distance: bool, d_max: usize) -> bool {
    for idx in graph.iter_chain() {
        if graph.node(idx).position().is_none() {
            return false;
        }
    }
    check(graph, check_distance, d_max, |idx| {
        graph.node(idx).position().unwrap()
    })
}

fn check(
    graph: &Graph,
    check_distance: bool,
    d_max: usize,
    position_of: impl Fn(NodeIndex) -> usize,
) -> bool {
    for idx in graph.iter_chain() {
        let node = graph.node(idx);
        let node_pos = position_of(idx);
        for &operand in node.operands() {
            if operand == idx {
                continue; // self-reference: no real dependency
            }
            let operand_pos = position_of(operand);
            if operand_pos >= node_pos {
                return false;
            }
            if check_distance && node_pos - operand_pos > d_max {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::OpCode;

    #[test]
    fn chain_of_immediate_predecessors_is_always_satisfied() {
        let mut g = Graph::new();
        g.append_node(OpCode::Original(0), &[]).unwrap();
        for i in 1..5 {
            g.append_node(OpCode::Original(i), &[1]).unwrap();
        }
        assert!(satisfies(&g, true, 7));
        assert!(satisfies(&g, false, 7));
    }

    #[test]
    fn distant_use_fails_strict_but_not_loose() {
        let mut g = Graph::new();
        g.append_node(OpCode::Original(0), &[]).unwrap();
        for i in 1..9 {
            g.append_node(OpCode::Original(i), &[1]).unwrap();
        }
        // Node 8 reads node 0, 8 positions back.
        g.append_node(OpCode::Original(9), &[9]).unwrap();
        assert!(!satisfies(&g, true, 7));
        assert!(satisfies(&g, false, 7));
    }

    #[test]
    fn self_reference_is_not_a_violation() {
        let mut g = Graph::new();
        g.append_node(OpCode::Original(0), &[]).unwrap();
        g.append_node(OpCode::Original(1), &[0]).unwrap();
        assert!(satisfies(&g, true, 7));
    }
}
