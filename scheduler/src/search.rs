//! The ordering search: DFS with backtracking over linear orderings, pruned by
//! the critical-path estimator.

use bit_vec::BitVec;

use graph::{critical_path, new_memo, satisfies_assigned, Graph, Memo, NodeIndex};

/// Attempts to assign every node in `graph` a distinct scratch `position` in
/// `0..graph.len()` such that the resulting assignment satisfies the validator in
/// the requested mode. Mutates node `position` fields in place; on failure every
/// position is restored to `None`.
///
/// Nodes are visited along the graph's current `next` chain, candidate positions
/// tried in increasing order, which together make this deterministic.
pub fn search(graph: &mut Graph, strict: bool, d_max: usize) -> bool {
    let visit_order: Vec<NodeIndex> = graph.iter_chain().collect();
    let n = visit_order.len();
    let mut available = BitVec::from_elem(n, true);
    let mut memo: Memo = new_memo(n);

    let found = dfs(graph, &visit_order, 0, &mut available, &mut memo, strict, d_max);
    if !found {
        graph.reset_positions();
    }
    found
}

fn dfs(
    graph: &mut Graph,
    visit_order: &[NodeIndex],
    idx: usize,
    available: &mut BitVec,
    memo: &mut Memo,
    strict: bool,
    d_max: usize,
) -> bool {
    let n = visit_order.len();
    if idx == n {
        return satisfies_assigned(graph, strict, d_max);
    }
    let node = visit_order[idx];
    let cp = critical_path(graph, node, memo);

    for p in 0..n {
        if available.get(p) != Some(true) {
            continue;
        }
        if p + cp > n {
            // The longest chain rooted here cannot fit starting at p. `cp` counts
            // the node itself (a leaf has cp == 1), so the admissible cutoff is
            // strictly-greater-than, not greater-or-equal: the latter would reject
            // a leaf from the final position n - 1 unconditionally (p + 1 == n is
            // fine, there's exactly room for it).
            continue;
        }

        graph.node_mut(node).set_position(Some(p));
        if local_constraints_hold(graph, node, p, strict, d_max) {
            available.set(p, false);
            if dfs(graph, visit_order, idx + 1, available, memo, strict, d_max) {
                return true;
            }
            available.set(p, true);
        }
        graph.node_mut(node).set_position(None);
    }

    false
}

/// Checks node `C`'s tentative position `p` against only its already-assigned
/// operands and users. Nodes visited later in `visit_order` may still carry a
/// `None` position; those are skipped rather than treated as a violation.
fn local_constraints_hold(graph: &Graph, node: NodeIndex, p: usize, strict: bool, d_max: usize) -> bool {
    for &operand in graph.node(node).operands() {
        if operand == node {
            continue;
        }
        if let Some(operand_pos) = graph.node(operand).position() {
            if operand_pos >= p {
                return false;
            }
            if strict && p - operand_pos > d_max {
                return false;
            }
        }
    }
    for &user in graph.node(node).users() {
        if user == node {
            continue;
        }
        if let Some(user_pos) = graph.node(user).position() {
            if user_pos <= p {
                return false;
            }
            if strict && user_pos - p > d_max {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph::OpCode;

    #[test]
    fn finds_identity_ordering_for_a_chain() {
        let mut g = Graph::new();
        g.append_node(OpCode::Original(0), &[]).unwrap();
        for i in 1..5 {
            g.append_node(OpCode::Original(i), &[1]).unwrap();
        }
        assert!(search(&mut g, true, 7));
        g.commit_positions();
        assert!(graph::satisfies(&g, true, 7));
    }

    #[test]
    fn fails_when_a_node_has_more_distinct_operands_than_fit_in_the_window() {
        // A node with 9 distinct operands needs all 9 within `d_max` (7) positions
        // behind it, but that window only has room for 7 - no permutation of any
        // size can satisfy this, unlike a single long edge, which reordering can
        // often resolve by moving the definition closer to its use.
        let mut g = Graph::new();
        for i in 0..9 {
            g.append_node(OpCode::Original(i), &[]).unwrap();
        }
        let offsets: Vec<usize> = (1..=9).collect();
        g.append_node(OpCode::Original(9), &offsets).unwrap();

        assert!(!search(&mut g, true, 7));
        // Every position should be left unassigned after a failed search.
        for idx in g.iter_chain() {
            assert!(g.node(idx).position().is_none());
        }
    }

    #[test]
    fn loose_mode_ignores_distance() {
        let mut g = Graph::new();
        g.append_node(OpCode::Original(0), &[]).unwrap();
        for i in 1..9 {
            g.append_node(OpCode::Original(i), &[1]).unwrap();
        }
        g.append_node(OpCode::Original(9), &[9]).unwrap();
        assert!(search(&mut g, false, 7));
    }

    #[test]
    fn diamond_is_satisfiable_without_copies() {
        let mut g = Graph::new();
        g.append_node(OpCode::Original(0), &[]).unwrap();
        g.append_node(OpCode::Original(1), &[1]).unwrap();
        g.append_node(OpCode::Original(2), &[2]).unwrap();
        g.append_node(OpCode::Original(3), &[2, 1]).unwrap();
        assert!(search(&mut g, true, 7));
    }
}
