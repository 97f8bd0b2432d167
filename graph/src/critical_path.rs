//! The critical-path estimator: an admissible lower bound used to prune the
//! ordering search.

use index_vec::IndexVec;

use crate::graph::Graph;
use crate::node::NodeIndex;

/// A memo table keyed by node, shared across a single search so each node's
/// critical path is computed once no matter how many candidate positions are tried.
pub type Memo = IndexVec<NodeIndex, Option<usize>>;

pub fn new_memo(capacity: usize) -> Memo {
    IndexVec::from_vec(vec![None; capacity])
}

/// The length, in nodes, of the longest directed chain rooted at `node` within the
/// users-subgraph: `1` if `node` has no users, otherwise `1 + max` over `node`'s
/// users of their own critical path.
pub fn critical_path(graph: &Graph, node: NodeIndex, memo: &mut Memo) -> usize {
    if let Some(value) = memo[node] {
        return value;
    }
    let value = match graph.node(node).users() {
        [] => 1,
        users => 1 + users
            .iter()
            .map(|&user| critical_path(graph, user, memo))
            .max()
            .unwrap_or(0),
    };
    memo[node] = Some(value);
    value
}
