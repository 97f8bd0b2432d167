//! The mutable, arena-backed program graph.

use std::collections::HashMap;

use index_vec::IndexVec;

use crate::error::GraphError;
use crate::node::{Node, NodeIndex, OpCode};

/// An ordered sequence of [`Node`]s, linked head-to-tail via `prev`/`next`.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: IndexVec<NodeIndex, Node>,
    head: Option<NodeIndex>,
    tail: Option<NodeIndex>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    //! Construction

    pub fn new() -> Self {
        Graph {
            nodes: IndexVec::new(),
            head: None,
            tail: None,
        }
    }

    /// Appends a new node to the tail of the linear order.
    ///
    /// `operand_offsets` are offsets backwards from the new node in the *current*
    /// linear order (`1` = the immediate predecessor). An offset of `0` is a
    /// self-reference: it is recorded as an operand but does not add a user edge,
    /// since it carries no real dependency.
    pub fn append_node(
        &mut self,
        op_code: OpCode,
        operand_offsets: &[usize],
    ) -> Result<NodeIndex, GraphError> {
        let identity = NodeIndex::from_usize(self.nodes.len());
        self.nodes.push(Node::new(identity, op_code));

        if let Some(old_tail) = self.tail {
            self.nodes[old_tail].set_next(Some(identity));
            self.nodes[identity].set_prev(Some(old_tail));
        } else {
            self.head = Some(identity);
        }
        self.tail = Some(identity);

        for &offset in operand_offsets {
            let operand = self.resolve_offset(identity, offset)?;
            self.nodes[identity].operands_mut().push(operand);
            if operand != identity {
                self.nodes[operand].users_mut().push(identity);
            }
        }

        Ok(identity)
    }

    /// Resolves an offset counted backwards from `from` (before `from` was linked in,
    /// i.e. counted from `from`'s immediate predecessor) to a concrete node.
    fn resolve_offset(&self, from: NodeIndex, offset: usize) -> Result<NodeIndex, GraphError> {
        if offset == 0 {
            return Ok(from);
        }
        let mut cursor = self.nodes[from].prev();
        let mut remaining = offset - 1;
        while remaining > 0 {
            cursor = match cursor {
                Some(idx) => self.nodes[idx].prev(),
                None => None,
            };
            remaining -= 1;
        }
        cursor.ok_or(GraphError::InvalidOperand {
            offset,
            line: from.index(),
        })
    }

    /// Appends a fresh `"copy"` node immediately after `after`, with `after` as its
    /// sole operand. Returns the new node's identity.
    pub fn insert_copy_after(&mut self, after: NodeIndex) -> NodeIndex {
        let identity = NodeIndex::from_usize(self.nodes.len());
        self.nodes.push(Node::new(identity, OpCode::Copy));
        self.nodes[identity].operands_mut().push(after);
        self.nodes[after].users_mut().push(identity);

        let following = self.nodes[after].next();
        self.nodes[identity].set_prev(Some(after));
        self.nodes[identity].set_next(following);
        self.nodes[after].set_next(Some(identity));
        match following {
            Some(next_idx) => self.nodes[next_idx].set_prev(Some(identity)),
            None => self.tail = Some(identity),
        }

        identity
    }
}

impl Graph {
    //! Chain splicing

    /// Splices `n` out of its current chain position and relinks it immediately
    /// after `target`. `n` and `target` must be distinct nodes already in the chain.
    pub fn move_after(&mut self, n: NodeIndex, target: NodeIndex) {
        self.unlink(n);
        let following = self.nodes[target].next();
        self.nodes[n].set_prev(Some(target));
        self.nodes[n].set_next(following);
        self.nodes[target].set_next(Some(n));
        match following {
            Some(next_idx) => self.nodes[next_idx].set_prev(Some(n)),
            None => self.tail = Some(n),
        }
    }

    /// Splices `n` out of its current chain position and relinks it immediately
    /// before `target`.
    pub fn move_before(&mut self, n: NodeIndex, target: NodeIndex) {
        self.unlink(n);
        // Explicit head check rather than comparing `target`'s own prev pointer to
        // itself: only the head of the chain has no predecessor.
        if self.head == Some(target) {
            self.nodes[n].set_prev(None);
            self.nodes[n].set_next(Some(target));
            self.nodes[target].set_prev(Some(n));
            self.head = Some(n);
        } else {
            let preceding = self.nodes[target].prev();
            self.nodes[n].set_prev(preceding);
            self.nodes[n].set_next(Some(target));
            self.nodes[target].set_prev(Some(n));
            if let Some(prev_idx) = preceding {
                self.nodes[prev_idx].set_next(Some(n));
            }
        }
    }

    /// Removes `n` from the chain without dropping it from the arena, patching its
    /// former neighbours' pointers together.
    fn unlink(&mut self, n: NodeIndex) {
        let prev = self.nodes[n].prev();
        let next = self.nodes[n].next();
        match prev {
            Some(idx) => self.nodes[idx].set_next(next),
            None => self.head = next,
        }
        match next {
            Some(idx) => self.nodes[idx].set_prev(prev),
            None => self.tail = prev,
        }
    }

    /// Rewrites every operand edge from `old` to `new`, for users in `cohort` only.
    /// `users`/`operands` are treated as multisets: one occurrence is moved per
    /// matching edge, so a user that reads `old` twice keeps both edges in lockstep.
    pub fn replace_uses_within(&mut self, old: NodeIndex, new: NodeIndex, cohort: &[NodeIndex]) {
        use std::collections::HashSet;
        let cohort: HashSet<NodeIndex> = cohort.iter().copied().collect();
        for &user in &cohort {
            let mut rewritten = 0usize;
            for operand in self.nodes[user].operands_mut() {
                if *operand == old {
                    *operand = new;
                    rewritten += 1;
                }
            }
            for _ in 0..rewritten {
                if let Some(pos) = self.nodes[old].users().iter().position(|&u| u == user) {
                    self.nodes[old].users_mut().remove(pos);
                }
                self.nodes[new].users_mut().push(user);
            }
        }
    }
}

impl Graph {
    //! Ordering

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn head(&self) -> Option<NodeIndex> {
        self.head
    }

    /// An iterator over every node's identity, in current chain order.
    pub fn iter_chain(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        ChainIter {
            graph: self,
            cursor: self.head,
        }
    }

    /// The position of every node in the current chain order, as a lookup map.
    pub fn chain_positions(&self) -> HashMap<NodeIndex, usize> {
        self.iter_chain().enumerate().map(|(p, idx)| (idx, p)).collect()
    }

    /// Resets every node's search-scratch `position` to `None`.
    pub fn reset_positions(&mut self) {
        for node in self.nodes.iter_mut() {
            node.set_position(None);
        }
    }

    /// Relinks `prev`/`next` to match each node's assigned scratch `position`, then
    /// clears those scratch fields back to `None`. Panics if any node in the chain
    /// has not been assigned a position, since that would indicate a half-finished
    /// search was committed.
    pub fn commit_positions(&mut self) {
        let mut order: Vec<NodeIndex> = self.iter_chain().collect();
        order.sort_by_key(|&idx| {
            self.nodes[idx]
                .position()
                .expect("commit_positions called before every node was assigned a position")
        });
        self.relink(&order);
        for &idx in &order {
            self.nodes[idx].set_position(None);
        }
    }

    /// Rewrites `prev`/`next`/`head`/`tail` so the chain matches `order` exactly.
    fn relink(&mut self, order: &[NodeIndex]) {
        self.head = order.first().copied();
        self.tail = order.last().copied();
        for (i, &idx) in order.iter().enumerate() {
            let prev = if i == 0 { None } else { Some(order[i - 1]) };
            let next = order.get(i + 1).copied();
            self.nodes[idx].set_prev(prev);
            self.nodes[idx].set_next(next);
        }
    }
}

impl Graph {
    //! Access

    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.nodes[idx]
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> &mut Node {
        &mut self.nodes[idx]
    }

    /// Produces an independent, isomorphic copy of `self`, along with the mapping
    /// from each of `self`'s node identities to the copy's. Because nodes are never
    /// removed from the arena, the copy's arena layout is identical to `self`'s, so
    /// this mapping is always the identity function; it is still returned so callers
    /// never have to special-case that fact.
    pub fn deep_copy(&self) -> (Graph, HashMap<NodeIndex, NodeIndex>) {
        let copy = self.clone();
        let map = (0..self.nodes.len())
            .map(NodeIndex::from_usize)
            .map(|idx| (idx, idx))
            .collect();
        (copy, map)
    }
}

struct ChainIter<'g> {
    graph: &'g Graph,
    cursor: Option<NodeIndex>,
}

impl<'g> Iterator for ChainIter<'g> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let current = self.cursor?;
        self.cursor = self.graph.nodes[current].next();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(g: &Graph) -> Vec<usize> {
        g.iter_chain().map(|idx| idx.index()).collect()
    }

    #[test]
    fn append_node_links_predecessor() {
        let mut g = Graph::new();
        let a = g.append_node(OpCode::Original(0), &[]).unwrap();
        let b = g.append_node(OpCode::Original(1), &[1]).unwrap();
        assert_eq!(g.node(b).operands(), &[a]);
        assert_eq!(g.node(a).users(), &[b]);
        assert_eq!(ids(&g), vec![a.index(), b.index()]);
    }

    #[test]
    fn self_reference_has_no_user_edge() {
        let mut g = Graph::new();
        let a = g.append_node(OpCode::Original(0), &[]).unwrap();
        let b = g.append_node(OpCode::Original(1), &[0]).unwrap();
        assert_eq!(g.node(b).operands(), &[b]);
        assert!(g.node(a).users().is_empty());
        assert!(g.node(b).users().is_empty());
    }

    #[test]
    fn offset_before_head_is_an_error() {
        let mut g = Graph::new();
        g.append_node(OpCode::Original(0), &[]).unwrap();
        let err = g.append_node(OpCode::Original(1), &[5]).unwrap_err();
        assert!(matches!(err, GraphError::InvalidOperand { offset: 5, .. }));
    }

    #[test]
    fn replace_uses_within_respects_multiplicity() {
        let mut g = Graph::new();
        let a = g.append_node(OpCode::Original(0), &[]).unwrap();
        // b reads a twice.
        let b = g.append_node(OpCode::Original(1), &[1, 1]).unwrap();
        let c = g.insert_copy_after(a);
        g.replace_uses_within(a, c, &[b]);
        assert_eq!(g.node(b).operands(), &[c, c]);
        assert_eq!(g.node(a).users(), &[] as &[NodeIndex]);
        assert_eq!(g.node(c).users(), &[b, b]);
    }

    #[test]
    fn deep_copy_is_independent() {
        let mut g = Graph::new();
        g.append_node(OpCode::Original(0), &[]).unwrap();
        let (mut copy, map) = g.deep_copy();
        let a = g.head().unwrap();
        assert_eq!(map[&a], a);
        copy.append_node(OpCode::Original(1), &[1]).unwrap();
        assert_eq!(g.len(), 1);
        assert_eq!(copy.len(), 2);
    }
}
