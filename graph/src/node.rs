use std::fmt;

index_vec::define_index_type! {
    /// Stable arena identity of a [`crate::Node`] within its owning [`crate::Graph`].
    ///
    /// Never reused or reassigned once a node is created, unlike [`Node::position`]
    /// which is search scratch state.
    pub struct NodeIndex = usize;
}

/// The tag carried by every node: a short label for originals, a fixed label for
/// nodes synthesised by the copy inserter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    /// An operation parsed from line `0` of the input; the value is the line number.
    Original(u32),
    /// A node synthesised by the copy inserter to re-home a value closer to a user.
    Copy,
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpCode::Original(line) => write!(f, "op{line}"),
            OpCode::Copy => write!(f, "copy"),
        }
    }
}

/// A single operation in the program graph.
#[derive(Debug, Clone)]
pub struct Node {
    identity: NodeIndex,
    op_code: OpCode,
    operands: Vec<NodeIndex>,
    users: Vec<NodeIndex>,
    prev: Option<NodeIndex>,
    next: Option<NodeIndex>,
    /// Search scratch. `None` outside of an in-progress ordering search.
    position: Option<usize>,
}

impl Node {
    pub(crate) fn new(identity: NodeIndex, op_code: OpCode) -> Self {
        Node {
            identity,
            op_code,
            operands: Vec::new(),
            users: Vec::new(),
            prev: None,
            next: None,
            position: None,
        }
    }

    pub fn identity(&self) -> NodeIndex {
        self.identity
    }

    pub fn op_code(&self) -> &OpCode {
        &self.op_code
    }

    pub fn is_copy(&self) -> bool {
        matches!(self.op_code, OpCode::Copy)
    }

    pub fn operands(&self) -> &[NodeIndex] {
        &self.operands
    }

    pub fn users(&self) -> &[NodeIndex] {
        &self.users
    }

    pub fn prev(&self) -> Option<NodeIndex> {
        self.prev
    }

    pub fn next(&self) -> Option<NodeIndex> {
        self.next
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Assigns (or clears) this node's search-scratch position. Public because the
    /// ordering search lives outside this crate and mutates it directly while
    /// backtracking.
    pub fn set_position(&mut self, position: Option<usize>) {
        self.position = position;
    }

    pub(crate) fn set_prev(&mut self, prev: Option<NodeIndex>) {
        self.prev = prev;
    }

    pub(crate) fn set_next(&mut self, next: Option<NodeIndex>) {
        self.next = next;
    }

    pub(crate) fn operands_mut(&mut self) -> &mut Vec<NodeIndex> {
        &mut self.operands
    }

    pub(crate) fn users_mut(&mut self) -> &mut Vec<NodeIndex> {
        &mut self.users
    }
}
