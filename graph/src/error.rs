use std::fmt;

/// Errors raised directly by the graph model's construction API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// An `append_node` operand offset walked off the front of the chain.
    InvalidOperand { offset: usize, line: usize },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::InvalidOperand { offset, line } => write!(
                f,
                "operand offset #{offset} on node {line} points before the head of the graph"
            ),
        }
    }
}

impl std::error::Error for GraphError {}
