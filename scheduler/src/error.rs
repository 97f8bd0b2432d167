use std::fmt;

/// Errors raised by the orchestrator while trying to bring a graph within bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    /// The input graph already exceeds `Config::max_size`, before any copies are inserted.
    Capacity { len: usize, max_size: usize },
    /// `Config::max_iters` insertion rounds ran out without a strict solution.
    InsertionOverflow { max_iters: usize },
    /// Even the loose (define-before-use only) search failed: the input is not a DAG.
    NotADag,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::Capacity { len, max_size } => write!(
                f,
                "input graph has {len} nodes, exceeding the configured max_size of {max_size}"
            ),
            SchedulerError::InsertionOverflow { max_iters } => write!(
                f,
                "exhausted {max_iters} copy-insertion round(s) without finding a strict ordering"
            ),
            SchedulerError::NotADag => {
                write!(f, "graph has no valid define-before-use ordering at all")
            }
        }
    }
}

impl std::error::Error for SchedulerError {}
