//! A mutable, arena-backed program graph: the node/edge/ordering primitives (the
//! graph model), the define-before-use and distance validator, the critical-path
//! estimator used to prune a search elsewhere, and the copy-insertion pass that
//! enlarges a graph when no reordering can meet the distance bound on its own.

mod critical_path;
mod error;
mod graph;
mod node;
pub mod optimise;
mod validate;

pub use critical_path::{critical_path, new_memo, Memo};
pub use error::GraphError;
pub use graph::Graph;
pub use node::{Node, NodeIndex, OpCode};
pub use validate::{satisfies, satisfies_assigned};

/// Default cap on the number of nodes accepted from a single input graph, before
/// any copies are inserted.
pub const MAX_SIZE: usize = 64;

/// Default maximum legal use-to-def distance.
pub const D_MAX: usize = 7;
