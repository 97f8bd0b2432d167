//! The orchestrator: alternates the ordering search with copy insertion until the
//! graph satisfies the distance bound, or the retry budget runs out.

mod error;
mod search;

pub use error::SchedulerError;

use graph::{optimise::insert_copies, satisfies, Graph};

/// Tunables for a single run of [`update_nodes`]. Layered by the caller: built-in
/// defaults, then an optional config file, then command-line flags, last writer wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum legal use-to-def distance.
    pub d_max: usize,
    /// Maximum accepted input node count, checked before any copies are inserted.
    pub max_size: usize,
    /// Number of copy-insertion rounds to attempt before giving up.
    pub max_iters: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            d_max: graph::D_MAX,
            max_size: graph::MAX_SIZE,
            max_iters: 2,
        }
    }
}

/// Brings `graph` within `config.d_max` by reordering, and if that is not enough,
/// by inserting copies and retrying. Returns a new graph; `graph` itself is never
/// mutated.
///
/// If `graph` already satisfies the bound, it is returned unchanged (modulo an
/// identity `deep_copy`).
pub fn update_nodes(graph: &Graph, config: &Config) -> Result<Graph, SchedulerError> {
    if graph.len() > config.max_size {
        return Err(SchedulerError::Capacity {
            len: graph.len(),
            max_size: config.max_size,
        });
    }

    if satisfies(graph, true, config.d_max) {
        log::debug!("input already satisfies the distance bound, nothing to do");
        let (unchanged, _) = graph.deep_copy();
        return Ok(unchanged);
    }

    let (mut snapshot, _) = graph.deep_copy();
    if search::search(&mut snapshot, true, config.d_max) {
        log::info!("reordering alone satisfied the distance bound");
        snapshot.commit_positions();
        return Ok(snapshot);
    }

    for round in 1..=config.max_iters {
        let inserted = insert_copies(&mut snapshot, config.d_max);
        log::debug!("copy-insertion round {round}: inserted {inserted} node(s)");
        if search::search(&mut snapshot, true, config.d_max) {
            log::info!("reordering succeeded after {round} copy-insertion round(s)");
            snapshot.commit_positions();
            return Ok(snapshot);
        }
    }

    // Exhausted the retry budget. Run a loose search purely to tell an
    // unreachable-in-practice malformed input apart from ordinary budget exhaustion.
    if search::search(&mut snapshot, false, config.d_max) {
        snapshot.reset_positions();
        Err(SchedulerError::InsertionOverflow {
            max_iters: config.max_iters,
        })
    } else {
        Err(SchedulerError::NotADag)
    }
}
