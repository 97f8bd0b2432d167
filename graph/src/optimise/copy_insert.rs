use std::collections::BTreeMap;

use crate::graph::Graph;
use crate::node::NodeIndex;

/// Splices copy nodes onto over-long def-use chains so that, once the ordering
/// search retries, every edge can fit within `d_max`.
///
/// Classification is based on the chain positions as they stand when this pass
/// starts; those positions are not recomputed as copies are spliced in, matching
/// how the rest of a single pass reasons about a fixed snapshot of distances.
///
/// Returns the number of copy nodes inserted.
pub fn insert_copies(graph: &mut Graph, d_max: usize) -> usize {
    let positions = graph.chain_positions();
    let producers: Vec<NodeIndex> = graph.iter_chain().collect();
    let mut total_inserted = 0;

    for producer in producers {
        let producer_pos = positions[&producer];

        // Bucket this producer's users by how many `d_max`-sized hops their use
        // sits beyond the bound, ascending, so the chain is extended incrementally.
        let mut buckets: BTreeMap<usize, Vec<NodeIndex>> = BTreeMap::new();
        for &user in graph.node(producer).users() {
            let user_pos = positions[&user];
            if user_pos > producer_pos + d_max {
                let k = (user_pos - producer_pos) / d_max;
                buckets.entry(k).or_default().push(user);
            }
        }
        if buckets.is_empty() {
            continue;
        }
        log::trace!(
            "producer {:?} at {producer_pos}: {} over-long bucket(s)",
            producer,
            buckets.len()
        );

        let mut inserted = 0usize;
        let mut streak = 0usize;
        let mut tail = producer;
        for (k, bucket_users) in buckets {
            let mut needed = k - inserted;
            while needed > 0 {
                tail = graph.insert_copy_after(tail);
                inserted += 1;
                total_inserted += 1;
                needed -= 1;

                // Every `d_max` consecutive hops for this producer, the copies
                // inserted so far have themselves widened the span they bridge,
                // so one more hop is needed than originally estimated.
                streak += 1;
                if streak == d_max {
                    needed += 1;
                    streak = 0;
                }
            }
            // These users have never been touched by an earlier bucket (each user
            // belongs to exactly one bucket), so they still read `producer`
            // directly; redirect them straight to the chain's current tail.
            graph.replace_uses_within(producer, tail, &bucket_users);
        }
    }

    log::debug!("copy insertion pass added {total_inserted} node(s)");
    total_inserted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::OpCode;
    use crate::validate::satisfies;

    #[test]
    fn shortens_a_single_over_long_edge() {
        let mut g = Graph::new();
        g.append_node(OpCode::Original(0), &[]).unwrap();
        for i in 1..9 {
            g.append_node(OpCode::Original(i), &[1]).unwrap();
        }
        // Node 9 reads node 0, a distance of 9.
        g.append_node(OpCode::Original(9), &[9]).unwrap();
        assert!(!satisfies(&g, true, 7));

        let inserted = insert_copies(&mut g, 7);
        assert_eq!(inserted, 1);
        assert!(satisfies(&g, true, 7));
    }

    #[test]
    fn later_bucket_reuses_the_earlier_buckets_chain() {
        // producer at position 0; user A at position 10 (k=1), user B at position 20 (k=2).
        let mut g = Graph::new();
        let producer = g.append_node(OpCode::Original(0), &[]).unwrap();
        for i in 1..10 {
            g.append_node(OpCode::Original(i), &[1]).unwrap(); // positions 1..9
        }
        let user_a = g.append_node(OpCode::Original(10), &[10]).unwrap(); // position 10, reads 0
        for i in 11..20 {
            g.append_node(OpCode::Original(i), &[1]).unwrap(); // positions 11..19
        }
        let _user_b = g.append_node(OpCode::Original(20), &[20]).unwrap(); // position 20, reads 0

        let before = g.len();
        let inserted = insert_copies(&mut g, 7);
        assert_eq!(inserted, 2);
        assert_eq!(g.len(), before + inserted);
        assert!(satisfies(&g, true, 7));

        // The copy that now feeds user A is also the operand of the copy that feeds user B.
        let a_operand = g.node(user_a).operands()[0];
        assert!(g.node(a_operand).is_copy());
        assert_eq!(g.node(producer).users(), &[a_operand]);
    }

    #[test]
    fn no_op_when_already_within_bound() {
        let mut g = Graph::new();
        g.append_node(OpCode::Original(0), &[]).unwrap();
        g.append_node(OpCode::Original(1), &[1]).unwrap();
        let before = g.len();
        assert_eq!(insert_copies(&mut g, 7), 0);
        assert_eq!(g.len(), before);
    }
}
