//! Seeded random graphs for tests and benchmarks.

use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::{Graph, GraphBuilder, NodeId};
use crate::error::{Error, Result};

/// Default upper bound (exclusive) for random edge weights.
pub const DEFAULT_MAX_WEIGHT: u32 = 100;

/// Generates a random graph that is connected from one designated node.
///
/// Construction:
/// 1. Nodes are visited in a random order and each is linked to the next by a
///    directed edge. This `nodes - 1` edge path makes every node reachable from
///    the first node of the order, which is returned alongside the graph.
/// 2. The remaining `edges - nodes + 1` steps each pick a random ordered pair
///    `(a, b)` with `a != b` and no existing `a -> b` edge, then add both
///    `a -> b` and `b -> a` with one random weight. When `b -> a` is already a
///    backbone edge this gives it a parallel twin, so every node pair ends up
///    with at most three edges.
///
/// Weights are uniform in `0..max_weight`. The same seed always yields the
/// same graph.
///
/// # Errors
///
/// - [`Error::TooFewEdges`] if `edges < nodes - 1`;
/// - [`Error::TooManyEdges`] if more pairs are requested than exist;
/// - [`Error::ZeroMaxWeight`] if `max_weight` is zero.
pub fn random_connected_graph(
    nodes: usize,
    edges: usize,
    max_weight: u32,
    seed: u64,
) -> Result<(Graph, NodeId)> {
    let backbone = nodes.saturating_sub(1);
    if edges < backbone {
        return Err(Error::TooFewEdges { nodes, edges });
    }
    // Each extra step completes exactly one unordered pair, and there are
    // n(n-1)/2 of them.
    let max = backbone.saturating_add(nodes.saturating_mul(backbone) / 2);
    if edges > max {
        return Err(Error::TooManyEdges { nodes, edges, max });
    }
    if max_weight == 0 {
        return Err(Error::ZeroMaxWeight);
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut builder = GraphBuilder::new(nodes);
    let mut present: HashSet<(NodeId, NodeId)> = HashSet::with_capacity(edges * 2);

    let mut order: Vec<NodeId> = (0..nodes).collect();
    order.shuffle(&mut rng);
    for pair in order.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        builder.add_edge(from, to, rng.gen_range(0..max_weight))?;
        present.insert((from, to));
    }

    for _ in backbone..edges {
        loop {
            let first = rng.gen_range(0..nodes);
            let second = rng.gen_range(0..nodes);
            if first == second || present.contains(&(first, second)) {
                continue;
            }
            let weight = rng.gen_range(0..max_weight);
            builder.add_undirected_edge(first, second, weight)?;
            present.insert((first, second));
            present.insert((second, first));
            break;
        }
    }

    let root = order.first().copied().unwrap_or(0);
    Ok((builder.build(), root))
}

/// Generates a random tree rooted at node 0 and returns it with each node's depth.
///
/// Node `i > 0` gets a parent drawn uniformly from `0..i`, so depths are
/// known without running a search.
///
/// # Errors
///
/// Returns [`Error::ZeroMaxWeight`] if `max_weight` is zero.
pub fn random_tree(nodes: usize, max_weight: u32, seed: u64) -> Result<(Graph, Vec<u64>)> {
    if max_weight == 0 {
        return Err(Error::ZeroMaxWeight);
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut builder = GraphBuilder::new(nodes);
    let mut depth = vec![0u64; nodes];
    for child in 1..nodes {
        let parent = rng.gen_range(0..child);
        builder.add_edge(parent, child, rng.gen_range(0..max_weight))?;
        depth[child] = depth[parent] + 1;
    }
    Ok((builder.build(), depth))
}
