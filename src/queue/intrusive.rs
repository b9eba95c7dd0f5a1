//! Intrusive shards: a binary min-heap whose elements know where they are.
//!
//! Each node occupies at most one slot across all shards of a queue. Its
//! [`QueueSlot`](crate::graph::Node) records the owning shard and the array
//! position, so reinserting a node whose distance dropped is an in-place
//! decrease-key instead of a second entry.
//!
//! Locking: the shard lock is always taken first, then the node's slot lock.
//! `owner` changes only under both; `position` under the shard lock alone.

use super::Discipline;
use crate::graph::{Node, NodeId};

/// Capacity below which growth roughly doubles the array.
const SMALL_CAPACITY: usize = 64;

/// Array-backed min-heap keyed by each node's live distance.
#[derive(Debug, Default)]
pub struct IntrusiveShard {
    items: Vec<NodeId>,
}

impl IntrusiveShard {
    #[inline]
    fn key(&self, nodes: &[Node], i: usize) -> u64 {
        nodes[self.items[i]].distance()
    }

    #[inline]
    fn swap(&mut self, nodes: &[Node], i: usize, j: usize) {
        self.items.swap(i, j);
        nodes[self.items[i]].slot().set_position(i);
        nodes[self.items[j]].slot().set_position(j);
    }

    fn sift_up(&mut self, nodes: &[Node], mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.key(nodes, i) < self.key(nodes, parent) {
                self.swap(nodes, i, parent);
                i = parent;
            } else {
                break;
            }
        }
        i
    }

    fn sift_down(&mut self, nodes: &[Node], mut i: usize) -> usize {
        let len = self.items.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut smallest = left;
            if right < len && self.key(nodes, right) < self.key(nodes, left) {
                smallest = right;
            }
            if self.key(nodes, i) <= self.key(nodes, smallest) {
                break;
            }
            self.swap(nodes, i, smallest);
            i = smallest;
        }
        i
    }

    fn reserve_slot(&mut self) {
        let capacity = self.items.capacity();
        if self.items.len() == capacity {
            let extra = if capacity < SMALL_CAPACITY {
                capacity + 2
            } else {
                capacity >> 1
            };
            self.items.reserve_exact(extra);
        }
    }

    /// Inserts `node` or repositions it if this shard already owns it.
    ///
    /// Returns `false` without touching anything if another shard owns it.
    fn insert(&mut self, index: usize, nodes: &[Node], node: NodeId) -> bool {
        let slot = nodes[node].slot();
        let _node_guard = slot.lock();
        match slot.owner() {
            Some(owner) if owner == index => {
                // The key may have moved either way since the node was placed.
                let at = self.sift_up(nodes, slot.position());
                self.sift_down(nodes, at);
                true
            }
            None => {
                self.reserve_slot();
                let at = self.items.len();
                self.items.push(node);
                slot.set_owner(Some(index));
                slot.set_position(at);
                self.sift_up(nodes, at);
                true
            }
            Some(_) => false,
        }
    }

    /// Removes the root if it still belongs here at position 0.
    fn pop(&mut self, index: usize, nodes: &[Node]) -> Option<NodeId> {
        let &root = self.items.first()?;
        let slot = nodes[root].slot();
        let _node_guard = slot.lock();
        if slot.owner() != Some(index) || slot.position() != 0 {
            return None;
        }

        let last = self.items.pop()?;
        if !self.items.is_empty() {
            self.items[0] = last;
            nodes[last].slot().set_position(0);
            self.sift_down(nodes, 0);
        }
        slot.set_owner(None);
        slot.set_position(0);
        Some(root)
    }

    /// Checks the heap order and the back-pointers of every element.
    #[cfg(test)]
    fn assert_consistent(&self, index: usize, nodes: &[Node]) {
        for (i, &node) in self.items.iter().enumerate() {
            assert_eq!(nodes[node].slot().owner(), Some(index), "node {node} lost its owner");
            assert_eq!(nodes[node].slot().position(), i, "node {node} has a stale position");
            if i > 0 {
                assert!(self.key(nodes, (i - 1) / 2) <= self.key(nodes, i), "heap order broken at {i}");
            }
        }
    }
}

/// Single-slot discipline with decrease-key over [`IntrusiveShard`]s.
///
/// The `key` passed to [`Discipline::push`] is ignored: ordering always uses
/// the node's current distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntrusiveDiscipline;

impl Discipline for IntrusiveDiscipline {
    type Shard = IntrusiveShard;
    const ALLOWS_DUPLICATES: bool = false;
    const NAME: &'static str = "intrusive-heap";

    #[inline]
    fn len(shard: &IntrusiveShard) -> usize {
        shard.items.len()
    }

    #[inline]
    fn front_key(shard: &IntrusiveShard, nodes: &[Node]) -> Option<u64> {
        shard.items.first().map(|&node| nodes[node].distance())
    }

    #[inline]
    fn preferred_shard(nodes: &[Node], node: NodeId) -> Option<usize> {
        nodes[node].slot().owner()
    }

    #[inline]
    fn push(shard: &mut IntrusiveShard, index: usize, nodes: &[Node], node: NodeId, _key: u64) -> bool {
        shard.insert(index, nodes, node)
    }

    #[inline]
    fn pop(shard: &mut IntrusiveShard, index: usize, nodes: &[Node]) -> Option<NodeId> {
        shard.pop(index, nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph, GraphBuilder};

    fn graph_with_distances(distances: &[u64]) -> Graph {
        let graph = GraphBuilder::new(distances.len()).build();
        for (node, &d) in distances.iter().enumerate() {
            graph.node(node).store_distance(d);
        }
        graph
    }

    fn drain(shard: &mut IntrusiveShard, nodes: &[Node]) -> Vec<NodeId> {
        let mut out = Vec::new();
        while let Some(node) = shard.pop(0, nodes) {
            assert_eq!(nodes[node].slot().owner(), None);
            out.push(node);
        }
        out
    }

    #[test]
    fn pops_in_distance_order() {
        let graph = graph_with_distances(&[50, 10, 40, 20, 30, 0]);
        let nodes = graph.nodes();
        let mut shard = IntrusiveShard::default();
        for node in 0..nodes.len() {
            assert!(shard.insert(0, nodes, node));
            shard.assert_consistent(0, nodes);
        }
        assert_eq!(drain(&mut shard, nodes), vec![5, 1, 3, 4, 2, 0]);
    }

    #[test]
    fn reinsertion_is_a_decrease_key() {
        let graph = graph_with_distances(&[50, 10, 40, 20, 30]);
        let nodes = graph.nodes();
        let mut shard = IntrusiveShard::default();
        for node in 0..nodes.len() {
            shard.insert(0, nodes, node);
        }

        assert!(nodes[0].lower_distance(5));
        assert!(shard.insert(0, nodes, 0));
        assert_eq!(IntrusiveDiscipline::len(&shard), 5);
        shard.assert_consistent(0, nodes);
        assert_eq!(IntrusiveDiscipline::front_key(&shard, nodes), Some(5));
        assert_eq!(drain(&mut shard, nodes), vec![0, 1, 3, 4, 2]);
    }

    #[test]
    fn refuses_nodes_owned_by_another_shard() {
        let graph = graph_with_distances(&[1, 2]);
        let nodes = graph.nodes();
        let mut here = IntrusiveShard::default();
        let mut there = IntrusiveShard::default();

        assert!(there.insert(1, nodes, 0));
        assert_eq!(IntrusiveDiscipline::preferred_shard(nodes, 0), Some(1));
        assert!(!here.insert(0, nodes, 0));
        assert!(IntrusiveDiscipline::is_empty(&here));

        assert_eq!(there.pop(1, nodes), Some(0));
        assert!(here.insert(0, nodes, 0));
        assert_eq!(IntrusiveDiscipline::preferred_shard(nodes, 0), Some(0));
    }

    #[test]
    fn declines_to_pop_a_root_it_does_not_own() {
        let graph = graph_with_distances(&[1]);
        let nodes = graph.nodes();
        let mut shard = IntrusiveShard::default();
        shard.insert(0, nodes, 0);

        nodes[0].slot().set_owner(Some(7));
        assert_eq!(shard.pop(0, nodes), None);
        nodes[0].slot().set_owner(Some(0));
        assert_eq!(shard.pop(0, nodes), Some(0));
    }

    #[test]
    fn growth_keeps_back_pointers_valid() {
        let distances: Vec<u64> = (0..500u64).map(|i| (i * 7919) % 503).collect();
        let graph = graph_with_distances(&distances);
        let nodes = graph.nodes();
        let mut shard = IntrusiveShard::default();
        for node in 0..nodes.len() {
            shard.insert(0, nodes, node);
        }
        shard.assert_consistent(0, nodes);

        let popped = drain(&mut shard, nodes);
        let keys: Vec<u64> = popped.iter().map(|&n| nodes[n].distance()).collect();
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(popped.len(), 500);
    }
}
