//! Non-intrusive shards: a plain binary heap of `(key, node)` entries.
//!
//! Reinserting a node adds a second entry. The key is the distance the node
//! had when it was inserted, so an older entry sorts behind the newer one and
//! is recognised as stale by the worker that pops it.

use core::cmp::Reverse;
use std::collections::BinaryHeap;

use super::Discipline;
use crate::graph::{Node, NodeId};

/// A min-heap of `(key, node)` pairs.
#[derive(Debug, Default)]
pub struct HeapShard {
    entries: BinaryHeap<Reverse<(u64, NodeId)>>,
}

/// Duplicates-allowed discipline over [`HeapShard`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapDiscipline;

impl Discipline for HeapDiscipline {
    type Shard = HeapShard;
    const ALLOWS_DUPLICATES: bool = true;
    const NAME: &'static str = "non-intrusive-heap";

    #[inline]
    fn len(shard: &HeapShard) -> usize {
        shard.entries.len()
    }

    #[inline]
    fn front_key(shard: &HeapShard, _nodes: &[Node]) -> Option<u64> {
        shard.entries.peek().map(|Reverse((key, _))| *key)
    }

    #[inline]
    fn push(shard: &mut HeapShard, _index: usize, _nodes: &[Node], node: NodeId, key: u64) -> bool {
        shard.entries.push(Reverse((key, node)));
        true
    }

    #[inline]
    fn pop(shard: &mut HeapShard, _index: usize, _nodes: &[Node]) -> Option<NodeId> {
        shard.entries.pop().map(|Reverse((_, node))| node)
    }
}
