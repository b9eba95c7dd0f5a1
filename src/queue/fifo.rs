//! BFS shards: a growable circular buffer of `(level, node)` entries.
//!
//! BFS discovers levels in non-decreasing order, so appending at the back
//! keeps a shard close to level order without any heap maintenance.
//! Cross-shard order comes from comparing front levels in
//! [`MultiQueue::extract_min`](super::MultiQueue::extract_min).

use std::collections::VecDeque;

use super::Discipline;
use crate::graph::{Node, NodeId};

const INITIAL_CAPACITY: usize = 128;

/// A FIFO of nodes tagged with their discovery level.
#[derive(Debug)]
pub struct FifoShard {
    entries: VecDeque<(u64, NodeId)>,
}

impl Default for FifoShard {
    fn default() -> Self {
        Self {
            entries: VecDeque::with_capacity(INITIAL_CAPACITY),
        }
    }
}

/// Duplicates-allowed, level-ordered discipline over [`FifoShard`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoDiscipline;

impl Discipline for FifoDiscipline {
    type Shard = FifoShard;
    const ALLOWS_DUPLICATES: bool = true;
    const NAME: &'static str = "level-fifo";

    #[inline]
    fn len(shard: &FifoShard) -> usize {
        shard.entries.len()
    }

    #[inline]
    fn front_key(shard: &FifoShard, _nodes: &[Node]) -> Option<u64> {
        shard.entries.front().map(|&(level, _)| level)
    }

    #[inline]
    fn push(shard: &mut FifoShard, _index: usize, _nodes: &[Node], node: NodeId, level: u64) -> bool {
        shard.entries.push_back((level, node));
        true
    }

    #[inline]
    fn pop(shard: &mut FifoShard, _index: usize, _nodes: &[Node]) -> Option<NodeId> {
        shard.entries.pop_front().map(|(_, node)| node)
    }
}
