//! Distributed work queues polled concurrently by traversal workers.
//!
//! [`MultiQueue`] owns the sharding, locking and the two-choice extraction.
//! What a shard stores and how a reinsertion is treated is decided by a
//! [`Discipline`]:
//!
//! | discipline              | shard                | duplicates | ordered by            |
//! |-------------------------|----------------------|------------|-----------------------|
//! | [`HeapDiscipline`]      | binary heap          | yes        | key at insertion      |
//! | [`IntrusiveDiscipline`] | intrusive binary heap| no         | node's live distance  |
//! | [`FifoDiscipline`]      | circular buffer      | yes        | BFS level (FIFO)      |

pub mod fifo;
pub mod heap;
pub mod intrusive;
pub mod multi;

pub use fifo::{FifoDiscipline, FifoShard};
pub use heap::{HeapDiscipline, HeapShard};
pub use intrusive::{IntrusiveDiscipline, IntrusiveShard};
pub use multi::MultiQueue;

use crate::graph::{Node, NodeId};

/// Storage strategy for the shards of a [`MultiQueue`].
///
/// Every method is called with the shard's lock held. `index` is the shard's
/// position inside its queue and `nodes` is the graph the queue serves.
pub trait Discipline: Send + Sync + 'static {
    /// Per-shard storage.
    type Shard: Default + Send;

    /// Whether one node may be queued several times at once. Workers must then
    /// discard stale entries with a settled-distance check.
    const ALLOWS_DUPLICATES: bool;

    /// Short name used in logs.
    const NAME: &'static str;

    /// Number of entries in the shard.
    fn len(shard: &Self::Shard) -> usize;

    /// Returns `true` if the shard holds no entries.
    fn is_empty(shard: &Self::Shard) -> bool {
        Self::len(shard) == 0
    }

    /// Ordering key of the entry [`Discipline::pop`] would return.
    fn front_key(shard: &Self::Shard, nodes: &[Node]) -> Option<u64>;

    /// Shard that must receive `node`, if the discipline pins it somewhere.
    ///
    /// Read without any lock, so the answer is only a hint that
    /// [`Discipline::push`] re-validates.
    fn preferred_shard(_nodes: &[Node], _node: NodeId) -> Option<usize> {
        None
    }

    /// Inserts `node` with ordering key `key`.
    ///
    /// Returns `false` if the node turned out to belong to another shard; the
    /// caller retries against the new owner.
    fn push(shard: &mut Self::Shard, index: usize, nodes: &[Node], node: NodeId, key: u64) -> bool;

    /// Removes the front entry.
    ///
    /// Returns `None` if the shard is empty or the discipline declined the
    /// removal because the front element's bookkeeping changed under it.
    fn pop(shard: &mut Self::Shard, index: usize, nodes: &[Node]) -> Option<NodeId>;
}
