//! Run configuration for the parallel drivers.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How the distributed priority queue treats a node that is inserted again
/// while an older entry for it is still queued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueDiscipline {
    /// Every insertion is a fresh entry. Stale entries are filtered when popped,
    /// so the queue may temporarily hold many copies of one node.
    #[default]
    NonIntrusive,
    /// A node occupies at most one slot across all shards; reinsertion is a
    /// decrease-key on that slot. Bounded queue size, more locking.
    Intrusive,
}

/// Parameters of one parallel traversal.
///
/// ```
/// use multiqueue_sssp::{QueueDiscipline, TraversalConfig};
///
/// let config = TraversalConfig::default()
///     .with_workers(4)
///     .with_discipline(QueueDiscipline::Intrusive)
///     .with_seed(7);
/// assert_eq!(config.worker_count().unwrap(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraversalConfig {
    /// Number of worker threads; `None` uses every available core.
    pub workers: Option<usize>,
    /// Queue discipline used by the workers.
    pub discipline: QueueDiscipline,
    /// Seed for the per-worker shard-sampling generators. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl TraversalConfig {
    /// Sets an explicit worker count.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Selects the queue discipline.
    #[must_use]
    pub fn with_discipline(mut self, discipline: QueueDiscipline) -> Self {
        self.discipline = discipline;
        self
    }

    /// Makes shard sampling reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resolves the number of workers to spawn.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroWorkers`] if the worker count was set to zero.
    pub fn worker_count(&self) -> Result<usize> {
        match self.workers {
            Some(0) => Err(Error::ZeroWorkers),
            Some(workers) => Ok(workers),
            None => Ok(num_cpus::get().max(1)),
        }
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed input and [`Error::ZeroWorkers`]
    /// if the document asks for zero workers.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.worker_count()?;
        Ok(config)
    }
}
