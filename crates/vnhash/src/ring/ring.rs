//! The shared, lock-guarded hash ring.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use super::position::PositionTable;
use super::{COLLISION_SALT, MIN_REPLICAS};
use crate::hasher::{HashAlgorithm, KeyHasher};

/// Consistent hash ring with virtual replicas.
///
/// Every node owns up to [`replicas`](Self::replicas) positions on a `u64`
/// ring, placed at `hash(node + replica_index)`. A key belongs to the node at
/// the first position at or after `hash(key)`, wrapping past the end.
///
/// # Concurrency
///
/// All methods take `&self`. Mutations hold an exclusive lock for their full
/// duration, including the re-sort, so readers never observe a half-applied
/// add or remove. Lookups share a read lock and run in parallel.
///
/// # Example
///
/// ```
/// use vnhash::HashRing;
///
/// let ring = HashRing::new(160);
/// ring.add("first");
/// ring.add("second");
/// ring.remove("first");
///
/// assert_eq!(ring.get("any-key").as_deref(), Some("second"));
/// ```
pub struct HashRing<H = HashAlgorithm> {
    hasher: H,
    replicas: usize,
    state: RwLock<RingState>,
}

#[derive(Debug, Default)]
struct RingState {
    table: PositionTable,
    /// Live nodes and the replica count each was added with.
    nodes: HashMap<Arc<str>, usize>,
}

impl HashRing {
    /// Creates an empty ring using the default hash algorithm (XXH3-64).
    ///
    /// `replicas` is the per-node replica count and the maximum any node may
    /// be given; values below [`MIN_REPLICAS`] are raised to it.
    pub fn new(replicas: usize) -> Self {
        Self::with_hasher(replicas, HashAlgorithm::default())
    }
}

impl Default for HashRing {
    fn default() -> Self {
        Self::new(MIN_REPLICAS)
    }
}

impl<H: KeyHasher> HashRing<H> {
    /// Creates an empty ring that places positions with `hasher`.
    pub fn with_hasher(replicas: usize, hasher: H) -> Self {
        Self {
            hasher,
            replicas: replicas.max(MIN_REPLICAS),
            state: RwLock::new(RingState::default()),
        }
    }

    /// Adds `node` with the ring's configured replica count.
    pub fn add(&self, node: &str) {
        self.add_with_replicas(node, self.replicas);
    }

    /// Adds `node` with `replicas` virtual positions.
    ///
    /// The count is clamped to the ring's configured maximum. A node that is
    /// already present is removed first, so re-adding replaces its replica
    /// count instead of accumulating positions. A count of zero leaves the
    /// node off the ring.
    pub fn add_with_replicas(&self, node: &str, replicas: usize) {
        let replicas = replicas.min(self.replicas);

        let mut state = self.state.write();
        state.remove_node(&self.hasher, node);

        if replicas == 0 {
            debug!(node, "zero replicas requested, node left off the ring");
            return;
        }

        let name: Arc<str> = Arc::from(node);
        for index in 0..replicas {
            let position = replica_position(&self.hasher, node, index);
            state.table.push(position, &name);
        }
        state.table.sort();
        state.nodes.insert(name, replicas);

        debug!(
            node,
            replicas,
            positions = state.table.len(),
            "added node to ring"
        );
    }

    /// Removes `node` and every position it owns.
    ///
    /// Removing a node that is not on the ring does nothing.
    pub fn remove(&self, node: &str) {
        let mut state = self.state.write();
        if !state.remove_node(&self.hasher, node) {
            trace!(node, "node not on ring, nothing to remove");
        }
    }

    /// Returns the node that owns `key`, or `None` if the ring is empty.
    pub fn get(&self, key: &str) -> Option<String> {
        let state = self.state.read();
        let owners = state.table.successor(self.hasher.hash(key.as_bytes()))?;

        match owners {
            [] => None,
            [owner] => Some(owner.to_string()),
            _ => {
                let pick = self.hasher.hash(collision_repr(key).as_bytes()) % owners.len() as u64;
                trace!(key, candidates = owners.len(), pick, "resolved position collision");
                Some(owners[pick as usize].to_string())
            }
        }
    }

    /// Returns true when the ring holds no positions.
    pub fn is_empty(&self) -> bool {
        self.state.read().table.is_empty()
    }

    /// The configured replica count (also the per-node maximum).
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.state.read().nodes.len()
    }

    /// Number of distinct positions on the ring.
    pub fn position_count(&self) -> usize {
        self.state.read().table.len()
    }

    /// Returns true if `node` is on the ring.
    pub fn contains(&self, node: &str) -> bool {
        self.state.read().nodes.contains_key(node)
    }

    /// The replica count `node` was added with, if it is on the ring.
    pub fn replicas_of(&self, node: &str) -> Option<usize> {
        self.state.read().nodes.get(node).copied()
    }

    /// Live nodes with their replica counts, sorted by name.
    pub fn nodes(&self) -> Vec<(String, usize)> {
        let state = self.state.read();
        let mut nodes: Vec<(String, usize)> = state
            .nodes
            .iter()
            .map(|(name, &replicas)| (name.to_string(), replicas))
            .collect();
        nodes.sort_unstable();
        nodes
    }

    /// Name of the hash function placing positions.
    pub fn hasher_name(&self) -> &'static str {
        self.hasher.name()
    }
}

impl RingState {
    /// Removes `node` using the replica count it was added with.
    ///
    /// Returns false if the node was not live.
    fn remove_node<H: KeyHasher>(&mut self, hasher: &H, node: &str) -> bool {
        let Some(replicas) = self.nodes.remove(node) else {
            return false;
        };

        for index in 0..replicas {
            let position = replica_position(hasher, node, index);
            self.table.remove(position, node);
        }

        debug!(
            node,
            replicas,
            positions = self.table.len(),
            "removed node from ring"
        );
        true
    }
}

impl<H: KeyHasher> fmt::Debug for HashRing<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("HashRing")
            .field("hasher", &self.hasher.name())
            .field("replicas", &self.replicas)
            .field("nodes", &state.nodes.len())
            .field("positions", &state.table.len())
            .finish()
    }
}

/// Position of replica `index` of `node`: `hash(node + decimal(index))`.
fn replica_position<H: KeyHasher>(hasher: &H, node: &str, index: usize) -> u64 {
    hasher.hash(format!("{node}{index}").as_bytes())
}

fn collision_repr(key: &str) -> String {
    format!("{COLLISION_SALT}:{key}")
}
