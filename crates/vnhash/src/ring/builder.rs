//! Builder for populating a ring in one expression.

use super::{HashRing, MIN_REPLICAS};
use crate::hasher::{HashAlgorithm, KeyHasher};

/// Builds a [`HashRing`] with a replica count, hasher and initial nodes.
///
/// ```
/// use vnhash::{HashAlgorithm, RingBuilder};
///
/// let ring = RingBuilder::new()
///     .with_replicas(200)
///     .with_hasher(HashAlgorithm::Fnv1)
///     .add_node("a")
///     .add_node_with_replicas("b", 150)
///     .build();
///
/// assert_eq!(ring.node_count(), 2);
/// assert_eq!(ring.replicas_of("b"), Some(150));
/// ```
#[derive(Debug, Clone)]
pub struct RingBuilder<H = HashAlgorithm> {
    replicas: usize,
    hasher: H,
    nodes: Vec<(String, Option<usize>)>,
}

impl RingBuilder {
    /// Starts a builder with [`MIN_REPLICAS`] replicas and the default hasher.
    pub fn new() -> Self {
        Self {
            replicas: MIN_REPLICAS,
            hasher: HashAlgorithm::default(),
            nodes: Vec::new(),
        }
    }
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: KeyHasher> RingBuilder<H> {
    /// Sets the ring's replica count (raised to [`MIN_REPLICAS`] at build time).
    pub fn with_replicas(mut self, replicas: usize) -> Self {
        self.replicas = replicas;
        self
    }

    /// Replaces the hash function.
    pub fn with_hasher<H2: KeyHasher>(self, hasher: H2) -> RingBuilder<H2> {
        RingBuilder {
            replicas: self.replicas,
            hasher,
            nodes: self.nodes,
        }
    }

    /// Adds a node with the ring's replica count.
    pub fn add_node(mut self, node: impl Into<String>) -> Self {
        self.nodes.push((node.into(), None));
        self
    }

    /// Adds a node with an explicit replica count.
    pub fn add_node_with_replicas(mut self, node: impl Into<String>, replicas: usize) -> Self {
        self.nodes.push((node.into(), Some(replicas)));
        self
    }

    /// Builds the ring, adding nodes in the order they were given.
    pub fn build(self) -> HashRing<H> {
        let ring = HashRing::with_hasher(self.replicas, self.hasher);
        for (node, replicas) in &self.nodes {
            match replicas {
                Some(replicas) => ring.add_with_replicas(node, *replicas),
                None => ring.add(node),
            }
        }
        ring
    }
}
