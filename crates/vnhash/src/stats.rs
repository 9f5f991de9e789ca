//! Key distribution measurement.
//!
//! Used to check how evenly a ring spreads keys over its nodes.

use std::collections::BTreeMap;

use crate::hasher::KeyHasher;
use crate::ring::HashRing;

/// Probabilities below this are floored before taking the logarithm.
const EPSILON: f64 = 1e-6;

/// Shannon entropy of `counts` divided by `log2(counts.len())`.
///
/// Returns a value in `(0, 1]`; 1 means perfectly uniform. Zero or one
/// bucket, or no observations at all, count as uniform.
pub fn normalized_entropy<I>(counts: I) -> f64
where
    I: IntoIterator<Item = usize>,
{
    let counts: Vec<usize> = counts.into_iter().collect();
    let total: usize = counts.iter().sum();
    if counts.len() <= 1 || total == 0 {
        return 1.0;
    }

    let entropy: f64 = counts
        .iter()
        .map(|&count| {
            let p = (count as f64 / total as f64).max(EPSILON);
            -p * p.log2()
        })
        .sum();

    entropy / (counts.len() as f64).log2()
}

/// How many of a set of keys each node received.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Distribution {
    counts: BTreeMap<String, usize>,
    misses: usize,
}

impl Distribution {
    /// Routes every key through `ring` and tallies the owners.
    ///
    /// Every live node gets a bucket, including nodes that receive no keys,
    /// so a skewed ring cannot look uniform.
    pub fn measure<H, I, K>(ring: &HashRing<H>, keys: I) -> Self
    where
        H: KeyHasher,
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut distribution = Self::default();
        for (node, _) in ring.nodes() {
            distribution.counts.insert(node, 0);
        }
        for key in keys {
            match ring.get(key.as_ref()) {
                Some(node) => *distribution.counts.entry(node).or_insert(0) += 1,
                None => distribution.misses += 1,
            }
        }
        distribution
    }

    /// Keys per live node.
    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    /// Keys that found no owner.
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Keys measured, including misses.
    pub fn total(&self) -> usize {
        self.counts.values().sum::<usize>() + self.misses
    }

    /// Normalized entropy of the per-node counts, over every live node.
    pub fn entropy(&self) -> f64 {
        normalized_entropy(self.counts.values().copied())
    }
}
