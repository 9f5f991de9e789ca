//! Ring positions and the nodes that own them.

use std::collections::HashMap;
use std::sync::Arc;

/// Ascending ring positions plus the owners of each position.
///
/// # Invariants
///
/// - `positions` is sorted and holds no duplicates (after [`sort`](Self::sort))
/// - A position is in `positions` iff it has a non-empty entry in `owners`
/// - Owners of a position are kept in insertion order
#[derive(Debug, Default)]
pub(crate) struct PositionTable {
    positions: Vec<u64>,
    owners: HashMap<u64, Vec<Arc<str>>>,
}

impl PositionTable {
    pub(crate) fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of distinct positions on the ring.
    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }

    /// Appends `node` to the owners of `position`.
    ///
    /// New positions are appended unsorted; call [`sort`](Self::sort) once
    /// the whole batch is in.
    pub(crate) fn push(&mut self, position: u64, node: &Arc<str>) {
        let owners = self.owners.entry(position).or_default();
        if owners.is_empty() {
            self.positions.push(position);
        }
        owners.push(Arc::clone(node));
    }

    pub(crate) fn sort(&mut self) {
        self.positions.sort_unstable();
        debug_assert!(self.positions.windows(2).all(|w| w[0] < w[1]));
    }

    /// Strips `node` from the owners of `position`.
    ///
    /// The position is pruned when no owner remains. Returns whether
    /// anything was removed.
    pub(crate) fn remove(&mut self, position: u64, node: &str) -> bool {
        let Some(owners) = self.owners.get(&position) else {
            return false;
        };

        // Readers never see this list mid-edit: the replacement is built
        // aside and swapped in.
        let remaining: Vec<Arc<str>> = owners
            .iter()
            .filter(|owner| owner.as_ref() != node)
            .cloned()
            .collect();
        if remaining.len() == owners.len() {
            return false;
        }

        if remaining.is_empty() {
            self.owners.remove(&position);
            if let Ok(index) = self.positions.binary_search(&position) {
                self.positions.remove(index);
            }
        } else {
            self.owners.insert(position, remaining);
        }
        true
    }

    /// Owners of the first position at or after `hash`, wrapping to the
    /// start of the ring.
    pub(crate) fn successor(&self, hash: u64) -> Option<&[Arc<str>]> {
        if self.positions.is_empty() {
            return None;
        }

        let index = self.positions.partition_point(|&position| position < hash) % self.positions.len();
        self.owners.get(&self.positions[index]).map(Vec::as_slice)
    }

    #[cfg(test)]
    pub(crate) fn positions(&self) -> &[u64] {
        &self.positions
    }
}
