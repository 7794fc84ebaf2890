//! Edge sets between citation nodes

use crate::structures::arena::NodeKey;
use std::collections::BTreeSet;

/// Set of edges from one node, stored as arena handles.
///
/// Handles compare without calling user code, so inserting or removing an
/// edge never fails. That is what makes "remove the edge just added" a safe
/// undo action.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EdgeSet {
    targets: BTreeSet<NodeKey>,
}

impl EdgeSet {
    /// Create an empty edge set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge. Returns false if it was already present.
    #[inline]
    pub fn insert(&mut self, target: NodeKey) -> bool {
        self.targets.insert(target)
    }

    /// Drop an edge. Returns false if it was not present.
    #[inline]
    pub fn remove(&mut self, target: NodeKey) -> bool {
        self.targets.remove(&target)
    }

    /// Check for an edge
    #[inline]
    pub fn contains(&self, target: NodeKey) -> bool {
        self.targets.contains(&target)
    }

    /// Number of edges
    pub(crate) fn len(&self) -> usize {
        self.targets.len()
    }

    /// Edge targets in handle order
    pub fn iter(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.targets.iter().copied()
    }
}

impl<'a> IntoIterator for &'a EdgeSet {
    type Item = NodeKey;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, NodeKey>>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter().copied()
    }
}
