//! Citation node

use crate::core::types::{Publication, UserError};
use crate::graph::edge::EdgeSet;
use crate::structures::arena::NodeKey;

/// One publication in the graph together with its edges.
///
/// `children` are owning edges: a node stays alive while at least one parent
/// lists it, and `strong` counts those owners. The root carries one extra
/// count for the graph itself. `parents` are observational back-references
/// used to enumerate cited works and to unlink the node from its parents.
pub struct Node<P> {
    /// Stored payload
    pub publication: P,
    /// Owning edges to citing works
    pub children: EdgeSet,
    /// Back-references to cited works
    pub parents: EdgeSet,
    /// Number of owners keeping this node alive
    pub strong: usize,
    /// Whether the node is published in the id index
    pub registered: bool,
}

impl<P: Publication> Node<P> {
    /// Wrap a payload in an unlinked, unregistered node
    pub fn new(publication: P) -> Self {
        Self {
            publication,
            children: EdgeSet::new(),
            parents: EdgeSet::new(),
            strong: 0,
            registered: false,
        }
    }

    /// Id of the stored publication
    pub fn id(&self) -> Result<P::Id, UserError<P>> {
        self.publication.id()
    }

    /// Record `parent` as an owner. Returns false if it already was one.
    pub fn add_owner(&mut self, parent: NodeKey) -> bool {
        if !self.parents.insert(parent) {
            return false;
        }
        self.strong += 1;
        true
    }

    /// Forget `parent` as an owner. Returns true when no owner is left.
    pub fn drop_owner(&mut self, parent: NodeKey) -> bool {
        if self.parents.remove(parent) {
            self.strong -= 1;
        }
        self.strong == 0
    }

    /// Whether nothing keeps the node alive any more
    pub fn is_orphaned(&self) -> bool {
        self.strong == 0
    }
}
