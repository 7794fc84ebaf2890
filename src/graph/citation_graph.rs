//! The citation graph container
//!
//! Nodes live in an [`Arena`] and reference each other through handles.
//! Parent → child edges own the child: every node counts its owners, and
//! when the count drops to zero the node is released together with every
//! descendant that loses its last owner as a result. Child → parent edges
//! only observe. The [`SortedIndex`] maps ids to handles and holds exactly
//! the live nodes.
//!
//! User code (key copies, key comparisons, publication construction and id
//! retrieval) runs only in lookups and in the final publication step of
//! `create`. Everything that edits edges works on handles and cannot fail,
//! so multi-step edits run inside a [`Transaction`] and are undone as a
//! whole if the publication step fails.

use crate::core::config::GraphConfig;
use crate::core::error::{GraphError, GraphResult};
use crate::core::types::{CitationKey, Publication};
use crate::graph::edge::EdgeSet;
use crate::graph::node::Node;
use crate::structures::arena::{Arena, NodeKey};
use crate::structures::sorted_index::SortedIndex;
use crate::structures::undo_log::Transaction;
use std::collections::BTreeSet;
use tracing::debug;

/// Directed acyclic graph of publications rooted at one publication that can
/// never be removed.
///
/// The graph is move-only. Moving it carries the arena and the index along;
/// there is no deep copy.
pub struct CitationGraph<P: Publication> {
    nodes: Arena<Node<P>>,
    index: SortedIndex<P::Id>,
    root: NodeKey,
}

impl<P: Publication> CitationGraph<P> {
    /// Create a graph holding only the root publication `root_id`.
    pub fn new(root_id: &P::Id) -> GraphResult<Self, P> {
        Self::with_config(root_id, &GraphConfig::default())
    }

    /// Create a graph sized according to `config`.
    pub fn with_config(root_id: &P::Id, config: &GraphConfig) -> GraphResult<Self, P> {
        let publication = P::new(root_id)?;
        let key = root_id.try_clone()?;

        let mut root_node = Node::new(publication);
        // The graph itself owns the root.
        root_node.strong = 1;
        root_node.registered = true;

        let mut nodes = Arena::with_capacity(config.initial_capacity);
        let root = nodes.alloc(root_node);
        let mut index = SortedIndex::with_capacity(config.initial_capacity);
        index.insert_at(0, key, root);

        debug!(capacity = config.initial_capacity, "created citation graph");
        Ok(Self { nodes, index, root })
    }

    /// Id of the root publication.
    pub fn root_id(&self) -> GraphResult<P::Id, P> {
        Ok(self.nodes[self.root].id()?)
    }

    /// Whether a publication with `id` is in the graph.
    pub fn exists(&self, id: &P::Id) -> GraphResult<bool, P> {
        Ok(self.index.get(id)?.is_some())
    }

    /// Ids of the works citing `id`, in no particular order.
    pub fn children_of(&self, id: &P::Id) -> GraphResult<Vec<P::Id>, P> {
        let key = self.lookup(id)?;
        self.collect_ids(&self.nodes[key].children)
    }

    /// Ids of the works cited by `id`, in no particular order.
    pub fn parents_of(&self, id: &P::Id) -> GraphResult<Vec<P::Id>, P> {
        let key = self.lookup(id)?;
        self.collect_ids(&self.nodes[key].parents)
    }

    /// Borrow the publication stored under `id`.
    pub fn get(&self, id: &P::Id) -> GraphResult<&P, P> {
        let key = self.lookup(id)?;
        Ok(&self.nodes[key].publication)
    }

    /// Mutably borrow the publication stored under `id`.
    pub fn get_mut(&mut self, id: &P::Id) -> GraphResult<&mut P, P> {
        let key = self.lookup(id)?;
        Ok(&mut self.nodes[key].publication)
    }

    /// Number of publications in the graph, root included.
    pub fn publication_count(&self) -> usize {
        self.index.len()
    }

    /// Ids of every publication, in key order.
    pub fn ids(&self) -> GraphResult<Vec<P::Id>, P> {
        let mut ids = Vec::with_capacity(self.index.len());
        for (key, _) in self.index.iter() {
            ids.push(key.try_clone()?);
        }
        Ok(ids)
    }

    /// Create publication `id` citing every publication in `parent_ids`.
    ///
    /// Fails with `AlreadyExists` if `id` is taken and with `NotFound` if
    /// `parent_ids` is empty or names a missing publication. Repeated parent
    /// ids count once. On any failure the graph is left as it was.
    pub fn create(&mut self, id: &P::Id, parent_ids: &[P::Id]) -> GraphResult<(), P> {
        if self.index.search(id)?.is_ok() {
            return Err(GraphError::AlreadyExists);
        }
        if parent_ids.is_empty() {
            return Err(GraphError::NotFound);
        }
        let mut parents = BTreeSet::new();
        for parent_id in parent_ids {
            parents.insert(self.lookup(parent_id)?);
        }
        let publication = P::new(id)?;

        let mut tx = Transaction::new(self);
        let child = tx.apply(|graph| {
            let child = graph.nodes.alloc(Node::new(publication));
            (child, move |graph: &mut Self| {
                graph.nodes.release(child);
            })
        });
        for &parent in &parents {
            tx.apply(|graph| {
                graph.nodes[parent].children.insert(child);
                ((), move |graph: &mut Self| {
                    graph.nodes[parent].children.remove(child);
                })
            });
            tx.apply(|graph| {
                graph.nodes[child].add_owner(parent);
                ((), move |graph: &mut Self| {
                    graph.nodes[child].drop_owner(parent);
                })
            });
        }
        tx.try_apply(|graph| -> GraphResult<((), _), P> {
            let pos = graph.publish(id, child)?;
            Ok(((), move |graph: &mut Self| {
                graph.index.remove_at(pos);
                graph.nodes[child].registered = false;
            }))
        })?;
        tx.commit();

        debug!(node = child.index(), parents = parents.len(), "created publication");
        Ok(())
    }

    /// Create publication `id` citing the single publication `parent_id`.
    pub fn create_with_parent(&mut self, id: &P::Id, parent_id: &P::Id) -> GraphResult<(), P> {
        self.create(id, std::slice::from_ref(parent_id))
    }

    /// Record that `child_id` cites `parent_id`.
    ///
    /// Adding an existing citation is a no-op. Fails with `NotFound` if either
    /// id is missing and with `CycleDetected` if `parent_id` already cites
    /// `child_id`, directly or transitively, or if both ids are the same.
    pub fn add_citation(&mut self, child_id: &P::Id, parent_id: &P::Id) -> GraphResult<(), P> {
        let child = self.lookup(child_id)?;
        let parent = self.lookup(parent_id)?;
        if self.nodes[parent].children.contains(child) {
            return Ok(());
        }
        if child == parent || self.reaches(child, parent) {
            return Err(GraphError::CycleDetected);
        }

        let mut tx = Transaction::new(self);
        tx.apply(|graph| {
            graph.nodes[parent].children.insert(child);
            ((), move |graph: &mut Self| {
                graph.nodes[parent].children.remove(child);
            })
        });
        tx.apply(|graph| {
            graph.nodes[child].add_owner(parent);
            ((), move |graph: &mut Self| {
                graph.nodes[child].drop_owner(parent);
            })
        });
        tx.commit();

        debug!(child = child.index(), parent = parent.index(), "added citation");
        Ok(())
    }

    /// Remove publication `id`.
    ///
    /// The publication is unlinked from all of its parents at once and
    /// released. Every descendant left without a citing parent is released
    /// too. Fails with `NotFound` if `id` is missing and with
    /// `TriedToRemoveRoot` for the root.
    pub fn remove(&mut self, id: &P::Id) -> GraphResult<(), P> {
        let target = self.lookup(id)?;
        if target == self.root {
            return Err(GraphError::TriedToRemoveRoot);
        }

        let parents = self.nodes[target].parents.clone();
        for parent in &parents {
            self.nodes[parent].children.remove(target);
            self.nodes[target].drop_owner(parent);
        }
        let released = if self.nodes[target].is_orphaned() {
            self.release_cascade(target)
        } else {
            0
        };

        debug!(node = target.index(), parents = parents.len(), released, "removed publication");
        Ok(())
    }

    fn lookup(&self, id: &P::Id) -> GraphResult<NodeKey, P> {
        self.index.get(id)?.ok_or(GraphError::NotFound)
    }

    fn collect_ids(&self, edges: &EdgeSet) -> GraphResult<Vec<P::Id>, P> {
        let mut ids = Vec::with_capacity(edges.len());
        for key in edges {
            ids.push(self.nodes[key].id()?);
        }
        Ok(ids)
    }

    /// Insert `id` into the index for `node`, returning the entry position.
    fn publish(&mut self, id: &P::Id, node: NodeKey) -> GraphResult<usize, P> {
        let key = id.try_clone()?;
        let pos = match self.index.search(&key)? {
            Ok(_) => return Err(GraphError::AlreadyExists),
            Err(pos) => pos,
        };
        self.index.insert_at(pos, key, node);
        self.nodes[node].registered = true;
        Ok(pos)
    }

    /// Whether `to` can be reached from `from` along child edges.
    fn reaches(&self, from: NodeKey, to: NodeKey) -> bool {
        let mut pending = vec![from];
        let mut seen = BTreeSet::new();
        while let Some(key) = pending.pop() {
            if key == to {
                return true;
            }
            if seen.insert(key) {
                pending.extend(self.nodes[key].children.iter());
            }
        }
        false
    }

    /// Release an orphaned node and every descendant it was the last owner
    /// of, then deregister them from the index. Returns how many nodes went.
    fn release_cascade(&mut self, start: NodeKey) -> usize {
        let mut pending = vec![start];
        let mut deregister = BTreeSet::new();
        let mut released = 0;
        while let Some(key) = pending.pop() {
            let Some(node) = self.nodes.release(key) else {
                continue;
            };
            released += 1;
            if node.registered {
                deregister.insert(key);
            }
            for child in &node.children {
                if self.nodes[child].drop_owner(key) {
                    pending.push(child);
                }
            }
        }
        if !deregister.is_empty() {
            self.index.retain_values(|key| !deregister.contains(&key));
        }
        released
    }

    /// Check the structural invariants, panicking on the first violation.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.index.len(), self.nodes.len(), "index and arena disagree");
        for (_, key) in self.index.iter() {
            let node = self.nodes.get(key).expect("index points at a released node");
            assert!(node.registered);
        }
        for (key, node) in self.nodes.iter() {
            for child in &node.children {
                assert!(self.nodes[child].parents.contains(key), "missing back-reference");
            }
            for parent in &node.parents {
                assert!(self.nodes[parent].children.contains(key), "dangling back-reference");
            }
            let owners = node.parents.len() + usize::from(key == self.root);
            assert_eq!(node.strong, owners, "owner count out of sync");
            assert!(key == self.root || self.reaches(self.root, key), "unreachable node kept alive");
        }
    }
}
