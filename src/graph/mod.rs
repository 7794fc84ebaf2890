//! Citation graph container and its building blocks
//!
//! This module contains the node and edge types and the graph that links
//! them, including ownership tracking, cascading removal and rollback of
//! failed mutations.

pub mod node;
pub mod edge;
mod citation_graph;

// Re-export main graph types
pub use citation_graph::CitationGraph;
pub use edge::EdgeSet;

#[cfg(test)]
mod tests;
