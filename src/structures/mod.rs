//! Data structures backing the citation graph

/// Slot arena handing out stable node handles
pub mod arena;

/// Sorted id index with fallible key comparisons
pub mod sorted_index;

/// Reversible edits and transactions
pub mod undo_log;

pub use arena::{Arena, NodeKey};
pub use sorted_index::SortedIndex;
pub use undo_log::Transaction;
