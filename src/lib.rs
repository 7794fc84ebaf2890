//! Citation Graph - An in-memory DAG of publications
//!
//! Every publication may cite several others and be cited by several others.
//! A root publication always exists, every other publication is reachable
//! from it, and removing a publication releases every descendant that is no
//! longer cited by anything still in the graph. Mutations either succeed
//! completely or leave the graph exactly as it was, even when the user's key
//! or publication type fails part-way through.
#![warn(missing_docs)]

// Core foundational modules
pub mod core;

// Supporting data structures
pub mod structures;

// Main functional module
pub mod graph;

// Re-export commonly used items for convenience
pub use crate::core::{
    CitationKey, Config, Error, GraphConfig, GraphError, GraphResult, Publication,
    PublicationRecord, Result, UserError,
};
pub use graph::CitationGraph;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging from `config`
pub fn init(config: &Config) -> Result<()> {
    crate::core::logging::init_logging(&config.logging)?;
    tracing::info!("Initializing {} v{}", NAME, VERSION);
    Ok(())
}
