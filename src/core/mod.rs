//! Core system types and foundations
//!
//! This module contains the capability contracts the graph is generic over,
//! error handling, configuration and logging setup.

pub mod types;
pub mod error;
pub mod config;
pub mod logging;

// Re-export commonly used items
pub use types::{CitationKey, Publication, PublicationRecord, UserError};
pub use error::{Error, GraphError, GraphResult, Result};
pub use config::{Config, GraphConfig, load_config_or_default};
