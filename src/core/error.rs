//! Error types and handling for the citation graph
//!
//! `GraphError` is what graph operations return. It carries the three
//! structural failures plus whatever the user's key or publication raised,
//! untouched. `Error` covers the ambient layer (configuration, logging, the
//! demo program).

use thiserror::Error;

/// Main result type used by the ambient layer
pub type Result<T> = std::result::Result<T, Error>;

/// Result of a graph operation over publication type `P`
pub type GraphResult<T, P> = std::result::Result<T, GraphError<crate::core::types::UserError<P>>>;

/// Failure of a graph operation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError<E> {
    /// An id referenced by the operation is not in the graph
    #[error("PublicationNotFound")]
    NotFound,

    /// `create` referenced an id that is already in the graph
    #[error("PublicationAlreadyCreated")]
    AlreadyExists,

    /// `remove` targeted the root publication
    #[error("TriedToRemoveRoot")]
    TriedToRemoveRoot,

    /// `add_citation` would close a cycle of citations
    #[error("citation would create a cycle")]
    CycleDetected,

    /// Failure raised by the user's key or publication
    #[error(transparent)]
    User(E),
}

impl<E> From<E> for GraphError<E> {
    fn from(err: E) -> Self {
        GraphError::User(err)
    }
}

impl<E> GraphError<E> {
    /// Check whether the failure came from user code
    pub fn is_user_error(&self) -> bool {
        matches!(self, GraphError::User(_))
    }

    /// Unwrap the user failure, if this is one
    pub fn into_user_error(self) -> Option<E> {
        match self {
            GraphError::User(err) => Some(err),
            _ => None,
        }
    }
}

/// Error type for configuration, logging and the demo program
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Graph operation errors, rendered to text
    #[error("Graph operation error: {0}")]
    Graph(String),

    /// I/O errors from std
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph(msg.into())
    }
}

impl<E: std::error::Error + 'static> From<GraphError<E>> for Error {
    fn from(err: GraphError<E>) -> Self {
        Self::Graph(err.to_string())
    }
}
