//! Capability contracts for citation keys and publication payloads
//!
//! The graph never assumes that key construction, copying or comparison
//! succeeds. Every capability call returns a `Result`, and the graph rolls
//! its own structure back before a failure reaches the caller.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;

/// Identifier of a publication.
///
/// Implementations provide a total order through [`CitationKey::try_cmp`];
/// two keys are equal exactly when it yields [`Ordering::Equal`]. Both the
/// comparison and the copy may fail with the implementation's error type.
pub trait CitationKey: Sized {
    /// Failure raised by key operations and by the owning publication.
    type Error: std::error::Error + 'static;

    /// Produce an independent copy of the key.
    fn try_clone(&self) -> Result<Self, Self::Error>;

    /// Compare two keys under the total order.
    fn try_cmp(&self, other: &Self) -> Result<Ordering, Self::Error>;
}

/// Payload stored in every node of the graph.
pub trait Publication: Sized {
    /// Key type identifying the publication.
    type Id: CitationKey;

    /// Construct the payload for a freshly created node.
    fn new(id: &Self::Id) -> Result<Self, UserError<Self>>;

    /// Return the identifier of this publication.
    fn id(&self) -> Result<Self::Id, UserError<Self>>;
}

/// Error type shared by a publication and its key.
pub type UserError<P> = <<P as Publication>::Id as CitationKey>::Error;

macro_rules! infallible_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CitationKey for $ty {
                type Error = Infallible;

                #[inline]
                fn try_clone(&self) -> Result<Self, Self::Error> {
                    Ok(self.clone())
                }

                #[inline]
                fn try_cmp(&self, other: &Self) -> Result<Ordering, Self::Error> {
                    Ok(self.cmp(other))
                }
            }
        )*
    };
}

infallible_key!(
    String, &'static str, char,
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
);

/// Ready-made publication holding its id and an optional title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationRecord<K> {
    id: K,
    /// Human readable title, filled in by the caller after creation
    pub title: Option<String>,
}

impl<K> PublicationRecord<K> {
    /// Borrow the id without copying it
    pub fn id_ref(&self) -> &K {
        &self.id
    }
}

impl<K: CitationKey> Publication for PublicationRecord<K> {
    type Id = K;

    fn new(id: &K) -> Result<Self, K::Error> {
        Ok(Self {
            id: id.try_clone()?,
            title: None,
        })
    }

    fn id(&self) -> Result<K, K::Error> {
        self.id.try_clone()
    }
}

impl<K: fmt::Display> fmt::Display for PublicationRecord<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "{} ({})", self.id, title),
            None => write!(f, "{}", self.id),
        }
    }
}
