//! Error types for catalog operations.
//!
//! Only two things can go wrong inside the engine: a referenced identity
//! does not exist, or an argument is outside the allowed domain. Cases the
//! engine tolerates silently (re-adding an entity, dangling collection
//! members, toggling an option off twice) never produce an error.

use std::fmt;

/// What kind of identity a [`CatalogError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Entity,
    Collection,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Entity => f.write_str("entity"),
            ResourceKind::Collection => f.write_str("collection"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// The operation requires an identity that is not in the store.
    #[error("{kind} not found: {id}")]
    NotFound { kind: ResourceKind, id: String },

    /// Out-of-range rating, unknown facet, or an option outside a facet's domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CatalogError {
    pub fn not_found(kind: ResourceKind, id: impl ToString) -> Self {
        CatalogError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        CatalogError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
