use thiserror::Error;

/// Errors returned by [`Document`](crate::Document) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("Element '{0}' not found")]
    NotFound(String),

    #[error("Element id '{0}' already exists in the document")]
    DuplicateId(String),

    #[error("The document root cannot be removed")]
    RootRemoval,

    #[error("Element '{0}' is already claimed")]
    AlreadyClaimed(String),
}
