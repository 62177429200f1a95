//! Navigation error types.

use griddom::DomError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// The bound table was accessed before `init` (or after `destroy`).
    #[error("Navigation model is not attached to a table")]
    NotAttached,

    #[error("Table '{0}' does not exist in the document")]
    TableNotFound(String),

    /// Another navigation model already owns this table.
    #[error("Table '{0}' already has navigation attached")]
    AlreadyAttached(String),

    #[error(transparent)]
    Dom(#[from] DomError),
}
