//! Errors raised while assembling a schema.

use thiserror::Error;

/// Error assembling a [`Schema`](crate::Schema) from documents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two documents were given the same URI.
    #[error("document '{uri}' was added twice")]
    DuplicateDocument {
        /// The repeated URI.
        uri: String,
    },
}
