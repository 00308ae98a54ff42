//! Error types for handler configuration and dispatch.

use std::error::Error;

use thiserror::Error;

use crate::operation::Operation;

/// Boxed error returned by caller-supplied collaborators (build functions,
/// actions, host dispatchers).
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Raised while turning a [`SyncConfig`](crate::SyncConfig) into a handler table.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An alias points at an operation that is itself an alias.
    #[error("{operation} aliases {target}, which is itself an alias")]
    ChainedAlias {
        operation: Operation,
        target: Operation,
    },
    /// A handler record has no action once all layers are merged.
    #[error("handler for {0} has no action")]
    MissingAction(Operation),
    /// A textual handler spec was neither `"default"` nor an operation name.
    #[error("unknown handler spec: {0:?}")]
    UnknownSpec(String),
    /// A string did not name one of the four operations.
    #[error("unknown operation: {0:?}")]
    UnknownOperation(String),
    /// Handler flags could not be decoded.
    #[error("invalid handler flags: {0}")]
    InvalidFlags(#[from] serde_json::Error),
}

/// Raised while dispatching a single operation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The handler's build function failed.
    #[error("building the {operation} request failed: {source}")]
    Build {
        operation: Operation,
        source: BoxError,
    },
    /// The model could not be serialized into a default payload.
    #[error("serializing the model for {operation} failed: {source}")]
    Serialize {
        operation: Operation,
        source: serde_json::Error,
    },
    /// The handler expands arguments but the built payload is not a list.
    #[error("{operation} handler expands arguments but its payload is not a list")]
    NotAnArgumentList { operation: Operation },
    /// The action failed synchronously.
    #[error("{operation} action failed: {source}")]
    Action {
        operation: Operation,
        source: BoxError,
    },
    /// The handler returns a promise but its action completed synchronously.
    #[error("{operation} handler returns a promise but its action completed synchronously")]
    ExpectedDeferred { operation: Operation },
    /// No dispatcher along the chain handles the operation.
    #[error("no dispatcher handles {operation}")]
    Unhandled { operation: Operation },
    /// A host-supplied dispatcher failed.
    #[error("fallback dispatch failed: {0}")]
    Fallback(#[source] BoxError),
}

impl SyncError {
    /// Wrap an arbitrary host failure.
    pub fn fallback(err: impl Into<BoxError>) -> Self {
        SyncError::Fallback(err.into())
    }

    /// The operation this error was raised for, when known.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            SyncError::Build { operation, .. }
            | SyncError::Serialize { operation, .. }
            | SyncError::NotAnArgumentList { operation }
            | SyncError::Action { operation, .. }
            | SyncError::ExpectedDeferred { operation }
            | SyncError::Unhandled { operation } => Some(*operation),
            SyncError::Fallback(_) => None,
        }
    }
}
