//! What a handler action receives and returns.

use std::fmt;
use std::slice;
use std::sync::Arc;

use serde_json::Value;

use crate::deferred::Deferred;
use crate::error::BoxError;
use crate::model::SyncModel;
use crate::operation::Operation;
use crate::options::RequestOptions;

/// A handler's `do` action.
pub type Action = Arc<dyn Fn(Invocation) -> Result<Completion, BoxError> + Send + Sync>;

/// A handler's payload builder: `(operation, model, options) -> payload`.
pub type BuildFn =
    Arc<dyn Fn(Operation, &dyn SyncModel, &RequestOptions) -> Result<Value, BoxError> + Send + Sync>;

/// The built request passed to an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// One payload value.
    Single(Value),
    /// Positional arguments, one per element of the built list.
    Expanded(Vec<Value>),
}

impl Payload {
    /// The payload as positional arguments. A single payload is one argument.
    pub fn args(&self) -> &[Value] {
        match self {
            Payload::Single(value) => slice::from_ref(value),
            Payload::Expanded(args) => args.as_slice(),
        }
    }
}

/// A single call of an action.
#[derive(Debug)]
pub struct Invocation {
    operation: Operation,
    payload: Payload,
    options: RequestOptions,
}

impl Invocation {
    pub(crate) fn new(operation: Operation, payload: Payload, options: RequestOptions) -> Self {
        Self {
            operation,
            payload,
            options,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The single payload value, or `None` when arguments were expanded.
    pub fn value(&self) -> Option<&Value> {
        match &self.payload {
            Payload::Single(value) => Some(value),
            Payload::Expanded(_) => None,
        }
    }

    /// Positional arguments (see [`Payload::args`]).
    pub fn args(&self) -> &[Value] {
        self.payload.args()
    }

    /// The request options as this action sees them.
    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    pub fn into_parts(self) -> (Operation, Payload, RequestOptions) {
        (self.operation, self.payload, self.options)
    }
}

/// What an action (or a fallback dispatcher) hands back.
#[derive(Clone)]
pub enum Completion {
    /// Synchronous result.
    Value(Value),
    /// Promise-like completion that settles later.
    Deferred(Arc<dyn Deferred>),
}

impl Completion {
    pub fn deferred<D: Deferred + 'static>(deferred: D) -> Self {
        Completion::Deferred(Arc::new(deferred))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Completion::Deferred(_))
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Completion::Value(value) => Some(value),
            Completion::Deferred(_) => None,
        }
    }
}

impl From<Value> for Completion {
    fn from(value: Value) -> Self {
        Completion::Value(value)
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Completion::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}
