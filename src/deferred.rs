//! Promise-like completion values.
//!
//! A [`Deferred`] is anything that lets observers register for its success
//! and failure. [`Promise`] is the bundled implementation: a settle-once cell
//! that runs observers on whichever thread settles it, and runs late
//! observers immediately.
//!
//! ```ignore
//! let promise = Promise::new();
//! let completion = Completion::deferred(promise.clone());
//! // ... later, from anywhere
//! promise.resolve(json!({ "id": "t1" }));
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::options::Callback;

/// Capability shared by every asynchronous completion value.
pub trait Deferred: Send + Sync {
    /// Observe success. Called with the success value.
    fn on_success(&self, callback: Callback);

    /// Observe failure. Called with the error value.
    fn on_failure(&self, callback: Callback);
}

enum State {
    Pending {
        success: Vec<Callback>,
        failure: Vec<Callback>,
    },
    Resolved(Value),
    Rejected(Value),
}

/// A settle-once promise. Clones share the same state.
#[derive(Clone)]
pub struct Promise {
    state: Arc<Mutex<State>>,
}

impl Default for Promise {
    fn default() -> Self {
        Self::new()
    }
}

impl Promise {
    /// Create a pending promise.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::Pending {
                success: Vec::new(),
                failure: Vec::new(),
            })),
        }
    }

    /// Create a promise that has already succeeded.
    pub fn resolved(value: impl Into<Value>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::Resolved(value.into()))),
        }
    }

    /// Create a promise that has already failed.
    pub fn rejected(value: impl Into<Value>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::Rejected(value.into()))),
        }
    }

    /// Settle with success. Returns `false` if the promise was already settled.
    pub fn resolve(&self, value: impl Into<Value>) -> bool {
        self.settle(Ok(value.into()))
    }

    /// Settle with failure. Returns `false` if the promise was already settled.
    pub fn reject(&self, value: impl Into<Value>) -> bool {
        self.settle(Err(value.into()))
    }

    pub fn is_settled(&self) -> bool {
        !matches!(*self.lock(), State::Pending { .. })
    }

    /// Adapt a future into a promise by spawning it on the current Tokio runtime.
    ///
    /// Must be called from within a runtime.
    #[cfg(feature = "tokio")]
    pub fn spawn<F>(future: F) -> Self
    where
        F: std::future::Future<Output = Result<Value, Value>> + Send + 'static,
    {
        let promise = Promise::new();
        let handle = promise.clone();
        tokio::spawn(async move {
            handle.settle(future.await);
        });
        promise
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn settle(&self, outcome: Result<Value, Value>) -> bool {
        let (observers, value) = {
            let mut state = self.lock();
            let (success, failure) = match &mut *state {
                State::Pending { success, failure } => {
                    (std::mem::take(success), std::mem::take(failure))
                }
                _ => {
                    tracing::warn!(
                        target: "crud_sync::deferred",
                        rejected = outcome.is_err(),
                        "ignoring completion of an already settled promise"
                    );
                    return false;
                }
            };
            match outcome {
                Ok(value) => {
                    *state = State::Resolved(value.clone());
                    (success, value)
                }
                Err(value) => {
                    *state = State::Rejected(value.clone());
                    (failure, value)
                }
            }
        };

        for observer in observers {
            observer(value.clone());
        }
        true
    }
}

impl Deferred for Promise {
    fn on_success(&self, callback: Callback) {
        let value = match &mut *self.lock() {
            State::Pending { success, .. } => {
                success.push(callback);
                return;
            }
            State::Resolved(value) => value.clone(),
            State::Rejected(_) => return,
        };
        callback(value);
    }

    fn on_failure(&self, callback: Callback) {
        let value = match &mut *self.lock() {
            State::Pending { failure, .. } => {
                failure.push(callback);
                return;
            }
            State::Rejected(value) => value.clone(),
            State::Resolved(_) => return,
        };
        callback(value);
    }
}
