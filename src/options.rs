//! Request options supplied by the caller of a dispatch.
//!
//! Options carry the two completion callbacks plus free-form JSON fields.
//! When a handler adds options to its payload, only the JSON fields are
//! merged; the callbacks travel alongside in the [`Invocation`](crate::Invocation).

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

/// Completion callback, invoked with the success value or the error value.
pub type Callback = Arc<dyn Fn(Value) + Send + Sync>;

pub(crate) fn noop() -> Callback {
    Arc::new(|_: Value| {})
}

/// Caller-supplied request options: `success` / `error` callbacks and extra fields.
#[derive(Clone, Default)]
pub struct RequestOptions {
    pub success: Option<Callback>,
    pub error: Option<Callback>,
    pub extra: Map<String, Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the success callback.
    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: Fn(Value) + Send + Sync + 'static,
    {
        self.success = Some(Arc::new(callback));
        self
    }

    /// Set the error callback.
    pub fn on_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(Value) + Send + Sync + 'static,
    {
        self.error = Some(Arc::new(callback));
        self
    }

    /// Add an extra field.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Call the success callback, if any.
    pub fn succeed(&self, value: Value) {
        if let Some(success) = &self.success {
            success(value);
        }
    }

    /// Call the error callback, if any.
    pub fn fail(&self, value: Value) {
        if let Some(error) = &self.error {
            error(value);
        }
    }

    /// Take the caller's callbacks out, leaving no-ops in their place.
    pub(crate) fn silence_callbacks(&mut self) -> (Option<Callback>, Option<Callback>) {
        let success = self.success.replace(noop());
        let error = self.error.replace(noop());
        (success, error)
    }
}

impl From<Map<String, Value>> for RequestOptions {
    fn from(extra: Map<String, Value>) -> Self {
        Self {
            extra,
            ..Self::default()
        }
    }
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("success", &self.success.is_some())
            .field("error", &self.error.is_some())
            .field("extra", &self.extra)
            .finish()
    }
}
