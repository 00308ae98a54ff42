//! Test domain: a Todo model, a recording framework default, and a
//! callback log.

use std::sync::{Arc, Mutex};

use crud_sync::dispatch::from_fn;
use crud_sync::{Completion, Operation, RequestOptions, SharedDispatch};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub done: bool,
}

impl Todo {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            done: false,
        }
    }
}

/// One call that reached a framework default or fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct PassedThrough {
    pub operation: Operation,
    pub model: Value,
    pub extra: Value,
    pub has_success: bool,
}

/// A pass-through dispatcher that records every call it receives.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<PassedThrough>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatcher(&self, tag: &'static str) -> SharedDispatch {
        let calls = Arc::clone(&self.calls);
        from_fn(move |operation, model, options| {
            calls.lock().unwrap().push(PassedThrough {
                operation,
                model: model.to_json().unwrap(),
                extra: Value::Object(options.extra.clone()),
                has_success: options.success.is_some(),
            });
            Ok(Completion::Value(json!({ "served_by": tag })))
        })
    }

    pub fn calls(&self) -> Vec<PassedThrough> {
        self.calls.lock().unwrap().clone()
    }
}

/// Collects `success` / `error` callback invocations.
#[derive(Clone, Default)]
pub struct CallbackLog {
    entries: Arc<Mutex<Vec<(&'static str, Value)>>>,
}

impl CallbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request options whose callbacks write into this log.
    pub fn options(&self) -> RequestOptions {
        let (ok, err) = (Arc::clone(&self.entries), Arc::clone(&self.entries));
        RequestOptions::new()
            .on_success(move |v| ok.lock().unwrap().push(("success", v)))
            .on_error(move |v| err.lock().unwrap().push(("error", v)))
    }

    pub fn entries(&self) -> Vec<(&'static str, Value)> {
        self.entries.lock().unwrap().clone()
    }
}
