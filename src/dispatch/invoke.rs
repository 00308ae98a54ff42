//! Invocation: call the action and adapt deferred completions to the
//! caller's `success` / `error` callbacks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;

use crate::action::{Completion, Invocation, Payload};
use crate::deferred::Deferred;
use crate::error::SyncError;
use crate::handler::NormalizedHandler;
use crate::operation::Operation;
use crate::options::{Callback, RequestOptions};

pub(crate) fn invoke(
    operation: Operation,
    handler: &NormalizedHandler,
    payload: Payload,
    mut options: RequestOptions,
) -> Result<Completion, SyncError> {
    if !handler.returns_promise {
        return call(operation, handler, payload, options);
    }

    // The action only ever sees no-op callbacks; the caller's pair is
    // reached through the deferred alone.
    let (success, error) = options.silence_callbacks();
    match call(operation, handler, payload, options)? {
        Completion::Deferred(deferred) => {
            observe(operation, &*deferred, success, error);
            Ok(Completion::Deferred(deferred))
        }
        Completion::Value(_) => Err(SyncError::ExpectedDeferred { operation }),
    }
}

fn call(
    operation: Operation,
    handler: &NormalizedHandler,
    payload: Payload,
    options: RequestOptions,
) -> Result<Completion, SyncError> {
    (handler.action)(Invocation::new(operation, payload, options))
        .map_err(|source| SyncError::Action { operation, source })
}

/// Route the deferred's outcome to the saved callbacks. At most one of the
/// pair fires.
fn observe(
    operation: Operation,
    deferred: &dyn Deferred,
    success: Option<Callback>,
    error: Option<Callback>,
) {
    let settled = Arc::new(AtomicBool::new(false));

    let once = Arc::clone(&settled);
    deferred.on_success(Arc::new(move |value: Value| {
        if once.swap(true, Ordering::SeqCst) {
            tracing::warn!(
                target: "crud_sync::dispatch",
                %operation,
                "dropping success after the request already completed"
            );
            return;
        }
        if let Some(success) = &success {
            success(value);
        }
    }));

    let once = settled;
    deferred.on_failure(Arc::new(move |value: Value| {
        if once.swap(true, Ordering::SeqCst) {
            tracing::warn!(
                target: "crud_sync::dispatch",
                %operation,
                "dropping failure after the request already completed"
            );
            return;
        }
        if let Some(error) = &error {
            error(value);
        }
    }));
}
