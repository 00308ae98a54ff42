//! Fetches a todo through an already settled promise.

use crud_sync::{BoxError, Completion, Invocation, Operation, Promise};
use serde_json::json;

pub const OPERATION: Operation = Operation::Read;

pub fn handle(inv: Invocation) -> Result<Completion, BoxError> {
    let id = inv
        .value()
        .and_then(|payload| payload.get("id"))
        .cloned()
        .ok_or("read expects an id")?;
    Ok(Completion::deferred(Promise::resolved(
        json!({ "id": id, "title": "fetched" }),
    )))
}
