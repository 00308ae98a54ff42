//! Request building: turn a model and options into an action payload.

use serde_json::Value;

use crate::action::Payload;
use crate::error::SyncError;
use crate::handler::NormalizedHandler;
use crate::model::SyncModel;
use crate::operation::Operation;
use crate::options::RequestOptions;

/// Build the payload for `handler`.
///
/// Uses the handler's build function, or the model's `to_json`. With
/// `add_options` (and without `expand_arguments`) the option fields are
/// merged underneath an object payload; payload fields win.
pub(crate) fn build_payload(
    operation: Operation,
    handler: &NormalizedHandler,
    model: &dyn SyncModel,
    options: &RequestOptions,
) -> Result<Payload, SyncError> {
    let built = match &handler.build {
        Some(build) => {
            build(operation, model, options).map_err(|source| SyncError::Build { operation, source })?
        }
        None => model
            .to_json()
            .map_err(|source| SyncError::Serialize { operation, source })?,
    };

    if handler.expand_arguments {
        return match built {
            Value::Array(args) => Ok(Payload::Expanded(args)),
            _ => Err(SyncError::NotAnArgumentList { operation }),
        };
    }

    if handler.add_options {
        Ok(Payload::Single(merge_options(built, options)))
    } else {
        Ok(Payload::Single(built))
    }
}

/// Shallow merge: option fields first, then payload fields on top.
/// Non-object payloads are returned unchanged; `null` becomes the options.
fn merge_options(built: Value, options: &RequestOptions) -> Value {
    match built {
        Value::Object(fields) => {
            let mut merged = options.extra.clone();
            merged.extend(fields);
            Value::Object(merged)
        }
        Value::Null => Value::Object(options.extra.clone()),
        other => other,
    }
}
