use serde::Serialize;
use serde_json::Value;

/// A model that can be dispatched.
///
/// `to_json` is the canonical serialization used as the request payload
/// when a handler has no build function. Every `Serialize` type is a model.
pub trait SyncModel {
    fn to_json(&self) -> Result<Value, serde_json::Error>;
}

impl<T: Serialize> SyncModel for T {
    fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
