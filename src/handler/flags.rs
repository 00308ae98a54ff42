//! Boolean handler flags, loadable from configuration text.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The three boolean switches of a handler. `None` means "not set at this layer".
///
/// Deserializes from snake_case or camelCase keys. The legacy inverted key
/// `noOptions` is accepted too: `noOptions: true` means `addOptions: false`.
///
/// ```json
/// { "returnsPromise": true, "addOptions": false }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFlags", rename_all = "camelCase")]
pub struct HandlerFlags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand_arguments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns_promise: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_options: Option<bool>,
}

impl HandlerFlags {
    /// Built-in defaults, the lowest layer under every handler.
    pub const BUILTIN: HandlerFlags = HandlerFlags {
        expand_arguments: Some(false),
        returns_promise: Some(false),
        add_options: Some(true),
    };

    /// Parse flags from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Layer `over` on top of `self`. Fields set in `over` win.
    pub fn layer(self, over: HandlerFlags) -> HandlerFlags {
        HandlerFlags {
            expand_arguments: over.expand_arguments.or(self.expand_arguments),
            returns_promise: over.returns_promise.or(self.returns_promise),
            add_options: over.add_options.or(self.add_options),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawFlags {
    #[serde(default, alias = "expand_arguments")]
    expand_arguments: Option<bool>,
    #[serde(default, alias = "returns_promise")]
    returns_promise: Option<bool>,
    #[serde(default, alias = "add_options")]
    add_options: Option<bool>,
    #[serde(default, alias = "no_options")]
    no_options: Option<bool>,
}

impl From<RawFlags> for HandlerFlags {
    fn from(raw: RawFlags) -> Self {
        HandlerFlags {
            expand_arguments: raw.expand_arguments,
            returns_promise: raw.returns_promise,
            add_options: raw.add_options.or(raw.no_options.map(|no| !no)),
        }
    }
}
