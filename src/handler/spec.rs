//! Raw handler specs as supplied by the caller.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;

use super::flags::HandlerFlags;
use crate::action::{Action, BuildFn, Completion, Invocation};
use crate::error::{BoxError, ConfigError};
use crate::model::SyncModel;
use crate::operation::Operation;
use crate::options::RequestOptions;

/// A handler record. Every field is optional so the same type serves as a
/// handler's own fields and as the config-wide `defaults` layer.
#[derive(Clone, Default)]
pub struct HandlerOptions {
    pub(crate) action: Option<Action>,
    pub(crate) build: Option<BuildFn>,
    pub(crate) flags: HandlerFlags,
}

impl HandlerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `do` action.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(Invocation) -> Result<Completion, BoxError> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Set an already shared `do` action.
    pub fn shared_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Set the payload builder. Without one the model's `to_json` is used.
    pub fn build<F>(mut self, build: F) -> Self
    where
        F: Fn(Operation, &dyn SyncModel, &RequestOptions) -> Result<Value, BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.build = Some(Arc::new(build));
        self
    }

    pub fn expand_arguments(mut self, on: bool) -> Self {
        self.flags.expand_arguments = Some(on);
        self
    }

    pub fn returns_promise(mut self, on: bool) -> Self {
        self.flags.returns_promise = Some(on);
        self
    }

    pub fn add_options(mut self, on: bool) -> Self {
        self.flags.add_options = Some(on);
        self
    }

    /// Layer a set of flags over the ones already set.
    pub fn flags(mut self, flags: HandlerFlags) -> Self {
        self.flags = self.flags.layer(flags);
        self
    }

    pub(crate) fn layer(&self, over: &HandlerOptions) -> HandlerOptions {
        HandlerOptions {
            action: over.action.clone().or_else(|| self.action.clone()),
            build: over.build.clone().or_else(|| self.build.clone()),
            flags: self.flags.layer(over.flags),
        }
    }
}

impl From<HandlerFlags> for HandlerOptions {
    fn from(flags: HandlerFlags) -> Self {
        HandlerOptions {
            flags,
            ..HandlerOptions::default()
        }
    }
}

impl fmt::Debug for HandlerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerOptions")
            .field("action", &self.action.is_some())
            .field("build", &self.build.is_some())
            .field("flags", &self.flags)
            .finish()
    }
}

/// How one operation is configured.
#[derive(Clone, Debug)]
pub enum HandlerSpec {
    /// A handler record (a bare action is a record with only `action` set).
    Direct(HandlerOptions),
    /// Use the handler configured for another operation. One level only.
    Alias(Operation),
    /// The `"default"` marker: no override, use the fallback.
    UseDefault,
}

impl HandlerSpec {
    /// A bare action.
    pub fn action<F>(action: F) -> Self
    where
        F: Fn(Invocation) -> Result<Completion, BoxError> + Send + Sync + 'static,
    {
        HandlerSpec::Direct(HandlerOptions::new().action(action))
    }

    pub fn alias(target: Operation) -> Self {
        HandlerSpec::Alias(target)
    }
}

impl From<HandlerOptions> for HandlerSpec {
    fn from(options: HandlerOptions) -> Self {
        HandlerSpec::Direct(options)
    }
}

impl From<Action> for HandlerSpec {
    fn from(action: Action) -> Self {
        HandlerSpec::Direct(HandlerOptions::new().shared_action(action))
    }
}

impl From<Operation> for HandlerSpec {
    fn from(target: Operation) -> Self {
        HandlerSpec::Alias(target)
    }
}

/// `"default"` is the marker, an operation name is an alias.
impl FromStr for HandlerSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "default" {
            return Ok(HandlerSpec::UseDefault);
        }
        s.parse::<Operation>()
            .map(HandlerSpec::Alias)
            .map_err(|_| ConfigError::UnknownSpec(s.to_string()))
    }
}
