//! SyncConfig: the per-operation handler configuration fed to the factory.
//!
//! ```ignore
//! use crud_sync::{HandlerOptions, HandlerSpec, Operation, SyncConfig};
//!
//! let config = SyncConfig::new()
//!     .action(Operation::Create, |inv| save(inv.value()))
//!     .update(Operation::Create)
//!     .read(HandlerOptions::new().action(fetch).returns_promise(true))
//!     .delete(HandlerSpec::UseDefault)
//!     .defaults_from_json(r#"{ "addOptions": false }"#)?;
//! ```

use std::fmt;

use crate::action::{Completion, Invocation};
use crate::dispatch::SharedDispatch;
use crate::error::{BoxError, ConfigError};
use crate::handler::{HandlerFlags, HandlerOptions, HandlerSpec};
use crate::operation::Operation;

/// Raw configuration: one spec per operation, an optional `defaults` layer
/// and an optional `sync` fallback.
///
/// Consumed by [`Dispatcher::build`](crate::Dispatcher::build); never mutated
/// during normalization.
#[derive(Clone, Default)]
pub struct SyncConfig {
    specs: [Option<HandlerSpec>; 4],
    defaults: Option<HandlerOptions>,
    sync: Option<SharedDispatch>,
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure one operation.
    pub fn handler(mut self, operation: Operation, spec: impl Into<HandlerSpec>) -> Self {
        self.specs[operation.index()] = Some(spec.into());
        self
    }

    /// Configure one operation with a bare action.
    pub fn action<F>(self, operation: Operation, action: F) -> Self
    where
        F: Fn(Invocation) -> Result<Completion, BoxError> + Send + Sync + 'static,
    {
        self.handler(operation, HandlerSpec::action(action))
    }

    /// Parse a textual spec (`"default"` or an operation name) for one operation.
    pub fn parse(self, operation: Operation, spec: &str) -> Result<Self, ConfigError> {
        Ok(self.handler(operation, spec.parse::<HandlerSpec>()?))
    }

    pub fn create(self, spec: impl Into<HandlerSpec>) -> Self {
        self.handler(Operation::Create, spec)
    }

    pub fn read(self, spec: impl Into<HandlerSpec>) -> Self {
        self.handler(Operation::Read, spec)
    }

    pub fn update(self, spec: impl Into<HandlerSpec>) -> Self {
        self.handler(Operation::Update, spec)
    }

    pub fn delete(self, spec: impl Into<HandlerSpec>) -> Self {
        self.handler(Operation::Delete, spec)
    }

    /// Layer merged under every handler, above the built-in defaults.
    pub fn defaults(mut self, defaults: impl Into<HandlerOptions>) -> Self {
        self.defaults = Some(defaults.into());
        self
    }

    /// Layer flags parsed from JSON over the current defaults.
    pub fn defaults_from_json(mut self, text: &str) -> Result<Self, ConfigError> {
        let flags = HandlerFlags::from_json(text)?;
        let defaults = self.defaults.take().unwrap_or_default().flags(flags);
        self.defaults = Some(defaults);
        Ok(self)
    }

    /// Fallback dispatcher for operations without a handler.
    pub fn sync(mut self, fallback: SharedDispatch) -> Self {
        self.sync = Some(fallback);
        self
    }

    pub fn has_sync(&self) -> bool {
        self.sync.is_some()
    }

    /// The raw spec for `operation`, as configured.
    pub fn spec(&self, operation: Operation) -> Option<&HandlerSpec> {
        self.specs[operation.index()].as_ref()
    }

    pub(crate) fn defaults_layer(&self) -> Option<&HandlerOptions> {
        self.defaults.as_ref()
    }

    pub(crate) fn take_sync(&mut self) -> Option<SharedDispatch> {
        self.sync.take()
    }
}

impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("specs", &self.specs)
            .field("defaults", &self.defaults)
            .field("sync", &self.sync.is_some())
            .finish()
    }
}

/// Register handler modules with a config using the convention pattern.
///
/// Each handler module must export:
/// - `OPERATION: Operation`, the operation it serves
/// - `handle(Invocation) -> Result<Completion, BoxError>`, the action
///
/// # Example
/// ```ignore
/// let config = crud_sync::register_handlers!(
///     SyncConfig::new(),
///     handlers::create_todo,
///     handlers::fetch_todo,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($config:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $config
        $(
            .action(
                $($seg)::+::OPERATION,
                $($seg)::+::handle,
            )
        )+
    };
}
