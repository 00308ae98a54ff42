//! Dispatcher: the dispatch function produced from a [`SyncConfig`].
//!
//! `Dispatcher::build` normalizes the config once and captures the fallback.
//! Each `dispatch` call then either serves the operation with its handler
//! (request building, then invocation) or passes the call through untouched
//! to the fallback, or to the host framework's default when no fallback was
//! configured.
//!
//! ## Example
//!
//! ```ignore
//! use crud_sync::{dispatch, Dispatch, Dispatcher, Operation, RequestOptions, SyncConfig};
//!
//! let dispatcher = Dispatcher::build(
//!     SyncConfig::new().action(Operation::Create, |inv| save(inv.value())),
//!     dispatch::unhandled(),
//! )?;
//!
//! dispatcher.dispatch(Operation::Create, &todo, RequestOptions::new().on_success(done))?;
//! ```

mod invoke;
mod request;

use std::fmt;
use std::sync::Arc;

use crate::action::Completion;
use crate::config::SyncConfig;
use crate::error::{ConfigError, SyncError};
use crate::handler::{normalize, HandlerTable};
use crate::model::SyncModel;
use crate::operation::Operation;
use crate::options::RequestOptions;

/// Anything that can serve `(operation, model, options)`: a built
/// [`Dispatcher`], a fallback, or the host framework's default.
pub trait Dispatch: Send + Sync {
    fn dispatch(
        &self,
        operation: Operation,
        model: &dyn SyncModel,
        options: RequestOptions,
    ) -> Result<Completion, SyncError>;
}

impl<F> Dispatch for F
where
    F: Fn(Operation, &dyn SyncModel, RequestOptions) -> Result<Completion, SyncError> + Send + Sync,
{
    fn dispatch(
        &self,
        operation: Operation,
        model: &dyn SyncModel,
        options: RequestOptions,
    ) -> Result<Completion, SyncError> {
        self(operation, model, options)
    }
}

/// A dispatcher shared between model types and configs.
pub type SharedDispatch = Arc<dyn Dispatch>;

/// Share a closure as a dispatcher.
pub fn from_fn<F>(f: F) -> SharedDispatch
where
    F: Fn(Operation, &dyn SyncModel, RequestOptions) -> Result<Completion, SyncError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// A framework default that serves nothing: every call is `SyncError::Unhandled`.
pub fn unhandled() -> SharedDispatch {
    from_fn(|operation, _, _| Err(SyncError::Unhandled { operation }))
}

/// The dispatch function built from a config.
pub struct Dispatcher {
    table: HandlerTable,
    fallback: Option<SharedDispatch>,
    framework_default: SharedDispatch,
}

impl Dispatcher {
    /// Normalize `config` and capture its `sync` fallback.
    ///
    /// `framework_default` serves operations without a handler when the
    /// config has no `sync` of its own.
    pub fn build(
        mut config: SyncConfig,
        framework_default: SharedDispatch,
    ) -> Result<Self, ConfigError> {
        let table = normalize(&config)?;
        let fallback = config.take_sync();
        tracing::debug!(
            target: "crud_sync::dispatch",
            handlers = table.len(),
            fallback = fallback.is_some(),
            "built dispatcher"
        );
        Ok(Self {
            table,
            fallback,
            framework_default,
        })
    }

    pub fn table(&self) -> &HandlerTable {
        &self.table
    }

    /// Whether `operation` is served by a handler rather than passed through.
    pub fn handles(&self, operation: Operation) -> bool {
        self.table.contains(operation)
    }

    fn pass_through(&self) -> &SharedDispatch {
        self.fallback.as_ref().unwrap_or(&self.framework_default)
    }
}

impl Dispatch for Dispatcher {
    fn dispatch(
        &self,
        operation: Operation,
        model: &dyn SyncModel,
        options: RequestOptions,
    ) -> Result<Completion, SyncError> {
        let Some(handler) = self.table.get(operation) else {
            tracing::debug!(
                target: "crud_sync::dispatch",
                %operation,
                fallback = self.fallback.is_some(),
                "no handler, passing through"
            );
            return self.pass_through().dispatch(operation, model, options);
        };

        tracing::debug!(
            target: "crud_sync::dispatch",
            %operation,
            expand_arguments = handler.expand_arguments,
            returns_promise = handler.returns_promise,
            add_options = handler.add_options,
            "dispatching to handler"
        );
        let payload = request::build_payload(operation, handler, model, &options)?;
        invoke::invoke(operation, handler, payload, options)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("table", &self.table)
            .field("fallback", &self.fallback.is_some())
            .finish_non_exhaustive()
    }
}
