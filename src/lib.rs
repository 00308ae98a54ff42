//! crud_sync: configuration-driven CRUD sync adapter.
//!
//! Configure handlers for `create`, `read`, `update` and `delete`, build a
//! [`Dispatcher`], and dispatch `(operation, model, options)` calls through
//! it. Operations without a handler pass through to a fallback.
//!
//! ```ignore
//! use crud_sync::{dispatch, HandlerOptions, ModelType, Operation, RequestOptions, SyncConfig};
//!
//! let mut todo = ModelType::new("Todo", dispatch::unhandled());
//! todo.attach(
//!     SyncConfig::new()
//!         .read(HandlerOptions::new().action(fetch).returns_promise(true))
//!         .action(Operation::Create, save)
//!         .update(Operation::Create),
//! )?;
//!
//! todo.sync(Operation::Read, &item, RequestOptions::new().on_success(render))?;
//! ```

mod action;
mod config;
mod deferred;
pub mod dispatch;
mod error;
mod handler;
mod host;
mod model;
mod operation;
mod options;

pub use action::{Action, BuildFn, Completion, Invocation, Payload};
pub use config::SyncConfig;
pub use deferred::{Deferred, Promise};
pub use dispatch::{Dispatch, Dispatcher, SharedDispatch};
pub use error::{BoxError, ConfigError, SyncError};
pub use handler::{
    normalize, HandlerFlags, HandlerOptions, HandlerSpec, HandlerTable, NormalizedHandler,
};
pub use host::ModelType;
pub use model::SyncModel;
pub use operation::Operation;
pub use options::{Callback, RequestOptions};
