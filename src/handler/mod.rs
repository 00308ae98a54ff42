//! Handler configuration: raw specs, flags, and normalization into a table.
//!
//! A handler can be configured four ways:
//!
//! ```ignore
//! SyncConfig::new()
//!     .action(Operation::Create, create_todo)            // bare action
//!     .update(Operation::Create)                         // alias
//!     .delete(HandlerSpec::UseDefault)                   // "default" marker
//!     .read(HandlerOptions::new()                        // full record
//!         .action(fetch_todo)
//!         .build(|_, model, _| Ok(model.to_json()?["id"].clone()))
//!         .returns_promise(true))
//! ```
//!
//! and leaving an operation out means the same as `UseDefault`.

mod flags;
mod normalize;
mod spec;
mod table;

pub use flags::HandlerFlags;
pub use normalize::normalize;
pub use spec::{HandlerOptions, HandlerSpec};
pub use table::{HandlerTable, NormalizedHandler};
