//! Turns a [`SyncConfig`] into a [`HandlerTable`].
//!
//! Passes, in order:
//!
//! 1. alias and marker resolution: `UseDefault` and missing keys become
//!    absent, an alias is looked up in the *unresolved* config, and an alias
//!    to another alias is rejected;
//! 2. callable coercion: bare actions were already wrapped into
//!    [`HandlerOptions`] by [`HandlerSpec`]'s constructors, so every slot
//!    left holds a record keyed by its own operation;
//! 3. default layering: built-in flags ← config `defaults` ← the handler's
//!    own fields. A record still lacking an action is rejected here.

use std::sync::Arc;

use super::flags::HandlerFlags;
use super::spec::{HandlerOptions, HandlerSpec};
use super::table::{HandlerTable, NormalizedHandler};
use crate::config::SyncConfig;
use crate::error::ConfigError;
use crate::operation::Operation;

/// Where a resolved slot gets its handler from.
#[derive(Clone, Copy)]
enum Source<'a> {
    Absent,
    /// Fields written under this operation.
    Own(&'a HandlerOptions),
    /// Shares the handler of another operation.
    Shared(Operation),
}

/// Normalize a config into an immutable handler table.
pub fn normalize(config: &SyncConfig) -> Result<HandlerTable, ConfigError> {
    let sources = resolve_aliases(config)?;

    let base = HandlerOptions::from(HandlerFlags::BUILTIN);
    let base = match config.defaults_layer() {
        Some(defaults) => base.layer(defaults),
        None => base,
    };

    let mut slots: [Option<Arc<NormalizedHandler>>; 4] = Default::default();
    for op in Operation::ALL {
        if let Source::Own(options) = sources[op.index()] {
            slots[op.index()] = Some(Arc::new(finish(op, &base.layer(options))?));
        }
    }
    for op in Operation::ALL {
        if let Source::Shared(target) = sources[op.index()] {
            slots[op.index()] = slots[target.index()].clone();
        }
    }

    let table = HandlerTable::from_slots(slots);
    tracing::debug!(
        target: "crud_sync::handler",
        handlers = table.len(),
        operations = ?table.operations(),
        "normalized handler table"
    );
    Ok(table)
}

fn resolve_aliases(config: &SyncConfig) -> Result<[Source<'_>; 4], ConfigError> {
    let mut sources = [Source::Absent; 4];
    for op in Operation::ALL {
        sources[op.index()] = match config.spec(op) {
            None | Some(HandlerSpec::UseDefault) => Source::Absent,
            Some(HandlerSpec::Direct(options)) => Source::Own(options),
            Some(HandlerSpec::Alias(target)) => match config.spec(*target) {
                Some(HandlerSpec::Direct(_)) => Source::Shared(*target),
                None | Some(HandlerSpec::UseDefault) => Source::Absent,
                Some(HandlerSpec::Alias(_)) => {
                    return Err(ConfigError::ChainedAlias {
                        operation: op,
                        target: *target,
                    })
                }
            },
        };
    }
    Ok(sources)
}

fn finish(op: Operation, merged: &HandlerOptions) -> Result<NormalizedHandler, ConfigError> {
    let action = merged
        .action
        .clone()
        .ok_or(ConfigError::MissingAction(op))?;
    let flags = merged.flags;
    Ok(NormalizedHandler {
        action,
        build: merged.build.clone(),
        expand_arguments: flags.expand_arguments.unwrap_or(false),
        returns_promise: flags.returns_promise.unwrap_or(false),
        add_options: flags.add_options.unwrap_or(true),
    })
}
