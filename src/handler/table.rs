use std::fmt;
use std::sync::Arc;

use crate::action::{Action, BuildFn};
use crate::operation::Operation;

/// A fully resolved handler: every layer merged, no alias or marker left.
#[derive(Clone)]
pub struct NormalizedHandler {
    pub action: Action,
    pub build: Option<BuildFn>,
    pub expand_arguments: bool,
    pub returns_promise: bool,
    pub add_options: bool,
}

impl fmt::Debug for NormalizedHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizedHandler")
            .field("build", &self.build.is_some())
            .field("expand_arguments", &self.expand_arguments)
            .field("returns_promise", &self.returns_promise)
            .field("add_options", &self.add_options)
            .finish_non_exhaustive()
    }
}

/// Operation → handler. Immutable once built; aliased operations share the
/// same `Arc`.
#[derive(Clone, Default)]
pub struct HandlerTable {
    slots: [Option<Arc<NormalizedHandler>>; 4],
}

impl HandlerTable {
    pub(crate) fn from_slots(slots: [Option<Arc<NormalizedHandler>>; 4]) -> Self {
        Self { slots }
    }

    /// The handler for `operation`, or `None` when it falls through.
    pub fn get(&self, operation: Operation) -> Option<&Arc<NormalizedHandler>> {
        self.slots[operation.index()].as_ref()
    }

    pub fn contains(&self, operation: Operation) -> bool {
        self.get(operation).is_some()
    }

    /// Operations that have a handler, in canonical order.
    pub fn operations(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| self.contains(*op))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                Operation::ALL
                    .into_iter()
                    .filter_map(|op| self.get(op).map(|handler| (op, handler))),
            )
            .finish()
    }
}
