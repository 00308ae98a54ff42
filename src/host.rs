//! Installation onto host model types.
//!
//! A [`ModelType`] stands for a model class of the host framework: a name
//! and the sync method its instances dispatch through. It starts out with
//! the framework's default sync.

use std::fmt;
use std::sync::Arc;

use crate::action::Completion;
use crate::config::SyncConfig;
use crate::dispatch::{Dispatch, Dispatcher, SharedDispatch};
use crate::error::{ConfigError, SyncError};
use crate::model::SyncModel;
use crate::operation::Operation;
use crate::options::RequestOptions;

/// A host model type and its current sync method.
#[derive(Clone)]
pub struct ModelType {
    name: String,
    framework_default: SharedDispatch,
    sync: SharedDispatch,
}

impl ModelType {
    /// A model type whose sync method is the framework default.
    pub fn new(name: impl Into<String>, framework_default: SharedDispatch) -> Self {
        Self {
            name: name.into(),
            sync: Arc::clone(&framework_default),
            framework_default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sync method instances of this type dispatch through.
    pub fn sync_method(&self) -> &SharedDispatch {
        &self.sync
    }

    /// Replace the sync method directly.
    pub fn set_sync(&mut self, sync: SharedDispatch) {
        self.sync = sync;
    }

    /// Dispatch through this type's sync method.
    pub fn sync(
        &self,
        operation: Operation,
        model: &dyn SyncModel,
        options: RequestOptions,
    ) -> Result<Completion, SyncError> {
        self.sync.dispatch(operation, model, options)
    }

    /// Attach in place: the current sync method becomes the config's `sync`
    /// fallback (unless the config brings its own), then the built
    /// dispatcher replaces it.
    pub fn attach(&mut self, mut config: SyncConfig) -> Result<(), ConfigError> {
        if !config.has_sync() {
            config = config.sync(Arc::clone(&self.sync));
        }
        let dispatcher = Dispatcher::build(config, Arc::clone(&self.framework_default))?;
        tracing::debug!(
            target: "crud_sync::host",
            model_type = %self.name,
            handlers = ?dispatcher.table().operations(),
            "attached sync dispatcher"
        );
        self.sync = Arc::new(dispatcher);
        Ok(())
    }

    /// Clone this type under `name` and attach to the clone. `self` is untouched.
    pub fn extend(&self, name: impl Into<String>, config: SyncConfig) -> Result<ModelType, ConfigError> {
        let mut derived = ModelType {
            name: name.into(),
            ..self.clone()
        };
        derived.attach(config)?;
        Ok(derived)
    }
}

impl fmt::Debug for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelType")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
