//! Loaded hook registry — stores hooks that completed loading.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::info;

use hookwork_core::error::AppError;

use crate::hook::{LoadStatus, LoadedHook};

/// Registry of loaded hooks keyed by name.
#[derive(Debug, Default)]
pub struct LoadedHookRegistry {
    /// Hook name → loaded hook.
    hooks: RwLock<HashMap<String, LoadedHook>>,
}

impl LoadedHookRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a loaded hook. A name can only be recorded once.
    pub async fn insert(&self, loaded: LoadedHook) -> Result<(), AppError> {
        let mut hooks = self.hooks.write().await;
        let name = loaded.name().to_string();

        if hooks.contains_key(&name) {
            return Err(AppError::conflict(format!(
                "Hook '{name}' is already loaded"
            )));
        }

        info!(hook = %name, status = %loaded.status, "Registering loaded hook");
        hooks.insert(name, loaded);

        Ok(())
    }

    /// Gets a loaded hook by name.
    pub async fn get(&self, name: &str) -> Option<LoadedHook> {
        let hooks = self.hooks.read().await;
        hooks.get(name).cloned()
    }

    /// Gets a loaded hook by name, failing if it is unknown.
    pub async fn require(&self, name: &str) -> Result<LoadedHook, AppError> {
        self.get(name)
            .await
            .ok_or_else(|| AppError::not_found(format!("Hook '{name}' is not loaded")))
    }

    /// Lists all loaded hooks sorted by name.
    pub async fn list(&self) -> Vec<LoadedHook> {
        let hooks = self.hooks.read().await;
        let mut all: Vec<LoadedHook> = hooks.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }

    /// Lists hooks whose initializer ran, sorted by name.
    pub async fn initialized(&self) -> Vec<LoadedHook> {
        self.list()
            .await
            .into_iter()
            .filter(|loaded| loaded.status == LoadStatus::Initialized)
            .collect()
    }

    /// Returns the number of loaded hooks.
    pub async fn count(&self) -> usize {
        let hooks = self.hooks.read().await;
        hooks.len()
    }

    /// Checks whether a hook is loaded.
    pub async fn contains(&self, name: &str) -> bool {
        let hooks = self.hooks.read().await;
        hooks.contains_key(name)
    }
}
