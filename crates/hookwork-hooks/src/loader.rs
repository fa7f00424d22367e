//! Hook loader — builds hooks from definitions and loads them for one
//! environment.
//!
//! Hooks load in declaration order. The first failure aborts the run; hooks
//! loaded before it stay in the registry.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use hookwork_core::definition::HookDefinition;
use hookwork_core::error::AppError;
use hookwork_core::types::environment::Environment;

use crate::hook::{Hook, LoadStatus};
use crate::initializer::{HookInitializer, NoopInitializer};
use crate::registry::LoadedHookRegistry;

/// Summary of one [`HookLoader::load_all`] run.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Environment the hooks were loaded for.
    pub environment: Environment,
    /// Hooks whose initializer completed, in load order.
    pub initialized: Vec<String>,
    /// Hooks disabled for the environment, in load order.
    pub skipped: Vec<String>,
}

impl LoadReport {
    fn new(environment: Environment) -> Self {
        Self {
            environment,
            initialized: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Total number of hooks processed.
    pub fn total(&self) -> usize {
        self.initialized.len() + self.skipped.len()
    }
}

/// Loads hook definitions with their registered initializers.
#[derive(Debug)]
pub struct HookLoader {
    /// Hook name → initializer.
    initializers: HashMap<String, Arc<dyn HookInitializer>>,
    /// Used for hooks without a registered initializer.
    fallback: Arc<dyn HookInitializer>,
    /// Upper bound for a single hook's load.
    timeout: Option<Duration>,
    /// Hooks loaded so far.
    registry: Arc<LoadedHookRegistry>,
}

impl HookLoader {
    /// Creates a loader with no initializers and no timeout.
    pub fn new() -> Self {
        Self {
            initializers: HashMap::new(),
            fallback: Arc::new(NoopInitializer),
            timeout: None,
            registry: Arc::new(LoadedHookRegistry::new()),
        }
    }

    /// Bounds each hook's load by `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Registers the initializer for hooks named `name`.
    pub fn register_initializer(
        &mut self,
        name: impl Into<String>,
        initializer: Arc<dyn HookInitializer>,
    ) -> Result<(), AppError> {
        let name = name.into();
        if self.initializers.contains_key(&name) {
            return Err(AppError::conflict(format!(
                "Initializer for hook '{name}' is already registered"
            )));
        }
        self.initializers.insert(name, initializer);
        Ok(())
    }

    /// Returns the registry of loaded hooks.
    pub fn registry(&self) -> &Arc<LoadedHookRegistry> {
        &self.registry
    }

    /// Builds and loads every definition for `environment`.
    pub async fn load_all(
        &self,
        definitions: Vec<HookDefinition>,
        environment: &Environment,
    ) -> Result<LoadReport, AppError> {
        self.check_definitions(&definitions).await?;

        info!(
            environment = %environment,
            hooks = definitions.len(),
            "Loading hooks"
        );

        let mut report = LoadReport::new(environment.clone());

        for definition in definitions {
            let name = definition.name.clone();
            let initializer = self.initializer_for(&name);
            let hook = Hook::with_defaults(initializer.defaults(), definition);

            let loaded = match self.timeout {
                Some(limit) => {
                    match tokio::time::timeout(limit, hook.load(environment, initializer.as_ref()))
                        .await
                    {
                        Ok(result) => result,
                        Err(_) => {
                            error!(
                                hook = %name,
                                timeout = ?limit,
                                "Hook initialization timed out"
                            );
                            return Err(AppError::timeout(format!(
                                "Hook '{name}' did not initialize within {limit:?}"
                            )));
                        }
                    }
                }
                None => hook.load(environment, initializer.as_ref()).await,
            };

            let loaded = loaded.map_err(|e| {
                error!(hook = %name, error = %e, "Hook initialization failed");
                AppError::hook(format!("Hook '{name}' failed to initialize: {}", e.message))
                    .caused_by(e)
            })?;

            match loaded.status {
                LoadStatus::Initialized => report.initialized.push(name),
                LoadStatus::Skipped => report.skipped.push(name),
            }
            self.registry.insert(loaded).await?;
        }

        info!(
            environment = %environment,
            initialized = report.initialized.len(),
            skipped = report.skipped.len(),
            "Hooks loaded"
        );

        Ok(report)
    }

    fn initializer_for(&self, name: &str) -> Arc<dyn HookInitializer> {
        self.initializers
            .get(name)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }

    async fn check_definitions(&self, definitions: &[HookDefinition]) -> Result<(), AppError> {
        let mut seen = HashSet::new();

        for definition in definitions {
            definition.check()?;

            if !seen.insert(definition.name.as_str()) {
                return Err(AppError::conflict(format!(
                    "Hook '{}' is defined more than once",
                    definition.name
                )));
            }
            if self.registry.contains(&definition.name).await {
                return Err(AppError::conflict(format!(
                    "Hook '{}' is already loaded",
                    definition.name
                )));
            }
        }

        for name in self.initializers.keys() {
            if !seen.contains(name.as_str()) {
                warn!(hook = %name, "Initializer registered for a hook with no definition");
            }
        }

        Ok(())
    }
}

impl Default for HookLoader {
    fn default() -> Self {
        Self::new()
    }
}
