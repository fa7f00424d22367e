//! The hook itself: merged configuration plus the environment gate.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::{debug, info};

use hookwork_core::definition::{HookDefinition, HookSettings};
use hookwork_core::result::AppResult;
use hookwork_core::types::environment::Environment;

use crate::initializer::HookInitializer;

/// One extension unit, built from a [`HookDefinition`].
///
/// Configuration is merged once at construction and never mutated after.
/// [`load`](Self::load) consumes the hook, so each instance is loaded at
/// most once.
#[derive(Debug, Clone, PartialEq)]
pub struct Hook {
    /// Hook name.
    name: String,
    /// Option defaults supplied by the specialization or the definition.
    defaults: Map<String, Value>,
    /// Effective configuration. `environments` is always present.
    config: HookSettings,
    /// Definition fields without a dedicated slot.
    extra: Map<String, Value>,
}

impl Hook {
    /// Builds a hook with no specialization defaults.
    pub fn new(definition: HookDefinition) -> Self {
        Self::with_defaults(Map::new(), definition)
    }

    /// Builds a hook starting from a specialization's `defaults`.
    ///
    /// The definition's `config` is merged over `{ environments: [] }` and
    /// then the definition's own fields are laid over the hook: a
    /// `defaults` field replaces `defaults` in full, and everything else
    /// lands in [`extra`](Self::extra).
    pub fn with_defaults(defaults: Map<String, Value>, definition: HookDefinition) -> Self {
        let HookDefinition {
            name,
            config,
            defaults: defaults_override,
            extra,
        } = definition;

        let mut settings = HookSettings::default();
        if let Some(config) = config {
            settings.environments = config.environments;
            settings.options.extend(config.options);
        }

        Self {
            name,
            defaults: defaults_override.unwrap_or(defaults),
            config: settings,
            extra,
        }
    }

    /// Returns the hook name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the hook defaults.
    pub fn defaults(&self) -> &Map<String, Value> {
        &self.defaults
    }

    /// Returns the effective configuration.
    pub fn config(&self) -> &HookSettings {
        &self.config
    }

    /// Returns the environments the hook is restricted to.
    pub fn environments(&self) -> &[String] {
        &self.config.environments
    }

    /// Returns extra definition fields.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Resolves an option from the configuration, falling back to defaults.
    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.config.option(key).or_else(|| self.defaults.get(key))
    }

    /// Returns whether the hook runs in `environment`.
    pub fn is_enabled_for(&self, environment: &Environment) -> bool {
        self.config.allows(environment)
    }

    /// Loads the hook for `environment`.
    ///
    /// A hook restricted to other environments completes as
    /// [`LoadStatus::Skipped`] without touching `initializer`. Otherwise the
    /// initializer runs and its error, if any, is returned unchanged.
    pub async fn load(
        self,
        environment: &Environment,
        initializer: &dyn HookInitializer,
    ) -> AppResult<LoadedHook> {
        if !self.is_enabled_for(environment) {
            debug!(
                hook = %self.name,
                environment = %environment,
                environments = ?self.config.environments,
                "Hook disabled for environment, skipping"
            );
            return Ok(LoadedHook::new(self, LoadStatus::Skipped));
        }

        initializer.initialize(&self).await?;

        info!(hook = %self.name, environment = %environment, "Hook initialized");

        Ok(LoadedHook::new(self, LoadStatus::Initialized))
    }
}

/// How a hook finished loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The hook is disabled for the active environment.
    Skipped,
    /// The initializer completed successfully.
    Initialized,
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => write!(f, "skipped"),
            Self::Initialized => write!(f, "initialized"),
        }
    }
}

/// A hook that has completed loading.
#[derive(Debug, Clone)]
pub struct LoadedHook {
    /// The hook.
    pub hook: Hook,
    /// Load outcome.
    pub status: LoadStatus,
    /// When loading completed.
    pub loaded_at: DateTime<Utc>,
}

impl LoadedHook {
    fn new(hook: Hook, status: LoadStatus) -> Self {
        Self {
            hook,
            status,
            loaded_at: Utc::now(),
        }
    }

    /// Returns the hook name.
    pub fn name(&self) -> &str {
        self.hook.name()
    }
}
