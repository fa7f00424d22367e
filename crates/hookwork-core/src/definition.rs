//! Declarative hook definitions.
//!
//! A [`HookDefinition`] is what the framework reads from configuration for
//! every hook it knows about. It carries the hook's [`HookSettings`], an
//! optional replacement for the hook's defaults and any additional
//! fields, which the hook keeps as untyped `extra` data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::environment::Environment;

/// Field names with a dedicated slot on [`HookDefinition`].
const RESERVED_FIELDS: [&str; 3] = ["name", "config", "defaults"];

/// Settings key holding the environment list.
const ENVIRONMENTS_KEY: &str = "environments";

/// Per-hook configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct HookSettings {
    /// Environments the hook is active in. Empty means every environment.
    #[serde(default)]
    #[validate(custom(function = "validate_environment_names"))]
    pub environments: Vec<String>,
    /// All other configuration keys.
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl HookSettings {
    /// Restricts the hook to the given environments.
    pub fn with_environments<I, S>(mut self, environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environments = environments.into_iter().map(Into::into).collect();
        self
    }

    /// Sets a single option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Returns an option value by key.
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// Returns whether the hook may run in `environment`.
    ///
    /// An empty environment list places no restriction on the hook.
    pub fn allows(&self, environment: &Environment) -> bool {
        self.environments.is_empty() || environment.is_listed_in(&self.environments)
    }
}

/// Declarative description of a hook supplied at framework-load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct HookDefinition {
    /// Unique hook name.
    #[validate(length(min = 1, message = "hook name must not be empty"))]
    pub name: String,
    /// Hook configuration. Absent means `{ environments: [] }`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub config: Option<HookSettings>,
    /// Replaces the hook's own defaults in full when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Map<String, Value>>,
    /// Remaining definition fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HookDefinition {
    /// Creates a definition with no configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: None,
            defaults: None,
            extra: Map::new(),
        }
    }

    /// Starts building a definition.
    pub fn builder(name: impl Into<String>) -> HookDefinitionBuilder {
        HookDefinitionBuilder::new(name)
    }

    /// Parses and validates a definition from a JSON value.
    pub fn from_json(value: Value) -> AppResult<Self> {
        let definition: Self = serde_json::from_value(value)?;
        definition.check()?;
        Ok(definition)
    }

    /// Validates field contents.
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        if self
            .config
            .as_ref()
            .is_some_and(|config| config.options.contains_key(ENVIRONMENTS_KEY))
        {
            return Err(AppError::validation(format!(
                "Option '{ENVIRONMENTS_KEY}' of hook '{}' must be set through the environment list",
                self.name
            )));
        }
        Ok(())
    }
}

/// Builder for [`HookDefinition`].
///
/// Configuration calls apply in order and the last write wins:
/// [`environments`](Self::environments) and [`option`](Self::option) merge
/// a single key into the current configuration, while
/// [`config`](Self::config) replaces the configuration in full.
#[derive(Debug, Clone)]
pub struct HookDefinitionBuilder {
    definition: HookDefinition,
}

impl HookDefinitionBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            definition: HookDefinition::new(name),
        }
    }

    fn settings_mut(&mut self) -> &mut HookSettings {
        self.definition.config.get_or_insert_with(HookSettings::default)
    }

    /// Merges the `environments` key into the configuration.
    pub fn environments<I, S>(mut self, environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings_mut().environments = environments.into_iter().map(Into::into).collect();
        self
    }

    /// Merges one option key into the configuration.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings_mut().options.insert(key.into(), value.into());
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, settings: HookSettings) -> Self {
        self.definition.config = Some(settings);
        self
    }

    /// Replaces the hook's defaults.
    pub fn defaults(mut self, defaults: Map<String, Value>) -> Self {
        self.definition.defaults = Some(defaults);
        self
    }

    /// Adds an extra field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.definition.extra.insert(key.into(), value.into());
        self
    }

    /// Validates and returns the definition.
    pub fn build(self) -> AppResult<HookDefinition> {
        if let Some(key) = RESERVED_FIELDS
            .iter()
            .find(|key| self.definition.extra.contains_key(**key))
        {
            return Err(AppError::validation(format!(
                "Field '{key}' of hook '{}' must be set through its dedicated builder method",
                self.definition.name
            )));
        }
        self.definition.check()?;
        Ok(self.definition)
    }
}

fn validate_environment_names(names: &[String]) -> Result<(), ValidationError> {
    if names.iter().any(|name| name.trim().is_empty()) {
        return Err(ValidationError::new("blank_environment")
            .with_message("environment names must not be blank".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_missing_config_deserializes_to_none() {
        let def = HookDefinition::from_json(json!({ "name": "orm" })).expect("parse");
        assert!(def.config.is_none());
        assert!(def.extra.is_empty());
    }

    #[test]
    fn test_environments_and_options_are_split() {
        let def = HookDefinition::from_json(json!({
            "name": "orm",
            "config": { "environments": ["development", "test"], "pool_size": 4 },
            "description": "ORM bindings",
        }))
        .expect("parse");

        let config = def.config.expect("config");
        assert_eq!(config.environments, vec!["development", "test"]);
        assert_eq!(config.option("pool_size"), Some(&json!(4)));
        assert_eq!(def.extra.get("description"), Some(&json!("ORM bindings")));
    }

    #[test]
    fn test_config_without_environments_defaults_to_empty() {
        let def = HookDefinition::from_json(json!({
            "name": "cache",
            "config": { "ttl": 60 },
        }))
        .expect("parse");
        assert!(def.config.expect("config").environments.is_empty());
    }

    #[test]
    fn test_non_string_environment_is_rejected() {
        let err = HookDefinition::from_json(json!({
            "name": "orm",
            "config": { "environments": [1, 2] },
        }))
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);
    }

    #[test]
    fn test_non_mapping_config_is_rejected() {
        let err = HookDefinition::from_json(json!({ "name": "orm", "config": "yes" })).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);
    }

    #[test]
    fn test_empty_name_fails_validation() {
        let err = HookDefinition::builder("").build().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_blank_environment_fails_validation() {
        let err = HookDefinition::builder("orm")
            .environments(["production", "  "])
            .build()
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_builder_config_replaces_merged_keys() {
        let def = HookDefinition::builder("orm")
            .environments(["development"])
            .option("pool_size", 4)
            .config(HookSettings::default().with_option("ssl", true))
            .build()
            .expect("build");

        let config = def.config.expect("config");
        assert!(config.environments.is_empty());
        assert_eq!(config.options.len(), 1);
        assert_eq!(config.option("ssl"), Some(&json!(true)));
    }

    #[test]
    fn test_builder_merges_after_replace() {
        let def = HookDefinition::builder("orm")
            .config(HookSettings::default().with_option("ssl", true))
            .environments(["production"])
            .build()
            .expect("build");

        let config = def.config.expect("config");
        assert_eq!(config.environments, vec!["production"]);
        assert_eq!(config.option("ssl"), Some(&json!(true)));
    }

    #[test]
    fn test_environments_option_is_rejected() {
        let err = HookDefinition::builder("orm")
            .option("environments", json!(["production"]))
            .build()
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = HookDefinition::builder("orm")
            .config(HookSettings::default().with_option("environments", json!(["production"])))
            .build()
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_builder_rejects_reserved_field() {
        let err = HookDefinition::builder("orm")
            .field("config", json!({}))
            .build()
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_settings_allows() {
        let open = HookSettings::default();
        assert!(open.allows(&Environment::new("anything")));

        let restricted = HookSettings::default().with_environments(["production"]);
        assert!(restricted.allows(&Environment::new("production")));
        assert!(!restricted.allows(&Environment::new("development")));
    }
}
