//! Runtime environment name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A named deployment context, e.g. `development` or `production`.
///
/// Hooks list the environments they are active in; the loader passes the
/// active environment to every hook explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment(String);

impl Environment {
    /// Name of the default environment.
    pub const DEVELOPMENT: &'static str = "development";

    /// Creates an environment from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the environment name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether this environment appears in `names`.
    pub fn is_listed_in(&self, names: &[String]) -> bool {
        names.iter().any(|name| name == &self.0)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(Self::DEVELOPMENT)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Environment {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl FromStr for Environment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(AppError::validation("Environment name must not be empty"));
        }
        Ok(Self::new(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_development() {
        assert_eq!(Environment::default().as_str(), "development");
    }

    #[test]
    fn test_is_listed_in() {
        let env = Environment::new("staging");
        let listed = vec!["production".to_string(), "staging".to_string()];
        assert!(env.is_listed_in(&listed));
        assert!(!Environment::new("test").is_listed_in(&listed));
    }

    #[test]
    fn test_from_str_rejects_blank() {
        assert!(" ".parse::<Environment>().is_err());
        let env: Environment = " production ".parse().expect("should parse");
        assert_eq!(env.as_str(), "production");
    }
}
