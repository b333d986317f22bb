//! Configuration for the step runtime
//!
//! Defaults cover the usual entity form. Environment variables override them.

use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

use crate::StepsError;

/// Step runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepsConfig {
    /// Form operations steps apply to
    #[serde(default = "default_operations")]
    pub operations: Vec<String>,

    /// Layout format type that marks a group as a step
    #[serde(default = "default_format_type")]
    pub format_type: String,

    /// Flag forms with existing step state as holding unsaved values
    #[serde(default = "default_mark_unsaved")]
    pub mark_unsaved: bool,

    /// Log level for the formsteps crates, see [`StepsConfig::log_filter`]
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

const LOG_TARGETS: [&str; 3] = ["formsteps_core", "formsteps_dsl", "formsteps_state_inmemory"];

fn default_operations() -> Vec<String> {
    vec!["default".to_string(), "edit".to_string()]
}

fn default_format_type() -> String {
    "steps".to_string()
}

fn default_mark_unsaved() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for StepsConfig {
    fn default() -> Self {
        Self {
            operations: default_operations(),
            format_type: default_format_type(),
            mark_unsaved: default_mark_unsaved(),
            log_level: default_log_level(),
        }
    }
}

impl StepsConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Ok(operations) = env::var("FORMSTEPS_OPERATIONS") {
            let parsed: Vec<String> = operations
                .split(',')
                .map(|op| op.trim().to_string())
                .filter(|op| !op.is_empty())
                .collect();
            if parsed.is_empty() {
                warn!("Invalid FORMSTEPS_OPERATIONS value: {:?}", operations);
            } else {
                config.operations = parsed;
            }
        }

        if let Ok(format_type) = env::var("FORMSTEPS_FORMAT_TYPE") {
            config.format_type = format_type;
        }

        if let Ok(mark_unsaved) = env::var("FORMSTEPS_MARK_UNSAVED") {
            match mark_unsaved.parse::<bool>() {
                Ok(value) => config.mark_unsaved = value,
                Err(_) => warn!("Invalid FORMSTEPS_MARK_UNSAVED value: {}", mark_unsaved),
            }
        }

        if let Ok(log_level) = env::var("FORMSTEPS_LOG_LEVEL") {
            let level = log_level.trim().to_ascii_lowercase();
            if LOG_LEVELS.contains(&level.as_str()) {
                config.log_level = level;
            } else {
                warn!("Invalid FORMSTEPS_LOG_LEVEL value: {}", log_level);
            }
        }

        config
    }

    /// Parse configuration from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, StepsError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Filter directive applying `log_level` to the formsteps crates
    pub fn log_filter(&self) -> String {
        LOG_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, self.log_level))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Whether steps apply to a form operation
    pub fn applies_to(&self, operation: &str) -> bool {
        self.operations.iter().any(|op| op == operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StepsConfig::default();
        assert!(config.applies_to("default"));
        assert!(config.applies_to("edit"));
        assert!(!config.applies_to("delete"));
        assert_eq!(config.format_type, "steps");
        assert!(config.mark_unsaved);
    }

    #[test]
    fn test_from_yaml_fills_defaults() {
        let config = StepsConfig::from_yaml("operations: [register]\n").unwrap();
        assert_eq!(config.operations, vec!["register".to_string()]);
        assert_eq!(config.format_type, "steps");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_from_yaml_rejects_bad_types() {
        let err = StepsConfig::from_yaml("mark_unsaved: [1, 2]\n").unwrap_err();
        assert!(matches!(err, StepsError::ConfigurationError(_)));
    }

    #[test]
    fn test_load_from_env() {
        env::set_var("FORMSTEPS_OPERATIONS", "edit, register ,");
        env::set_var("FORMSTEPS_MARK_UNSAVED", "nope");
        env::set_var("FORMSTEPS_LOG_LEVEL", "LOUD");
        let config = StepsConfig::load();
        env::remove_var("FORMSTEPS_OPERATIONS");
        env::remove_var("FORMSTEPS_MARK_UNSAVED");
        env::remove_var("FORMSTEPS_LOG_LEVEL");

        assert_eq!(config.operations, vec!["edit".to_string(), "register".to_string()]);
        assert!(config.mark_unsaved);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_log_filter_covers_every_crate() {
        let mut config = StepsConfig::default();
        assert_eq!(
            config.log_filter(),
            "formsteps_core=info,formsteps_dsl=info,formsteps_state_inmemory=info"
        );

        config.log_level = "trace".to_string();
        assert!(config.log_filter().split(',').all(|d| d.ends_with("=trace")));
    }
}
