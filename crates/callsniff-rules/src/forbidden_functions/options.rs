//! Reads sniff options from a [`RuleConfig`].

use callsniff_core::RuleConfig;
use thiserror::Error;
use tracing::{debug, warn};

use super::{ForbiddenFunctionsBuilder, FunctionRule};

const KNOWN_OPTIONS: &[&str] = &["functions", "pattern_match", "error"];

/// Errors in the `forbidden-functions` options.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    /// An option has the wrong type.
    #[error("Option `{key}` must be {expected}")]
    InvalidOption {
        /// Option name.
        key: String,
        /// Expected type.
        expected: &'static str,
    },

    /// A function's alternative is neither a string nor `false`.
    #[error("Alternative for `{name}` must be a string or false, found {found}")]
    InvalidAlternative {
        /// Function name or pattern.
        name: String,
        /// TOML type found instead.
        found: &'static str,
    },
}

impl ForbiddenFunctionsBuilder {
    /// Applies options from a `[rules.forbidden-functions]` table.
    ///
    /// A `functions` table replaces the configured list. A `severity`
    /// override takes precedence over the `error` flag.
    ///
    /// # Errors
    ///
    /// Returns an error if an option has the wrong type.
    pub fn apply_config(mut self, config: &RuleConfig) -> Result<Self, OptionsError> {
        for key in config.options.keys() {
            if !KNOWN_OPTIONS.contains(&key.as_str()) {
                warn!("Unknown forbidden-functions option: {}", key);
            }
        }

        if let Some(value) = config.options.get("functions") {
            let table = value.as_table().ok_or_else(|| OptionsError::InvalidOption {
                key: "functions".to_string(),
                expected: "a table",
            })?;
            let rules = table
                .iter()
                .map(|(name, alternative)| parse_rule(name, alternative))
                .collect::<Result<Vec<_>, _>>()?;
            debug!("Configured {} forbidden function(s)", rules.len());
            self = self.rules(rules);
        }

        if let Some(value) = config.options.get("pattern_match") {
            let enabled = value.as_bool().ok_or_else(|| OptionsError::InvalidOption {
                key: "pattern_match".to_string(),
                expected: "a boolean",
            })?;
            self = self.pattern_match(enabled);
        }

        if let Some(value) = config.options.get("error") {
            let error = value.as_bool().ok_or_else(|| OptionsError::InvalidOption {
                key: "error".to_string(),
                expected: "a boolean",
            })?;
            self = self.error(error);
        }

        if let Some(severity) = config.severity {
            self = self.severity(severity);
        }

        Ok(self)
    }
}

fn parse_rule(name: &str, alternative: &toml::Value) -> Result<FunctionRule, OptionsError> {
    match alternative {
        toml::Value::String(text) => Ok(FunctionRule::new(name).with_alternative(text.as_str())),
        toml::Value::Boolean(false) => Ok(FunctionRule::new(name)),
        other => Err(OptionsError::InvalidAlternative {
            name: name.to_string(),
            found: other.type_str(),
        }),
    }
}
