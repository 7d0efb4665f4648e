//! Builds a runner from configuration.

use callsniff_core::{Config, ConfigError, Runner, RunnerError};
use callsniff_rules::forbidden_functions::NAME as FORBIDDEN_FUNCTIONS;
use callsniff_rules::{OptionsError, Preset};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while setting up a runner.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The configuration text is not valid TOML.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The configured preset does not exist.
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// A sniff option is invalid.
    #[error("Invalid options for {sniff}: {source}")]
    Options {
        /// Sniff whose options are invalid.
        sniff: &'static str,
        /// Underlying error.
        source: OptionsError,
    },

    /// The runner could not be built.
    #[error(transparent)]
    Runner(#[from] RunnerError),
}

/// Parses TOML configuration text and builds a runner from it.
///
/// # Errors
///
/// Returns an error if the text does not parse or the configuration is
/// invalid.
pub fn runner_from_toml(content: &str) -> Result<Runner, SetupError> {
    runner_from_config(Config::parse(content)?)
}

/// Builds a runner from a parsed configuration.
///
/// The preset (default: `recommended`) provides the base sniff settings;
/// per-sniff options from `[rules.<name>]` are applied on top.
///
/// # Errors
///
/// Returns an error if the preset is unknown or a sniff option is invalid.
pub fn runner_from_config(config: Config) -> Result<Runner, SetupError> {
    let preset = match config.preset.as_deref() {
        None => Preset::Recommended,
        Some(name) => {
            Preset::from_name(name).ok_or_else(|| SetupError::UnknownPreset(name.to_string()))?
        }
    };
    debug!("Using preset {:?}", preset);

    let mut forbidden = preset.forbidden_functions();
    if let Some(rule_config) = config.rule(FORBIDDEN_FUNCTIONS) {
        forbidden = forbidden
            .apply_config(rule_config)
            .map_err(|source| SetupError::Options {
                sniff: FORBIDDEN_FUNCTIONS,
                source,
            })?;
    }

    Ok(Runner::builder()
        .sniff(forbidden.build())
        .config(config)
        .build()?)
}
