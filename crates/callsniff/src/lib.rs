//! # callsniff
//!
//! Token-driven PHP call-site linter.
//!
//! This is the main facade crate that re-exports the core framework and the
//! built-in sniffs, and wires them together from a [`Config`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! let runner = callsniff::runner_from_toml(r#"
//! preset = "recommended"
//!
//! [rules.forbidden-functions.functions]
//! eval = false
//! mysql_query = "PDO"
//! "#)?;
//!
//! let report = runner.check_source("index.php", &source);
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use callsniff::sniffs::ForbiddenFunctions;
//! use callsniff::Runner;
//!
//! let runner = Runner::builder()
//!     .sniff(ForbiddenFunctions::builder().function("eval").build())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Re-export core types and traits
pub use callsniff_core::*;

/// Built-in sniffs and presets.
pub mod sniffs {
    pub use callsniff_rules::*;
}

mod setup;

pub use setup::{runner_from_config, runner_from_toml, SetupError};
