//! # callsniff-rules
//!
//! Built-in sniffs for callsniff.
//!
//! ## Available Sniffs
//!
//! | Name | Codes | Description |
//! |------|-------|-------------|
//! | `forbidden-functions` | `Found`, `FoundWithAlternative`, `Discouraged`, `DiscouragedWithAlternative` | Forbids or discourages calls to configured functions |
//!
//! ## Usage
//!
//! ```ignore
//! use callsniff_core::Runner;
//! use callsniff_rules::ForbiddenFunctions;
//!
//! let runner = Runner::builder()
//!     .sniff(
//!         ForbiddenFunctions::builder()
//!             .function("eval")
//!             .function_with_alternative("mysql_query", "PDO")
//!             .build(),
//!     )
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod forbidden_functions;
mod presets;

pub use forbidden_functions::{
    ForbiddenCode, ForbiddenFunctions, ForbiddenFunctionsBuilder, ForbiddenMessage,
    FunctionRule, Match, MatchMode, OptionsError, RejectedPattern,
};
pub use presets::{advisory_sniffs, default_forbidden_functions, recommended_sniffs, Preset};

/// Re-export core types for convenience.
pub use callsniff_core::{Severity, Sniff};
