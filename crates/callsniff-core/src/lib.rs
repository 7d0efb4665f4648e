//! # callsniff-core
//!
//! Core framework for token-driven PHP sniffs.
//!
//! This crate provides the host side that sniffs plug into:
//!
//! - [`Tokenizer`] trait and the built-in [`PhpTokenizer`]
//! - [`TokenStream`] with non-trivial lookback/lookahead
//! - [`Sniff`] trait for token-driven checks
//! - [`DiagnosticSink`] and the collecting [`Reporter`]
//! - [`Runner`] for dispatching tokens to registered sniffs
//!
//! ## Example
//!
//! ```ignore
//! use callsniff_core::Runner;
//!
//! let runner = Runner::builder()
//!     .sniff(MySniff::new())
//!     .build()?;
//!
//! let report = runner.check_source("index.php", &source);
//! for diagnostic in &report.diagnostics {
//!     println!("{diagnostic}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod diagnostic;
mod lexer;
mod runner;
mod sniff;
mod stream;
mod token;

pub use config::{Config, ConfigError, RuleConfig};
pub use diagnostic::{render_message, Diagnostic, DiagnosticSink, FileReport, Reporter, Severity};
pub use lexer::{PhpTokenizer, Tokenizer};
pub use runner::{Runner, RunnerBuilder, RunnerError};
pub use sniff::{InterestSet, Sniff, SniffBox};
pub use stream::TokenStream;
pub use token::{Token, TokenKind};
