//! Token-driven sniff runner.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::diagnostic::{FileReport, Reporter};
use crate::lexer::{PhpTokenizer, Tokenizer};
use crate::sniff::{Sniff, SniffBox};
use crate::stream::TokenStream;
use crate::token::TokenKind;

/// Errors that can occur while building a runner.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Two sniffs were registered under the same name.
    #[error("Sniff registered twice: {0}")]
    DuplicateSniff(String),
}

/// Builder for configuring a [`Runner`].
#[derive(Default)]
pub struct RunnerBuilder {
    sniffs: Vec<SniffBox>,
    config: Option<Config>,
    tokenizer: Option<Box<dyn Tokenizer>>,
}

impl RunnerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sniff to the runner.
    #[must_use]
    pub fn sniff<S: Sniff + 'static>(mut self, sniff: S) -> Self {
        self.sniffs.push(Box::new(sniff));
        self
    }

    /// Adds a boxed sniff to the runner.
    #[must_use]
    pub fn sniff_box(mut self, sniff: SniffBox) -> Self {
        self.sniffs.push(sniff);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the default [`PhpTokenizer`].
    #[must_use]
    pub fn tokenizer<T: Tokenizer + 'static>(mut self, tokenizer: T) -> Self {
        self.tokenizer = Some(Box::new(tokenizer));
        self
    }

    /// Builds the runner, registering every enabled sniff.
    ///
    /// # Errors
    ///
    /// Returns an error if two sniffs share a name.
    pub fn build(self) -> Result<Runner, RunnerError> {
        let config = self.config.unwrap_or_default();

        let mut seen = HashSet::new();
        let mut sniffs = Vec::with_capacity(self.sniffs.len());
        for sniff in self.sniffs {
            if !seen.insert(sniff.name()) {
                return Err(RunnerError::DuplicateSniff(sniff.name().to_string()));
            }
            if config.is_rule_enabled(sniff.name()) {
                sniffs.push(sniff);
            } else {
                debug!("Skipping disabled sniff: {}", sniff.name());
            }
        }

        let tokenizer = self
            .tokenizer
            .unwrap_or_else(|| Box::new(PhpTokenizer::new()));

        let mut listeners: HashMap<TokenKind, Vec<usize>> = HashMap::new();
        for (index, sniff) in sniffs.iter().enumerate() {
            let interest = sniff.register(tokenizer.as_ref());
            debug!("Registered {} for {:?}", sniff.name(), interest);
            for kind in interest {
                listeners.entry(kind).or_default().push(index);
            }
        }

        info!("Runner ready with {} sniff(s)", sniffs.len());

        Ok(Runner {
            sniffs,
            listeners,
            tokenizer,
        })
    }
}

/// Dispatches tokens to the sniffs that registered for them.
///
/// Use [`Runner::builder()`] to construct an instance. A runner holds no
/// per-file state, so one instance can check any number of files.
pub struct Runner {
    sniffs: Vec<SniffBox>,
    listeners: HashMap<TokenKind, Vec<usize>>,
    tokenizer: Box<dyn Tokenizer>,
}

impl Runner {
    /// Creates a new builder for configuring a runner.
    #[must_use]
    pub fn builder() -> RunnerBuilder {
        RunnerBuilder::new()
    }

    /// Returns the number of enabled sniffs.
    #[must_use]
    pub fn sniff_count(&self) -> usize {
        self.sniffs.len()
    }

    /// Returns the tokenizer used for [`Runner::check_source`].
    #[must_use]
    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }

    /// Tokenizes and checks one file.
    #[must_use]
    pub fn check_source(&self, path: impl Into<PathBuf>, source: &str) -> FileReport {
        let stream = TokenStream::from_source(self.tokenizer.as_ref(), source);
        self.check_stream(path, &stream)
    }

    /// Checks an already tokenized file.
    ///
    /// Each token is offered, in stream order, to every sniff registered for
    /// its kind, in the order the sniffs were added.
    #[must_use]
    pub fn check_stream(&self, path: impl Into<PathBuf>, stream: &TokenStream) -> FileReport {
        let mut report = FileReport::new(path);
        debug!("Checking {} ({} tokens)", report.path.display(), stream.len());

        let mut reporter = Reporter::new(stream);
        for token in stream {
            let Some(indices) = self.listeners.get(&token.kind) else {
                continue;
            };
            for &index in indices {
                if let Some(sniff) = self.sniffs.get(index) {
                    reporter.set_sniff(sniff.name());
                    sniff.process(stream, token.position, &mut reporter);
                }
            }
        }

        report.diagnostics = reporter.into_diagnostics();
        debug!(
            "{}: {} diagnostic(s)",
            report.path.display(),
            report.diagnostics.len()
        );
        report
    }
}
