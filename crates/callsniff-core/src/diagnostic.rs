//! Diagnostics, the sink sniffs report into, and per-file results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::stream::TokenStream;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory finding.
    Warning,
    /// Violation that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Receives findings from sniffs.
///
/// `message` is a template whose `%s` placeholders are filled from `args`
/// in order.
pub trait DiagnosticSink {
    /// Reports an error at the token `position`.
    fn report_error(&mut self, position: usize, code: &str, message: &str, args: &[String]);

    /// Reports a warning at the token `position`.
    fn report_warning(&mut self, position: usize, code: &str, message: &str, args: &[String]);
}

/// A finding reported by a sniff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the sniff that reported it (e.g., "forbidden-functions").
    pub sniff: String,
    /// Sniff-specific code (e.g., "Found").
    pub code: String,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Token position the diagnostic points at.
    pub position: usize,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Message template with `%s` placeholders.
    pub template: String,
    /// Placeholder values.
    pub args: Vec<String>,
}

impl Diagnostic {
    /// Returns the message with its arguments substituted.
    #[must_use]
    pub fn message(&self) -> String {
        render_message(&self.template, &self.args)
    }

    /// Returns the fully qualified code (`sniff.Code`).
    #[must_use]
    pub fn qualified_code(&self) -> String {
        format!("{}.{}", self.sniff, self.code)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}] {}",
            self.line,
            self.column,
            self.severity,
            self.qualified_code(),
            self.message()
        )
    }
}

/// Substitutes `args` into the `%s` placeholders of `template`, in order.
///
/// Surplus placeholders are left as-is; surplus arguments are ignored.
#[must_use]
pub fn render_message(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut pieces = template.split("%s").peekable();

    while let Some(piece) = pieces.next() {
        out.push_str(piece);
        if pieces.peek().is_some() {
            match args.next() {
                Some(arg) => out.push_str(arg),
                None => out.push_str("%s"),
            }
        }
    }
    out
}

/// Collecting [`DiagnosticSink`] for a single file.
///
/// Resolves token positions to line/column through the stream and tags
/// every diagnostic with the sniff currently being run.
#[derive(Debug)]
pub struct Reporter<'a> {
    stream: &'a TokenStream,
    sniff: &'static str,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Reporter<'a> {
    /// Creates a reporter for `stream`.
    #[must_use]
    pub fn new(stream: &'a TokenStream) -> Self {
        Self {
            stream,
            sniff: "",
            diagnostics: Vec::new(),
        }
    }

    /// Sets the sniff name attached to subsequent diagnostics.
    pub fn set_sniff(&mut self, sniff: &'static str) {
        self.sniff = sniff;
    }

    /// Returns the diagnostics collected so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the reporter, returning its diagnostics in report order.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn report(
        &mut self,
        severity: Severity,
        position: usize,
        code: &str,
        message: &str,
        args: &[String],
    ) {
        let (line, column) = self
            .stream
            .get(position)
            .map_or((0, 0), |t| (t.line, t.column));

        self.diagnostics.push(Diagnostic {
            sniff: self.sniff.to_string(),
            code: code.to_string(),
            severity,
            position,
            line,
            column,
            template: message.to_string(),
            args: args.to_vec(),
        });
    }
}

impl DiagnosticSink for Reporter<'_> {
    fn report_error(&mut self, position: usize, code: &str, message: &str, args: &[String]) {
        self.report(Severity::Error, position, code, message, args);
    }

    fn report_warning(&mut self, position: usize, code: &str, message: &str, args: &[String]) {
        self.report(Severity::Warning, position, code, message, args);
    }
}

/// Result of running sniffs over one file.
#[derive(Debug, Default, Clone)]
pub struct FileReport {
    /// Path of the file, as given by the host.
    pub path: PathBuf,
    /// Diagnostics in the order they were reported.
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    /// Creates an empty report for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            diagnostics: Vec::new(),
        }
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns diagnostics filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .collect()
    }

    /// Counts diagnostics as `(errors, warnings)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        let errors = self
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        (errors, self.diagnostics.len() - errors)
    }
}
