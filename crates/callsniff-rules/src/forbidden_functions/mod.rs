//! Sniff to forbid or discourage calls to configured functions.
//!
//! # Rationale
//!
//! Some functions are unsafe (`eval`), removed from modern PHP (`mysql_*`,
//! `ereg`), or have better replacements. This sniff reports every bare call
//! to one of them, optionally suggesting the alternative.
//!
//! # Detected Patterns
//!
//! - `eval($code);`
//! - `\mysql_query($sql);` (explicit global namespace)
//!
//! # Ignored Patterns
//!
//! - `$db->mysql_query()`, `Db::mysql_query()` (method calls)
//! - `Foo\mysql_query()` (function in another namespace)
//! - `new mysql_query()`, `function mysql_query()`, `const EVAL = 1`
//!
//! # Configuration
//!
//! - `functions`: table of name (or pattern) to alternative; `false` or an
//!   empty string means no alternative
//! - `pattern_match`: treat names as case-insensitive regular expressions
//! - `error`: report errors (`true`, default) or warnings (`false`)

mod call_site;
mod interest;
mod matcher;
mod options;

use callsniff_core::{
    render_message, DiagnosticSink, InterestSet, Severity, Sniff, TokenStream, Tokenizer,
};
use tracing::trace;

use matcher::NameMatcher;

pub use matcher::RejectedPattern;
pub use options::OptionsError;

/// Sniff name for forbidden-functions.
pub const NAME: &str = "forbidden-functions";

/// A disallowed function (or pattern) and its suggested replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRule {
    /// Function name, or regex source in pattern mode.
    pub name: String,
    /// Suggested replacement, if any.
    pub alternative: Option<String>,
}

impl FunctionRule {
    /// Creates a rule without an alternative.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alternative: None,
        }
    }

    /// Sets the suggested replacement.
    #[must_use]
    pub fn with_alternative(mut self, alternative: impl Into<String>) -> Self {
        self.alternative = Some(alternative.into());
        self
    }

    /// Returns the alternative if it is set and non-empty.
    #[must_use]
    pub fn alternative(&self) -> Option<&str> {
        self.alternative.as_deref().filter(|a| !a.is_empty())
    }
}

/// How configured names are compared with call-sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Case-insensitive name equality.
    #[default]
    Exact,
    /// Names are case-insensitive regular expressions.
    Pattern,
}

/// Diagnostic codes reported by this sniff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForbiddenCode {
    /// Forbidden function, no alternative.
    Found,
    /// Forbidden function with an alternative.
    FoundWithAlternative,
    /// Discouraged function, no alternative.
    Discouraged,
    /// Discouraged function with an alternative.
    DiscouragedWithAlternative,
}

impl ForbiddenCode {
    fn new(severity: Severity, with_alternative: bool) -> Self {
        match (severity, with_alternative) {
            (Severity::Error, false) => Self::Found,
            (Severity::Error, true) => Self::FoundWithAlternative,
            (Severity::Warning, false) => Self::Discouraged,
            (Severity::Warning, true) => Self::DiscouragedWithAlternative,
        }
    }

    /// Returns the code as reported to the sink.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Found => "Found",
            Self::FoundWithAlternative => "FoundWithAlternative",
            Self::Discouraged => "Discouraged",
            Self::DiscouragedWithAlternative => "DiscouragedWithAlternative",
        }
    }
}

impl std::fmt::Display for ForbiddenCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A call-site that matched a configured rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'a> {
    /// The rule that matched.
    pub rule: &'a FunctionRule,
    /// Lower-cased function name as written at the call-site.
    pub function: String,
    /// Token position of the call-site.
    pub position: usize,
}

/// A diagnostic ready to hand to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForbiddenMessage {
    /// Diagnostic code.
    pub code: ForbiddenCode,
    /// Channel to report through.
    pub severity: Severity,
    /// Message template with `%s` placeholders.
    pub template: String,
    /// Placeholder values: the function, then the alternative if any.
    pub args: Vec<String>,
}

impl ForbiddenMessage {
    /// Builds the diagnostic for a call to `function` matched by `rule`.
    #[must_use]
    pub fn new(rule: &FunctionRule, function: &str, severity: Severity) -> Self {
        let mut template = String::from("The use of function %s() is ");
        template.push_str(match severity {
            Severity::Error => "forbidden",
            Severity::Warning => "discouraged",
        });

        let mut args = vec![function.to_string()];
        let alternative = rule.alternative();
        if let Some(alternative) = alternative {
            template.push_str("; use %s instead");
            args.push(alternative.to_string());
        }

        Self {
            code: ForbiddenCode::new(severity, alternative.is_some()),
            severity,
            template,
            args,
        }
    }

    /// Returns the message with its arguments substituted.
    #[must_use]
    pub fn render(&self) -> String {
        render_message(&self.template, &self.args)
    }

    /// Hands the diagnostic to the sink channel matching its severity.
    pub fn emit(&self, position: usize, sink: &mut dyn DiagnosticSink) {
        match self.severity {
            Severity::Error => {
                sink.report_error(position, self.code.as_str(), &self.template, &self.args);
            }
            Severity::Warning => {
                sink.report_warning(position, self.code.as_str(), &self.template, &self.args);
            }
        }
    }
}

/// Builder for [`ForbiddenFunctions`].
#[derive(Debug, Clone, Default)]
pub struct ForbiddenFunctionsBuilder {
    rules: Vec<FunctionRule>,
    mode: MatchMode,
    severity: Option<Severity>,
}

impl ForbiddenFunctionsBuilder {
    /// Creates a builder with no functions, exact matching and errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule, replacing any rule with the same name in place.
    ///
    /// In exact mode names differing only in case are the same function; they
    /// are merged the same way when the sniff is built.
    #[must_use]
    pub fn rule(mut self, rule: FunctionRule) -> Self {
        upsert(&mut self.rules, rule);
        self
    }

    /// Adds a function without an alternative.
    #[must_use]
    pub fn function(self, name: impl Into<String>) -> Self {
        self.rule(FunctionRule::new(name))
    }

    /// Adds a function with a suggested alternative.
    #[must_use]
    pub fn function_with_alternative(
        self,
        name: impl Into<String>,
        alternative: impl Into<String>,
    ) -> Self {
        self.rule(FunctionRule::new(name).with_alternative(alternative))
    }

    /// Replaces all configured rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = FunctionRule>) -> Self {
        self.rules.clear();
        rules.into_iter().fold(self, Self::rule)
    }

    /// Enables or disables regular-expression matching.
    #[must_use]
    pub fn pattern_match(mut self, enabled: bool) -> Self {
        self.mode = if enabled {
            MatchMode::Pattern
        } else {
            MatchMode::Exact
        };
        self
    }

    /// Reports errors when `true`, warnings when `false`.
    #[must_use]
    pub fn error(self, error: bool) -> Self {
        self.severity(if error {
            Severity::Error
        } else {
            Severity::Warning
        })
    }

    /// Sets the severity of every diagnostic.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Builds the sniff.
    #[must_use]
    pub fn build(self) -> ForbiddenFunctions {
        let rules = match self.mode {
            MatchMode::Exact => self.rules.into_iter().fold(Vec::new(), |mut rules, mut rule| {
                rule.name.make_ascii_lowercase();
                upsert(&mut rules, rule);
                rules
            }),
            MatchMode::Pattern => self.rules,
        };

        let (matcher, rejected) = match self.mode {
            MatchMode::Exact => (NameMatcher::exact(&rules), Vec::new()),
            MatchMode::Pattern => NameMatcher::pattern(&rules),
        };

        ForbiddenFunctions {
            rules,
            mode: self.mode,
            severity: self.severity.unwrap_or(Severity::Error),
            matcher,
            rejected,
        }
    }
}

/// Inserts `rule`, or replaces the alternative of the rule with its name.
fn upsert(rules: &mut Vec<FunctionRule>, rule: FunctionRule) {
    match rules.iter_mut().find(|r| r.name == rule.name) {
        Some(existing) => existing.alternative = rule.alternative,
        None => rules.push(rule),
    }
}

/// Reports calls to configured functions.
#[derive(Debug)]
pub struct ForbiddenFunctions {
    rules: Vec<FunctionRule>,
    mode: MatchMode,
    severity: Severity,
    matcher: NameMatcher,
    rejected: Vec<RejectedPattern>,
}

impl Default for ForbiddenFunctions {
    fn default() -> Self {
        Self::new()
    }
}

impl ForbiddenFunctions {
    /// Creates the sniff with the default forbidden list, reported as errors.
    #[must_use]
    pub fn new() -> Self {
        crate::presets::Preset::Recommended
            .forbidden_functions()
            .build()
    }

    /// Creates a builder with no functions configured.
    #[must_use]
    pub fn builder() -> ForbiddenFunctionsBuilder {
        ForbiddenFunctionsBuilder::new()
    }

    /// Configured rules, in configuration order.
    #[must_use]
    pub fn rules(&self) -> &[FunctionRule] {
        &self.rules
    }

    /// Matching mode.
    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Severity of every diagnostic.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Patterns that failed to compile and are never matched.
    #[must_use]
    pub fn rejected_patterns(&self) -> &[RejectedPattern] {
        &self.rejected
    }

    /// Decides whether the token at `position` is a call to a configured
    /// function.
    #[must_use]
    pub fn classify(&self, stream: &TokenStream, position: usize) -> Option<Match<'_>> {
        if !call_site::is_call_site(stream, position) {
            trace!("Token {} is not a global call", position);
            return None;
        }

        let function = stream.get(position)?.text.to_ascii_lowercase();
        let index = self.matcher.resolve(&function)?;
        let rule = self.rules.get(index)?;

        Some(Match {
            rule,
            function,
            position,
        })
    }
}

impl Sniff for ForbiddenFunctions {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids or discourages calls to configured functions"
    }

    fn register(&self, tokenizer: &dyn Tokenizer) -> InterestSet {
        interest::compile(&self.rules, self.mode, tokenizer)
    }

    fn process(&self, stream: &TokenStream, position: usize, sink: &mut dyn DiagnosticSink) {
        if let Some(found) = self.classify(stream, position) {
            ForbiddenMessage::new(found.rule, &found.function, self.severity)
                .emit(found.position, sink);
        }
    }
}
