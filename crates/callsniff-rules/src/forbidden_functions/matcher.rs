//! Resolves a call-site name to the rule that forbids it.

use std::collections::HashMap;

use regex::{RegexBuilder, RegexSet, RegexSetBuilder};
use tracing::warn;

use super::FunctionRule;

/// A configured pattern that failed to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedPattern {
    /// Pattern source as configured.
    pub pattern: String,
    /// Compiler error.
    pub reason: String,
}

#[derive(Debug)]
pub(crate) enum NameMatcher {
    /// Lower-cased name to rule index.
    Exact(HashMap<String, usize>),
    /// Valid patterns compiled together; `indices` maps set slots to rules.
    Pattern {
        set: Option<RegexSet>,
        indices: Vec<usize>,
    },
}

impl NameMatcher {
    pub(crate) fn exact(rules: &[FunctionRule]) -> Self {
        let mut names = HashMap::with_capacity(rules.len());
        for (index, rule) in rules.iter().enumerate() {
            names.entry(rule.name.to_ascii_lowercase()).or_insert(index);
        }
        Self::Exact(names)
    }

    /// Compiles every pattern case-insensitively, dropping the ones that do
    /// not compile.
    pub(crate) fn pattern(rules: &[FunctionRule]) -> (Self, Vec<RejectedPattern>) {
        let mut sources = Vec::with_capacity(rules.len());
        let mut indices = Vec::with_capacity(rules.len());
        let mut rejected = Vec::new();

        for (index, rule) in rules.iter().enumerate() {
            match RegexBuilder::new(&rule.name).case_insensitive(true).build() {
                Ok(_) => {
                    sources.push(rule.name.as_str());
                    indices.push(index);
                }
                Err(e) => {
                    warn!("Ignoring invalid function pattern {:?}: {}", rule.name, e);
                    rejected.push(RejectedPattern {
                        pattern: rule.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let set = if sources.is_empty() {
            None
        } else {
            match RegexSetBuilder::new(&sources).case_insensitive(true).build() {
                Ok(set) => Some(set),
                Err(e) => {
                    warn!("Failed to combine function patterns: {}", e);
                    rejected.extend(sources.iter().map(|pattern| RejectedPattern {
                        pattern: (*pattern).to_string(),
                        reason: e.to_string(),
                    }));
                    None
                }
            }
        };

        (Self::Pattern { set, indices }, rejected)
    }

    /// Returns the index of the rule matching `function`.
    ///
    /// When several patterns match, the first configured one wins.
    pub(crate) fn resolve(&self, function: &str) -> Option<usize> {
        match self {
            Self::Exact(names) => names.get(function).copied(),
            Self::Pattern { set, indices } => {
                let slot = set.as_ref()?.matches(function).iter().next()?;
                indices.get(slot).copied()
            }
        }
    }
}
