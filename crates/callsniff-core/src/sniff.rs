//! The sniff trait: a check driven by the tokens it registers for.

use std::collections::BTreeSet;

use crate::diagnostic::DiagnosticSink;
use crate::lexer::Tokenizer;
use crate::stream::TokenStream;
use crate::token::TokenKind;

/// Token kinds a sniff asks to be invoked on.
pub type InterestSet = BTreeSet<TokenKind>;

/// A token-driven check.
///
/// The runner calls [`Sniff::register`] once when it is built, passing the
/// tokenizer it will lex files with, then calls [`Sniff::process`] exactly
/// once for every token whose kind is in the returned set, in stream order.
///
/// # Example
///
/// ```ignore
/// use callsniff_core::{DiagnosticSink, InterestSet, Sniff, TokenKind, TokenStream, Tokenizer};
///
/// pub struct NoGoto;
///
/// impl Sniff for NoGoto {
///     fn name(&self) -> &'static str { "no-goto" }
///
///     fn register(&self, _tokenizer: &dyn Tokenizer) -> InterestSet {
///         InterestSet::from([TokenKind::Goto])
///     }
///
///     fn process(&self, _stream: &TokenStream, position: usize, sink: &mut dyn DiagnosticSink) {
///         sink.report_error(position, "Found", "goto is not allowed", &[]);
///     }
/// }
/// ```
pub trait Sniff: Send + Sync {
    /// Returns the kebab-case name of this sniff (e.g., "forbidden-functions").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this sniff checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the token kinds this sniff must be invoked on when files are
    /// lexed by `tokenizer`.
    fn register(&self, tokenizer: &dyn Tokenizer) -> InterestSet;

    /// Inspects the token at `position` and reports any findings to `sink`.
    fn process(&self, stream: &TokenStream, position: usize, sink: &mut dyn DiagnosticSink);
}

/// Type alias for boxed Sniff trait objects.
pub type SniffBox = Box<dyn Sniff>;
