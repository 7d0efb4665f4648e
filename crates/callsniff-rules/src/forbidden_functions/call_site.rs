//! Context filtering: is a token a bare, unqualified function call?

use callsniff_core::{Token, TokenKind, TokenStream};

/// Neighbour kinds that turn a name into something other than a global
/// function call: a method or static member, a declaration, a trait alias,
/// an instantiation, or a namespaced name.
pub(crate) const IGNORED_CONTEXT: &[TokenKind] = &[
    TokenKind::DoubleColon,
    TokenKind::ObjectOperator,
    TokenKind::NullsafeObjectOperator,
    TokenKind::Function,
    TokenKind::Const,
    TokenKind::Public,
    TokenKind::Private,
    TokenKind::Protected,
    TokenKind::As,
    TokenKind::New,
    TokenKind::InsteadOf,
    TokenKind::NsSeparator,
    TokenKind::Implements,
];

fn is_ignored(token: Option<&Token>) -> bool {
    token.is_some_and(|t| IGNORED_CONTEXT.contains(&t.kind))
}

/// Returns true if the token at `position` is invoked as a function from the
/// current or the global namespace.
pub(crate) fn is_call_site(stream: &TokenStream, position: usize) -> bool {
    let Some(token) = stream.get(position) else {
        return false;
    };

    let mut prev = stream.find_previous_non_trivial(position);

    // `\name()` points at the global namespace; `Foo\name()` does not.
    if let Some(separator) = prev.filter(|t| t.kind == TokenKind::NsSeparator) {
        prev = stream.find_previous_non_trivial(separator.position);
        if prev.is_some_and(|t| t.kind == TokenKind::String) {
            return false;
        }
    }

    if is_ignored(prev) {
        return false;
    }

    let next = stream.find_next_non_trivial(position);
    if is_ignored(next) {
        return false;
    }

    token.kind != TokenKind::String || next.is_some_and(|t| t.kind == TokenKind::OpenParenthesis)
}
