//! Position-indexed token sequence handed to sniffs.

use crate::lexer::Tokenizer;
use crate::token::Token;

/// An immutable, random-access token sequence for one file.
///
/// Lookups never panic: positions outside the stream resolve to `None`.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Creates a stream from tokens, renumbering their positions.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        let tokens = tokens
            .into_iter()
            .enumerate()
            .map(|(position, mut token)| {
                token.position = position;
                token
            })
            .collect();
        Self { tokens }
    }

    /// Tokenizes `source` and wraps the result.
    #[must_use]
    pub fn from_source(tokenizer: &dyn Tokenizer, source: &str) -> Self {
        Self::new(tokenizer.tokenize(source))
    }

    /// Returns the token at `position`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Token> {
        self.tokens.get(position)
    }

    /// Number of tokens in the stream.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the stream holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates over all tokens in stream order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Finds the nearest token before `position` that is not whitespace or
    /// a comment.
    #[must_use]
    pub fn find_previous_non_trivial(&self, position: usize) -> Option<&Token> {
        let end = position.min(self.tokens.len());
        self.tokens[..end].iter().rev().find(|t| !t.kind.is_trivial())
    }

    /// Finds the nearest token after `position` that is not whitespace or
    /// a comment.
    #[must_use]
    pub fn find_next_non_trivial(&self, position: usize) -> Option<&Token> {
        self.tokens
            .iter()
            .skip(position.saturating_add(1))
            .find(|t| !t.kind.is_trivial())
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::PhpTokenizer;
    use crate::token::TokenKind;

    fn stream(source: &str) -> TokenStream {
        TokenStream::from_source(&PhpTokenizer, source)
    }

    fn position_of(stream: &TokenStream, text: &str) -> usize {
        stream
            .iter()
            .find(|t| t.text == text)
            .map(|t| t.position)
            .expect("token should exist")
    }

    #[test]
    fn skips_whitespace_and_comments() {
        let s = stream("<?php $a -> /* c */ foo ( );");
        let foo = position_of(&s, "foo");

        let prev = s.find_previous_non_trivial(foo).map(|t| t.kind);
        let next = s.find_next_non_trivial(foo).map(|t| t.kind);
        assert_eq!(prev, Some(TokenKind::ObjectOperator));
        assert_eq!(next, Some(TokenKind::OpenParenthesis));
    }

    #[test]
    fn boundaries_resolve_to_none() {
        let s = stream("<?php foo");
        let foo = position_of(&s, "foo");
        assert!(s.find_next_non_trivial(foo).is_none());
        assert!(s.find_previous_non_trivial(0).is_none());
    }

    #[test]
    fn out_of_range_positions_are_safe() {
        let s = stream("<?php foo();");
        assert!(s.get(1000).is_none());
        assert!(s.find_next_non_trivial(usize::MAX).is_none());
        assert_eq!(
            s.find_previous_non_trivial(usize::MAX).map(|t| t.kind),
            Some(TokenKind::Semicolon)
        );
    }

    #[test]
    fn new_renumbers_positions() {
        let s = TokenStream::new(vec![
            Token::new(TokenKind::String, "a", 7),
            Token::new(TokenKind::String, "b", 7),
        ]);
        assert_eq!(s.get(1).map(|t| t.position), Some(1));
        assert_eq!(s.len(), 2);
    }
}
