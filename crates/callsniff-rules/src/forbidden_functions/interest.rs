//! Derives the token kinds the sniff must be invoked on.

use callsniff_core::{InterestSet, TokenKind, Tokenizer};

use super::{FunctionRule, MatchMode};

/// Tokens of the synthetic snippet that are not function names.
const SNIPPET_PUNCTUATION: &[TokenKind] = &[
    TokenKind::OpenTag,
    TokenKind::OpenParenthesis,
    TokenKind::CloseParenthesis,
    TokenKind::Semicolon,
];

/// Computes the interest set for `rules` in `mode`.
///
/// In exact mode every name is lexed as a call (`name();`) so reserved words
/// such as `eval` or `exit` register their own keyword kinds. Patterns can
/// only be checked against text, so pattern mode listens to bare identifiers.
pub(crate) fn compile(
    rules: &[FunctionRule],
    mode: MatchMode,
    tokenizer: &dyn Tokenizer,
) -> InterestSet {
    match mode {
        MatchMode::Pattern => InterestSet::from([TokenKind::String]),
        MatchMode::Exact => {
            let mut snippet = String::from("<?php ");
            for rule in rules {
                snippet.push_str(&rule.name);
                snippet.push_str("();");
            }

            tokenizer
                .tokenize(&snippet)
                .into_iter()
                .map(|t| t.kind)
                .filter(|kind| !kind.is_trivial() && !SNIPPET_PUNCTUATION.contains(kind))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callsniff_core::{PhpTokenizer, Token};

    fn exact(names: &[&str]) -> InterestSet {
        let rules: Vec<FunctionRule> = names.iter().map(|n| FunctionRule::new(*n)).collect();
        compile(&rules, MatchMode::Exact, &PhpTokenizer)
    }

    #[test]
    fn plain_names_register_identifiers() {
        assert_eq!(
            exact(&["mysql_query", "range"]),
            InterestSet::from([TokenKind::String])
        );
    }

    #[test]
    fn reserved_words_register_their_own_kind() {
        assert_eq!(
            exact(&["eval", "die", "exit", "strlen"]),
            InterestSet::from([TokenKind::Eval, TokenKind::Exit, TokenKind::String])
        );
    }

    #[test]
    fn empty_rule_list_registers_nothing() {
        assert!(exact(&[]).is_empty());
    }

    #[test]
    fn pattern_mode_ignores_rules() {
        let rules = [FunctionRule::new("^eval$")];
        assert_eq!(
            compile(&rules, MatchMode::Pattern, &PhpTokenizer),
            InterestSet::from([TokenKind::String])
        );
    }

    /// A tokenizer that lexes every name as `Print`.
    struct PrintTokenizer;

    impl Tokenizer for PrintTokenizer {
        fn tokenize(&self, source: &str) -> Vec<Token> {
            PhpTokenizer
                .tokenize(source)
                .into_iter()
                .map(|mut t| {
                    if t.kind == TokenKind::String {
                        t.kind = TokenKind::Print;
                    }
                    t
                })
                .collect()
        }
    }

    #[test]
    fn follows_the_tokenizer() {
        let rules = [FunctionRule::new("foo")];
        assert_eq!(
            compile(&rules, MatchMode::Exact, &PrintTokenizer),
            InterestSet::from([TokenKind::Print])
        );
    }
}
