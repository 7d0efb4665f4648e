//! Tokenizer interface and the built-in PHP tokenizer.
//!
//! The tokenizer is infallible: unknown characters become
//! [`TokenKind::Char`] tokens and unterminated strings or comments run to the
//! end of the input. A malformed file therefore never aborts a scan.

use crate::token::{Token, TokenKind};

/// Turns source text into a flat token sequence.
///
/// Sniffs use this both for scanning files (through the runner) and for
/// deriving which token kinds a name is lexed as.
pub trait Tokenizer: Send + Sync {
    /// Tokenizes `source`, numbering tokens from position 0.
    fn tokenize(&self, source: &str) -> Vec<Token>;
}

/// Tokenizer for PHP source files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpTokenizer;

impl PhpTokenizer {
    /// Creates a new PHP tokenizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for PhpTokenizer {
    fn tokenize(&self, source: &str) -> Vec<Token> {
        Lexer::new(source).run()
    }
}

const THREE_CHAR_OPERATORS: &[&str] = &[
    "?->", "...", "===", "!==", "<=>", "**=", "??=", "<<=", ">>=",
];

const TWO_CHAR_OPERATORS: &[&str] = &[
    "::", "->", "=>", "==", "!=", "<>", "<=", ">=", "&&", "||", "??", "++", "--", "+=", "-=",
    "*=", "/=", ".=", "%=", "&=", "|=", "^=", "<<", ">>", "**",
];

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    in_php: bool,
    last_significant: Option<TokenKind>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
            in_php: false,
            last_significant: None,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while self.pos < self.src.len() {
            if self.in_php {
                self.lex_php();
            } else {
                self.lex_html();
            }
        }
        self.tokens
    }

    fn rest(&self) -> &'a str {
        let src = self.src;
        &src[self.pos..]
    }

    /// Emits a token spanning `len` bytes from the current position.
    fn push(&mut self, kind: TokenKind, len: usize) {
        let src = self.src;
        let end = (self.pos + len).min(src.len());
        let text = &src[self.pos..end];

        let token = Token::new(kind, text, self.tokens.len()).at(self.line, self.column);
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        if !kind.is_trivial() {
            self.last_significant = Some(kind);
        }
        self.tokens.push(token);
        self.pos = end;
    }

    fn lex_html(&mut self) {
        let rest = self.rest();
        match find_open_tag(rest) {
            Some((start, len, kind)) => {
                if start > 0 {
                    self.push(TokenKind::InlineHtml, start);
                }
                self.push(kind, len);
                self.in_php = true;
            }
            None => self.push(TokenKind::InlineHtml, rest.len()),
        }
    }

    fn lex_php(&mut self) {
        let rest = self.rest();
        let Some(c) = rest.chars().next() else {
            return;
        };

        if c.is_whitespace() {
            let len = byte_len_while(rest, char::is_whitespace);
            self.push(TokenKind::Whitespace, len);
        } else if rest.starts_with("?>") {
            let len = if rest[2..].starts_with("\r\n") {
                4
            } else if rest[2..].starts_with('\n') {
                3
            } else {
                2
            };
            self.push(TokenKind::CloseTag, len);
            self.in_php = false;
        } else if rest.starts_with("#[") {
            self.push(TokenKind::Attribute, 2);
        } else if c == '#' || rest.starts_with("//") {
            self.push(TokenKind::Comment, line_comment_len(rest));
        } else if rest.starts_with("/*") {
            let is_doc = rest.starts_with("/**")
                && rest[3..].chars().next().is_some_and(char::is_whitespace);
            let len = rest[2..].find("*/").map_or(rest.len(), |i| i + 4);
            let kind = if is_doc {
                TokenKind::DocComment
            } else {
                TokenKind::Comment
            };
            self.push(kind, len);
        } else if c == '$' && rest[1..].chars().next().is_some_and(is_ident_start) {
            let len = 1 + byte_len_while(&rest[1..], is_ident_char);
            self.push(TokenKind::Variable, len);
        } else if is_ident_start(c) {
            self.lex_identifier(rest);
        } else if c.is_ascii_digit()
            || (c == '.' && rest[1..].chars().next().is_some_and(|n| n.is_ascii_digit()))
        {
            let (len, kind) = number(rest);
            self.push(kind, len);
        } else if c == '\'' || c == '"' || c == '`' {
            self.push(TokenKind::ConstantEncapsedString, quoted_len(rest, c));
        } else if let Some(len) = heredoc_len(rest) {
            self.push(TokenKind::Heredoc, len);
        } else {
            self.lex_operator(rest, c);
        }
    }

    fn lex_identifier(&mut self, rest: &str) {
        let len = byte_len_while(rest, is_ident_char);
        let after_member_access = matches!(
            self.last_significant,
            Some(
                TokenKind::ObjectOperator
                    | TokenKind::NullsafeObjectOperator
                    | TokenKind::DoubleColon
            )
        );

        let kind = if after_member_access {
            TokenKind::String
        } else {
            TokenKind::keyword(&rest[..len]).unwrap_or(TokenKind::String)
        };
        self.push(kind, len);
    }

    fn lex_operator(&mut self, rest: &str, c: char) {
        if let Some(op) = THREE_CHAR_OPERATORS.iter().find(|op| rest.starts_with(**op)) {
            let kind = match *op {
                "?->" => TokenKind::NullsafeObjectOperator,
                "..." => TokenKind::Ellipsis,
                _ => TokenKind::Operator,
            };
            self.push(kind, 3);
            return;
        }

        if let Some(op) = TWO_CHAR_OPERATORS.iter().find(|op| rest.starts_with(**op)) {
            let kind = match *op {
                "::" => TokenKind::DoubleColon,
                "->" => TokenKind::ObjectOperator,
                "=>" => TokenKind::DoubleArrow,
                _ => TokenKind::Operator,
            };
            self.push(kind, 2);
            return;
        }

        let kind = match c {
            '(' => TokenKind::OpenParenthesis,
            ')' => TokenKind::CloseParenthesis,
            '{' => TokenKind::OpenCurlyBracket,
            '}' => TokenKind::CloseCurlyBracket,
            '[' => TokenKind::OpenSquareBracket,
            ']' => TokenKind::CloseSquareBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '\\' => TokenKind::NsSeparator,
            other => TokenKind::Char(other),
        };
        self.push(kind, c.len_utf8());
    }
}

/// Finds the next `<?php` or `<?=` open tag.
///
/// Returns the byte offset of the tag, its length (including the single
/// whitespace character that belongs to `<?php`) and its kind.
fn find_open_tag(rest: &str) -> Option<(usize, usize, TokenKind)> {
    let mut search = 0;
    while let Some(offset) = rest[search..].find("<?") {
        let start = search + offset;
        let after = &rest[start + 2..];

        if after.starts_with('=') {
            return Some((start, 3, TokenKind::OpenTagWithEcho));
        }

        if after.get(..3).is_some_and(|s| s.eq_ignore_ascii_case("php")) {
            match after[3..].chars().next() {
                None => return Some((start, 5, TokenKind::OpenTag)),
                Some(ws) if ws.is_whitespace() => {
                    return Some((start, 5 + ws.len_utf8(), TokenKind::OpenTag));
                }
                Some(_) => {}
            }
        }

        search = start + 2;
    }
    None
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii()
}

fn byte_len_while(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|(_, c)| !pred(*c))
        .map_or(s.len(), |(i, _)| i)
}

/// Length of a `//` or `#` comment, including its newline but stopping
/// before a close tag.
fn line_comment_len(rest: &str) -> usize {
    let newline = rest.find('\n').map(|i| i + 1);
    let close_tag = rest.find("?>");
    match (newline, close_tag) {
        (Some(n), Some(c)) => n.min(c),
        (Some(n), None) => n,
        (None, Some(c)) => c,
        (None, None) => rest.len(),
    }
}

fn quoted_len(rest: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, c) in rest.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return i + c.len_utf8();
        }
    }
    rest.len()
}

fn number(rest: &str) -> (usize, TokenKind) {
    let lower = rest.get(..2).map(str::to_ascii_lowercase);
    if matches!(lower.as_deref(), Some("0x" | "0b")) {
        let len = 2 + byte_len_while(&rest[2..], |c| c.is_ascii_hexdigit() || c == '_');
        return (len, TokenKind::LNumber);
    }

    let digits = |s: &str| byte_len_while(s, |c| c.is_ascii_digit() || c == '_');
    let mut len = digits(rest);
    let mut kind = TokenKind::LNumber;

    if rest[len..].starts_with('.') && !rest[len..].starts_with("..") {
        len += 1 + digits(&rest[len + 1..]);
        kind = TokenKind::DNumber;
    }

    let exponent = &rest[len..];
    if exponent.starts_with(['e', 'E']) {
        let sign = usize::from(exponent[1..].starts_with(['+', '-']));
        let exp_digits = digits(&exponent[1 + sign..]);
        if exp_digits > 0 {
            len += 1 + sign + exp_digits;
            kind = TokenKind::DNumber;
        }
    }

    (len, kind)
}

/// Length of a heredoc or nowdoc, or `None` if `rest` does not start one.
fn heredoc_len(rest: &str) -> Option<usize> {
    let header = rest.strip_prefix("<<<")?;
    let header = header.trim_start_matches([' ', '\t']);
    let unquoted = header.trim_start_matches(['\'', '"']);
    let label_len = byte_len_while(unquoted, is_ident_char);
    if label_len == 0 || !unquoted.starts_with(is_ident_start) {
        return None;
    }
    let label = &unquoted[..label_len];

    let body_start = rest.find('\n')? + 1;
    let mut line_start = body_start;
    for line in rest[body_start..].split_inclusive('\n') {
        let trimmed = line.trim_start_matches([' ', '\t']);
        if let Some(after) = trimmed.strip_prefix(label) {
            if !after.starts_with(is_ident_char) {
                let indent = line.len() - trimmed.len();
                return Some(line_start + indent + label.len());
            }
        }
        line_start += line.len();
    }
    Some(rest.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        PhpTokenizer
            .tokenize(source)
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !k.is_trivial())
            .collect()
    }

    #[test]
    fn tokenizes_simple_call() {
        assert_eq!(
            kinds("<?php foo();"),
            vec![
                TokenKind::OpenTag,
                TokenKind::String,
                TokenKind::OpenParenthesis,
                TokenKind::CloseParenthesis,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn positions_are_sequential() {
        let tokens = PhpTokenizer.tokenize("<?php $a = 1;\necho $a;");
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.position, i);
        }
    }

    #[test]
    fn tokens_cover_the_source() {
        let source = "<html>\n<?php /** doc */\n$x = \"a\\\"b\"; // c\n?>\ntail";
        let joined: String = PhpTokenizer
            .tokenize(source)
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(joined, source);
    }

    #[test]
    fn reserved_words_get_keyword_kinds() {
        assert_eq!(
            kinds("<?php eval('x'); die; EXIT;")[1..],
            [
                TokenKind::Eval,
                TokenKind::OpenParenthesis,
                TokenKind::ConstantEncapsedString,
                TokenKind::CloseParenthesis,
                TokenKind::Semicolon,
                TokenKind::Exit,
                TokenKind::Semicolon,
                TokenKind::Exit,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn names_after_member_access_are_strings() {
        assert_eq!(
            kinds("<?php $a->list(); $b?->eval(); C::new();")[1..],
            [
                TokenKind::Variable,
                TokenKind::ObjectOperator,
                TokenKind::String,
                TokenKind::OpenParenthesis,
                TokenKind::CloseParenthesis,
                TokenKind::Semicolon,
                TokenKind::Variable,
                TokenKind::NullsafeObjectOperator,
                TokenKind::String,
                TokenKind::OpenParenthesis,
                TokenKind::CloseParenthesis,
                TokenKind::Semicolon,
                TokenKind::String,
                TokenKind::DoubleColon,
                TokenKind::String,
                TokenKind::OpenParenthesis,
                TokenKind::CloseParenthesis,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn namespaced_names_are_split() {
        assert_eq!(
            kinds("<?php \\Foo\\bar();")[1..4],
            [TokenKind::NsSeparator, TokenKind::String, TokenKind::NsSeparator]
        );
    }

    #[test]
    fn inline_html_and_tags() {
        let tokens = PhpTokenizer.tokenize("<p><?= $x ?>\n</p>");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::InlineHtml,
                TokenKind::OpenTagWithEcho,
                TokenKind::Whitespace,
                TokenKind::Variable,
                TokenKind::Whitespace,
                TokenKind::CloseTag,
                TokenKind::InlineHtml,
            ]
        );
        assert_eq!(tokens[5].text, "?>\n");
    }

    #[test]
    fn source_without_open_tag_is_inline_html() {
        assert_eq!(kinds("eval();"), vec![TokenKind::InlineHtml]);
    }

    #[test]
    fn comments_and_doc_comments() {
        let tokens = PhpTokenizer.tokenize("<?php /** d */ /* c */ # h\n// s\n#[Attr]");
        let kinds: Vec<_> = tokens
            .iter()
            .map(|t| t.kind)
            .filter(|k| *k != TokenKind::Whitespace)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::OpenTag,
                TokenKind::DocComment,
                TokenKind::Comment,
                TokenKind::Comment,
                TokenKind::Comment,
                TokenKind::Attribute,
                TokenKind::String,
                TokenKind::CloseSquareBracket,
            ]
        );
    }

    #[test]
    fn line_comment_stops_at_close_tag() {
        let tokens = PhpTokenizer.tokenize("<?php // note ?>html");
        let last = &tokens[tokens.len() - 1];
        assert_eq!(last.kind, TokenKind::InlineHtml);
        assert_eq!(last.text, "html");
    }

    #[test]
    fn numbers() {
        assert_eq!(
            kinds("<?php 1; 1.5; 0x1F; 1e3; .5;")[1..]
                .iter()
                .filter(|k| **k != TokenKind::Semicolon)
                .copied()
                .collect::<Vec<_>>(),
            vec![
                TokenKind::LNumber,
                TokenKind::DNumber,
                TokenKind::LNumber,
                TokenKind::DNumber,
                TokenKind::DNumber,
            ]
        );
    }

    #[test]
    fn heredoc_is_one_token() {
        let source = "<?php $a = <<<EOT\neval();\n  EOT;\nfoo();";
        let tokens = PhpTokenizer.tokenize(source);
        let heredoc = tokens
            .iter()
            .find(|t| t.kind == TokenKind::Heredoc)
            .map(|t| t.text.as_str());
        assert_eq!(heredoc, Some("<<<EOT\neval();\n  EOT"));
        assert!(!tokens.iter().any(|t| t.kind == TokenKind::Eval));
    }

    #[test]
    fn unterminated_constructs_run_to_end() {
        let tokens = PhpTokenizer.tokenize("<?php 'abc");
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::ConstantEncapsedString));

        let tokens = PhpTokenizer.tokenize("<?php /* abc");
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Comment));
    }

    #[test]
    fn operators() {
        assert_eq!(
            kinds("<?php $a ??= $b === $c => ...$d;")[1..]
                .iter()
                .filter(|k| **k != TokenKind::Variable)
                .copied()
                .collect::<Vec<_>>(),
            vec![
                TokenKind::Operator,
                TokenKind::Operator,
                TokenKind::DoubleArrow,
                TokenKind::Ellipsis,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn tracks_lines_and_columns() {
        let tokens = PhpTokenizer.tokenize("<?php\n  foo();");
        let foo = tokens.iter().find(|t| t.text == "foo");
        assert_eq!(foo.map(|t| (t.line, t.column)), Some((2, 3)));
    }
}
