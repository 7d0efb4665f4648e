//! Token types produced by the tokenizer.

/// Lexical category of a PHP token.
///
/// Variants follow the PHP tokenizer's `T_*` constants where one exists.
/// Single-character tokens that sniffs look at directly get their own
/// variant; every other single character is carried by [`TokenKind::Char`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum TokenKind {
    // Document structure
    InlineHtml,
    OpenTag,
    OpenTagWithEcho,
    CloseTag,

    // Trivia
    Whitespace,
    Comment,
    DocComment,

    // Names and literals
    /// A bare identifier (`T_STRING`).
    String,
    Variable,
    LNumber,
    DNumber,
    ConstantEncapsedString,
    Heredoc,

    // Reserved words
    Abstract,
    Array,
    As,
    Break,
    Callable,
    Case,
    Catch,
    Class,
    Clone,
    Const,
    Continue,
    Declare,
    Default,
    Do,
    Echo,
    Else,
    ElseIf,
    Empty,
    EndDeclare,
    EndFor,
    EndForeach,
    EndIf,
    EndSwitch,
    EndWhile,
    Eval,
    /// `exit` and `die`.
    Exit,
    Extends,
    Final,
    Finally,
    Fn,
    For,
    Foreach,
    Function,
    Global,
    Goto,
    HaltCompiler,
    If,
    Implements,
    Include,
    IncludeOnce,
    InstanceOf,
    InsteadOf,
    Interface,
    Isset,
    List,
    LogicalAnd,
    LogicalOr,
    LogicalXor,
    Match,
    Namespace,
    New,
    Print,
    Private,
    Protected,
    Public,
    Readonly,
    Require,
    RequireOnce,
    Return,
    Static,
    Switch,
    Throw,
    Trait,
    Try,
    Unset,
    Use,
    Var,
    While,
    Yield,

    // Operators
    /// `->`
    ObjectOperator,
    /// `?->`
    NullsafeObjectOperator,
    /// `::`
    DoubleColon,
    /// `\`
    NsSeparator,
    /// `=>`
    DoubleArrow,
    /// `...`
    Ellipsis,
    /// Any other multi-character operator (`===`, `??=`, `<<`, ...).
    Operator,
    /// `#[`
    Attribute,

    // Punctuation
    OpenParenthesis,
    CloseParenthesis,
    OpenCurlyBracket,
    CloseCurlyBracket,
    OpenSquareBracket,
    CloseSquareBracket,
    Semicolon,
    Comma,
    Char(char),
}

impl TokenKind {
    /// Returns true for tokens that carry no syntactic meaning
    /// (whitespace and comments).
    #[must_use]
    pub fn is_trivial(self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment | Self::DocComment)
    }

    /// Looks up the keyword kind for an identifier, case-insensitively.
    ///
    /// Returns `None` when the identifier is not a reserved word.
    #[must_use]
    pub fn keyword(ident: &str) -> Option<Self> {
        let lower = ident.to_ascii_lowercase();
        let kind = match lower.as_str() {
            "abstract" => Self::Abstract,
            "and" => Self::LogicalAnd,
            "array" => Self::Array,
            "as" => Self::As,
            "break" => Self::Break,
            "callable" => Self::Callable,
            "case" => Self::Case,
            "catch" => Self::Catch,
            "class" => Self::Class,
            "clone" => Self::Clone,
            "const" => Self::Const,
            "continue" => Self::Continue,
            "declare" => Self::Declare,
            "default" => Self::Default,
            "die" | "exit" => Self::Exit,
            "do" => Self::Do,
            "echo" => Self::Echo,
            "else" => Self::Else,
            "elseif" => Self::ElseIf,
            "empty" => Self::Empty,
            "enddeclare" => Self::EndDeclare,
            "endfor" => Self::EndFor,
            "endforeach" => Self::EndForeach,
            "endif" => Self::EndIf,
            "endswitch" => Self::EndSwitch,
            "endwhile" => Self::EndWhile,
            "eval" => Self::Eval,
            "extends" => Self::Extends,
            "final" => Self::Final,
            "finally" => Self::Finally,
            "fn" => Self::Fn,
            "for" => Self::For,
            "foreach" => Self::Foreach,
            "function" => Self::Function,
            "global" => Self::Global,
            "goto" => Self::Goto,
            "__halt_compiler" => Self::HaltCompiler,
            "if" => Self::If,
            "implements" => Self::Implements,
            "include" => Self::Include,
            "include_once" => Self::IncludeOnce,
            "instanceof" => Self::InstanceOf,
            "insteadof" => Self::InsteadOf,
            "interface" => Self::Interface,
            "isset" => Self::Isset,
            "list" => Self::List,
            "match" => Self::Match,
            "namespace" => Self::Namespace,
            "new" => Self::New,
            "or" => Self::LogicalOr,
            "print" => Self::Print,
            "private" => Self::Private,
            "protected" => Self::Protected,
            "public" => Self::Public,
            "readonly" => Self::Readonly,
            "require" => Self::Require,
            "require_once" => Self::RequireOnce,
            "return" => Self::Return,
            "static" => Self::Static,
            "switch" => Self::Switch,
            "throw" => Self::Throw,
            "trait" => Self::Trait,
            "try" => Self::Try,
            "unset" => Self::Unset,
            "use" => Self::Use,
            "var" => Self::Var,
            "while" => Self::While,
            "xor" => Self::LogicalXor,
            "yield" => Self::Yield,
            _ => return None,
        };
        Some(kind)
    }
}

/// A classified lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lexical category.
    pub kind: TokenKind,
    /// Source text covered by the token.
    pub text: String,
    /// Index of the token within its stream.
    pub position: usize,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in characters).
    pub column: usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
            line: 1,
            column: 1,
        }
    }

    /// Sets the source location of this token.
    #[must_use]
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = line;
        self.column = column;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(TokenKind::keyword("EVAL"), Some(TokenKind::Eval));
        assert_eq!(TokenKind::keyword("Function"), Some(TokenKind::Function));
        assert_eq!(TokenKind::keyword("die"), Some(TokenKind::Exit));
        assert_eq!(TokenKind::keyword("exit"), Some(TokenKind::Exit));
    }

    #[test]
    fn plain_names_are_not_keywords() {
        assert_eq!(TokenKind::keyword("mysql_query"), None);
        assert_eq!(TokenKind::keyword("strlen"), None);
    }

    #[test]
    fn trivia() {
        assert!(TokenKind::Whitespace.is_trivial());
        assert!(TokenKind::DocComment.is_trivial());
        assert!(!TokenKind::String.is_trivial());
        assert!(!TokenKind::Char('@').is_trivial());
    }
}
