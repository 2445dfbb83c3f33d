use std::fmt;

/// A 1-based line/column location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Source range for diagnostics. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Span covering `length` characters on one line.
    #[must_use]
    pub const fn on_line(line: usize, column: usize, length: usize) -> Self {
        Self {
            start: Position { line, column },
            end: Position {
                line,
                column: column + length,
            },
        }
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Arithmetic operators.
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,

    // Comparison and logic operators.
    Equals,
    EqualsEquals,
    Bang,
    BangEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    AmpersandAmpersand,
    PipePipe,

    /// Digit run, possibly with `.` characters.
    Number,
    Identifier,

    // Reserved words.
    Let,
    True,
    False,
    If,
    Then,
    Else,

    LeftParen,
    RightParen,
    Comma,
    Semicolon,

    /// Run of spaces/tabs at the start of a line.
    Indentation,
    /// Run of spaces/tabs after the first token of a line.
    Whitespace,
    /// `\n`, `\r\n`, or a lone `\r`.
    Newline,

    EndOfFile,
    /// Character that cannot start any token.
    Invalid,
}

impl TokenKind {
    /// Whitespace-like tokens the parser never looks at.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Indentation | Self::Whitespace)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Caret => "^",
            Self::Equals => "=",
            Self::EqualsEquals => "==",
            Self::Bang => "!",
            Self::BangEquals => "!=",
            Self::Less => "<",
            Self::LessEquals => "<=",
            Self::Greater => ">",
            Self::GreaterEquals => ">=",
            Self::AmpersandAmpersand => "&&",
            Self::PipePipe => "||",
            Self::Number => "number",
            Self::Identifier => "identifier",
            Self::Let => "let",
            Self::True => "true",
            Self::False => "false",
            Self::If => "if",
            Self::Then => "then",
            Self::Else => "else",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Indentation => "indentation",
            Self::Whitespace => "whitespace",
            Self::Newline => "newline",
            Self::EndOfFile => "end of input",
            Self::Invalid => "invalid token",
        };
        f.write_str(text)
    }
}

/// A single token with its kind, text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
    /// Length in characters.
    pub length: usize,
    pub text: String,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, line: usize, column: usize, text: String) -> Self {
        Self {
            kind,
            line,
            column,
            length: text.chars().count(),
            text,
        }
    }

    /// Operator token not backed by any source text (line and column 0).
    #[must_use]
    pub fn synthetic(kind: TokenKind) -> Self {
        Self::new(kind, 0, 0, kind.to_string())
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        Span::on_line(self.line, self.column, self.length)
    }
}
