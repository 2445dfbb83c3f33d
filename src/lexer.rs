use std::iter::Peekable;
use std::str::Chars;

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::source::CharSource;
use crate::token::{Span, Token, TokenKind};

/// Indentation width counted for one tab at the start of a line.
pub const TAB_WIDTH: usize = 4;

/// Reserved words, spelled with a leading capital.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("Let", TokenKind::Let),
    ("True", TokenKind::True),
    ("False", TokenKind::False),
    ("If", TokenKind::If),
    ("Then", TokenKind::Then),
    ("Else", TokenKind::Else),
];

/// Look up a word in the reserved word table after capitalizing its
/// first letter. The rest of the word is matched case-sensitively.
#[must_use]
pub fn keyword_kind(word: &str) -> Option<TokenKind> {
    let mut chars = word.chars();
    let first = chars.next()?;
    let capitalized: String = first.to_uppercase().chain(chars).collect();
    KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == capitalized)
        .map(|(_, kind)| *kind)
}

/// Tokenize a source string, ending with an `EndOfFile` token.
///
/// Lexical errors are reported to `diagnostics` and surface as
/// `Invalid` tokens; scanning never stops early.
pub fn tokenize(input: &str, diagnostics: &mut dyn DiagnosticSink) -> Vec<Token> {
    let mut lexer = Lexer::for_str(input, diagnostics);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.read();
        let done = token.kind == TokenKind::EndOfFile;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

/// Converts a character stream into tokens on demand, with one token
/// of lookahead.
pub struct Lexer<'d, S> {
    source: S,
    diagnostics: &'d mut dyn DiagnosticSink,
    line: usize,
    column: usize,
    indentation: usize,
    peeked: Option<Token>,
}

impl<'d, 'a> Lexer<'d, Peekable<Chars<'a>>> {
    /// Lexer over an in-memory string.
    #[must_use]
    pub fn for_str(input: &'a str, diagnostics: &'d mut dyn DiagnosticSink) -> Self {
        Self::new(input.chars().peekable(), diagnostics)
    }
}

impl<'d, S: CharSource> Lexer<'d, S> {
    #[must_use]
    pub const fn new(source: S, diagnostics: &'d mut dyn DiagnosticSink) -> Self {
        Self {
            source,
            diagnostics,
            line: 1,
            column: 1,
            indentation: 0,
            peeked: None,
        }
    }

    /// Next token without consuming it. Repeated calls return the same
    /// token until `read` is called.
    pub fn peek(&mut self) -> &Token {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.scan(),
        };
        self.peeked.insert(token)
    }

    /// Consume and return the next token.
    pub fn read(&mut self) -> Token {
        match self.peeked.take() {
            Some(token) => token,
            None => self.scan(),
        }
    }

    pub fn is_at_end_of_input(&mut self) -> bool {
        self.peek().kind == TokenKind::EndOfFile
    }

    /// Whether the next unread character is a line terminator.
    pub fn is_at_end_of_line(&mut self) -> bool {
        matches!(self.source.peek_char(), Some('\n' | '\r'))
    }

    /// Line of the next unread character.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Column of the next unread character.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Indentation of the current line: spaces count one, tabs count
    /// `TAB_WIDTH`.
    #[must_use]
    pub const fn indentation(&self) -> usize {
        self.indentation
    }

    pub(crate) fn report(&mut self, kind: DiagnosticKind, span: Span) {
        self.diagnostics.report(Diagnostic { kind, span });
    }

    fn scan(&mut self) -> Token {
        let line = self.line;
        let column = self.column;

        let Some(ch) = self.source.peek_char() else {
            return Token::new(TokenKind::EndOfFile, line, column, String::new());
        };

        match ch {
            ' ' | '\t' if column == 1 => self.scan_indentation(),
            ' ' | '\t' => self.scan_run(TokenKind::Whitespace, |c| matches!(c, ' ' | '\t')),
            '\n' | '\r' => self.scan_newline(),
            c if c.is_alphabetic() => {
                let mut token = self.scan_run(TokenKind::Identifier, char::is_alphanumeric);
                if let Some(kind) = keyword_kind(&token.text) {
                    token.kind = kind;
                }
                token
            }
            c if c.is_ascii_digit() => {
                self.scan_run(TokenKind::Number, |c| c.is_ascii_digit() || c == '.')
            }
            _ => self.scan_operator(),
        }
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.source.next_char()?;
        self.column += 1;
        Some(ch)
    }

    /// Consume `expected` if it is the next character.
    fn bump_if(&mut self, expected: char, text: &mut String) -> bool {
        if self.source.peek_char() == Some(expected) {
            self.bump();
            text.push(expected);
            true
        } else {
            false
        }
    }

    fn scan_run(&mut self, kind: TokenKind, accept: impl Fn(char) -> bool) -> Token {
        let line = self.line;
        let column = self.column;
        let mut text = String::new();
        while let Some(ch) = self.source.peek_char() {
            if !accept(ch) {
                break;
            }
            self.bump();
            text.push(ch);
        }
        Token::new(kind, line, column, text)
    }

    fn scan_indentation(&mut self) -> Token {
        let token = self.scan_run(TokenKind::Indentation, |c| matches!(c, ' ' | '\t'));
        self.indentation += token
            .text
            .chars()
            .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
            .sum::<usize>();
        token
    }

    fn scan_newline(&mut self) -> Token {
        let line = self.line;
        let column = self.column;
        let mut text = String::new();
        if let Some(ch) = self.bump() {
            text.push(ch);
            if ch == '\r' {
                self.bump_if('\n', &mut text);
            }
        }
        self.line += 1;
        self.column = 1;
        self.indentation = 0;
        Token::new(TokenKind::Newline, line, column, text)
    }

    fn scan_operator(&mut self) -> Token {
        let line = self.line;
        let column = self.column;
        let Some(ch) = self.bump() else {
            return Token::new(TokenKind::EndOfFile, line, column, String::new());
        };
        let mut text = String::from(ch);

        let kind = match ch {
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Star),
            '/' => Some(TokenKind::Slash),
            '%' => Some(TokenKind::Percent),
            '^' => Some(TokenKind::Caret),
            '(' => Some(TokenKind::LeftParen),
            ')' => Some(TokenKind::RightParen),
            ',' => Some(TokenKind::Comma),
            ';' => Some(TokenKind::Semicolon),
            '=' if self.bump_if('=', &mut text) => Some(TokenKind::EqualsEquals),
            '=' => Some(TokenKind::Equals),
            '!' if self.bump_if('=', &mut text) => Some(TokenKind::BangEquals),
            '!' => Some(TokenKind::Bang),
            '<' if self.bump_if('=', &mut text) => Some(TokenKind::LessEquals),
            '<' => Some(TokenKind::Less),
            '>' if self.bump_if('=', &mut text) => Some(TokenKind::GreaterEquals),
            '>' => Some(TokenKind::Greater),
            // Only the doubled forms exist; a lone `&` or `|` is invalid.
            '&' if self.bump_if('&', &mut text) => Some(TokenKind::AmpersandAmpersand),
            '|' if self.bump_if('|', &mut text) => Some(TokenKind::PipePipe),
            _ => None,
        };

        let Some(kind) = kind else {
            self.report(
                DiagnosticKind::InvalidToken(ch),
                Span::on_line(line, column, 1),
            );
            return Token::new(TokenKind::Invalid, line, column, text);
        };
        Token::new(kind, line, column, text)
    }
}
