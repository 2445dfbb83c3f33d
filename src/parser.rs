use std::iter::Peekable;
use std::str::Chars;

use crate::ast::{BinaryOperator, Expression, UnaryOperator};
use crate::diagnostics::{DiagnosticKind, DiagnosticSink};
use crate::lexer::Lexer;
use crate::source::CharSource;
use crate::token::{Token, TokenKind};

/// Deepest expression tree the parser will build. Parentheses, unary
/// operators and binary operators each add a level.
pub const MAX_NESTING: usize = 256;

/// Parsed subtree together with its height.
type Parsed = (Expression, usize);

/// Parse the whole input as one expression.
///
/// Syntax errors are reported to `diagnostics`; a best-effort tree is
/// always returned. Newlines are insignificant.
pub fn parse(input: &str, diagnostics: &mut dyn DiagnosticSink) -> Expression {
    let mut parser = Parser::for_str(input, diagnostics);
    match parser.parse_expression() {
        Some(expression) => expression,
        None => parser.missing_expression(),
    }
}

/// Parse newline-separated expressions. A syntax error skips the rest
/// of its line and parsing resumes on the next one.
pub fn parse_all(input: &str, diagnostics: &mut dyn DiagnosticSink) -> Vec<Expression> {
    let mut parser = Parser::line_separated(Lexer::for_str(input, diagnostics));
    let mut expressions = Vec::new();
    while let Some(expression) = parser.parse_expression() {
        expressions.push(expression);
    }
    expressions
}

/// Precedence-climbing parser pulling tokens from a `Lexer`.
///
/// Grammar, loosest to tightest:
///
/// ```text
/// additive       := multiplicative (("+" | "-") multiplicative)*
/// multiplicative := power (("*" | "/" | "%") power)*
/// power          := unary ("^" power)?
/// unary          := ("+" | "-") unary | primary
/// primary        := number | identifier | "(" additive ")"
/// ```
pub struct Parser<'d, S> {
    lexer: Lexer<'d, S>,
    line_separated: bool,
    /// Open parentheses around the current position.
    depth: usize,
    /// Recursive descents in progress.
    nesting: usize,
    /// Set once the current expression has hit `MAX_NESTING`.
    too_deep: bool,
}

impl<'d, 'a> Parser<'d, Peekable<Chars<'a>>> {
    /// Single-expression parser over an in-memory string.
    #[must_use]
    pub fn for_str(input: &'a str, diagnostics: &'d mut dyn DiagnosticSink) -> Self {
        Self::new(Lexer::for_str(input, diagnostics))
    }
}

impl<'d, S: CharSource> Parser<'d, S> {
    /// Parser treating the whole input as one expression.
    #[must_use]
    pub const fn new(lexer: Lexer<'d, S>) -> Self {
        Self {
            lexer,
            line_separated: false,
            depth: 0,
            nesting: 0,
            too_deep: false,
        }
    }

    /// Parser treating each line as a separate expression.
    #[must_use]
    pub const fn line_separated(lexer: Lexer<'d, S>) -> Self {
        Self {
            lexer,
            line_separated: true,
            depth: 0,
            nesting: 0,
            too_deep: false,
        }
    }

    /// Parse the next expression, `None` once the input is exhausted.
    pub fn parse_expression(&mut self) -> Option<Expression> {
        self.skip_blank_lines();
        if self.peek_kind() == TokenKind::EndOfFile {
            return None;
        }
        self.too_deep = false;
        let (expression, _) = self.parse_binary(1);
        self.finish_expression();
        Some(expression)
    }

    pub fn is_at_end_of_input(&mut self) -> bool {
        self.skip_blank_lines();
        self.peek_kind() == TokenKind::EndOfFile
    }

    fn missing_expression(&mut self) -> Expression {
        self.peek_kind();
        let token = self.lexer.peek().clone();
        self.report_at(
            DiagnosticKind::ExpectedExpression {
                found: describe(&token),
            },
            &token,
        );
        Expression::Identifier(String::new())
    }

    fn parse_binary(&mut self, min_precedence: u8) -> Parsed {
        let (mut left, mut height) = self.parse_unary();
        while let Some(op) = BinaryOperator::from_kind(self.peek_kind()) {
            if op.precedence() < min_precedence {
                break;
            }
            let operator = self.lexer.read();
            let next = if op.is_right_associative() {
                op.precedence()
            } else {
                op.precedence() + 1
            };
            let (right, right_height) = if self.descend(&operator) {
                let right = self.parse_binary(next);
                self.nesting -= 1;
                right
            } else {
                self.parse_unary()
            };
            // The operands are still consumed past the limit, but the
            // tree stops growing.
            if height.max(right_height) >= MAX_NESTING {
                self.report_too_deep(&operator);
                continue;
            }
            height = height.max(right_height) + 1;
            left = Expression::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }
        (left, height)
    }

    fn parse_unary(&mut self) -> Parsed {
        if UnaryOperator::from_kind(self.peek_kind()).is_none() {
            return self.parse_primary();
        }
        let operator = self.lexer.read();
        if !self.descend(&operator) {
            while UnaryOperator::from_kind(self.peek_kind()).is_some() {
                self.lexer.read();
            }
            return self.parse_primary();
        }
        let operand = self.parse_unary();
        self.nesting -= 1;
        self.wrap(operator, operand, |operator, operand| Expression::Unary {
            operator,
            operand: Box::new(operand),
        })
    }

    fn parse_primary(&mut self) -> Parsed {
        match self.peek_kind() {
            TokenKind::Number => {
                let token = self.lexer.read();
                (self.parse_number(&token), 1)
            }
            TokenKind::Identifier => (Expression::Identifier(self.lexer.read().text), 1),
            TokenKind::LeftParen => {
                let open = self.lexer.read();
                if !self.descend(&open) {
                    self.skip_group();
                    return (Expression::Identifier(String::new()), 1);
                }
                self.depth += 1;
                let inner = self.parse_binary(1);
                self.expect_closing_paren();
                self.depth -= 1;
                self.nesting -= 1;
                self.wrap(open, inner, |_, inner| Expression::Parenthesized(Box::new(inner)))
            }
            kind => {
                let placeholder = self.missing_expression();
                // Leave tokens that can still close or continue the
                // expression for the caller.
                let recoverable = matches!(
                    kind,
                    TokenKind::EndOfFile | TokenKind::Newline | TokenKind::RightParen
                ) || BinaryOperator::from_kind(kind).is_some();
                if !recoverable {
                    self.lexer.read();
                }
                (placeholder, 1)
            }
        }
    }

    /// Enter one more level of recursion, or report and refuse once
    /// `MAX_NESTING` levels are open.
    fn descend(&mut self, token: &Token) -> bool {
        if self.nesting >= MAX_NESTING {
            self.report_too_deep(token);
            return false;
        }
        self.nesting += 1;
        true
    }

    /// Wrap a subtree in a new node unless that would exceed
    /// `MAX_NESTING`, in which case the subtree is returned bare.
    fn wrap(
        &mut self,
        token: Token,
        (child, height): Parsed,
        build: impl FnOnce(Token, Expression) -> Expression,
    ) -> Parsed {
        if height >= MAX_NESTING {
            self.report_too_deep(&token);
            return (child, height);
        }
        (build(token, child), height + 1)
    }

    fn report_too_deep(&mut self, token: &Token) {
        if self.too_deep {
            return;
        }
        self.too_deep = true;
        self.report_at(
            DiagnosticKind::NestingTooDeep {
                limit: MAX_NESTING,
            },
            token,
        );
    }

    /// Consume tokens up to the `)` matching an already-read `(`
    /// without building a tree.
    fn skip_group(&mut self) {
        let mut open = 1usize;
        loop {
            match self.lexer.read().kind {
                TokenKind::LeftParen => open += 1,
                TokenKind::RightParen => {
                    open -= 1;
                    if open == 0 {
                        return;
                    }
                }
                TokenKind::EndOfFile => return,
                _ => {}
            }
        }
    }

    fn parse_number(&mut self, token: &Token) -> Expression {
        if token.text.contains('.') {
            if let Ok(value) = token.text.parse::<f64>() {
                return Expression::RealLiteral(value);
            }
            self.report_at(DiagnosticKind::InvalidNumber(token.text.clone()), token);
            Expression::RealLiteral(0.0)
        } else {
            if let Ok(value) = token.text.parse::<i64>() {
                return Expression::IntegerLiteral(value);
            }
            self.report_at(
                DiagnosticKind::IntegerOutOfRange(token.text.clone()),
                token,
            );
            Expression::IntegerLiteral(0)
        }
    }

    fn expect_closing_paren(&mut self) {
        if self.peek_kind() == TokenKind::RightParen {
            self.lexer.read();
            return;
        }
        let token = self.lexer.peek().clone();
        self.report_at(
            DiagnosticKind::ExpectedClosingParen {
                found: describe(&token),
            },
            &token,
        );
    }

    /// Require end of line or input after an expression, skipping to it
    /// when anything else follows.
    fn finish_expression(&mut self) {
        match self.peek_kind() {
            TokenKind::EndOfFile => return,
            TokenKind::Newline => {
                self.lexer.read();
                return;
            }
            _ => {}
        }

        let token = self.lexer.read();
        self.report_at(
            DiagnosticKind::UnexpectedToken {
                found: describe(&token),
            },
            &token,
        );

        loop {
            match self.lexer.read().kind {
                TokenKind::EndOfFile => break,
                TokenKind::Newline if self.line_separated => break,
                _ => {}
            }
        }
    }

    fn skip_blank_lines(&mut self) {
        while self.peek_kind() == TokenKind::Newline {
            self.lexer.read();
        }
    }

    /// Kind of the next significant token. Whitespace, invalid tokens
    /// (already reported by the lexer), and insignificant newlines are
    /// consumed.
    fn peek_kind(&mut self) -> TokenKind {
        loop {
            let kind = self.lexer.peek().kind;
            let skip = kind.is_trivia()
                || kind == TokenKind::Invalid
                || (kind == TokenKind::Newline && self.newline_is_trivia());
            if !skip {
                return kind;
            }
            self.lexer.read();
        }
    }

    const fn newline_is_trivia(&self) -> bool {
        !self.line_separated || self.depth > 0
    }

    fn report_at(&mut self, kind: DiagnosticKind, token: &Token) {
        self.lexer.report(kind, token.span());
    }
}

fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::EndOfFile | TokenKind::Newline => token.kind.to_string(),
        _ => token.text.clone(),
    }
}
