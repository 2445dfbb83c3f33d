use std::fmt;

use crate::token::Span;

/// Classifies a diagnostic. Each variant is a message template plus the
/// values substituted into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Character that cannot start any token.
    InvalidToken(char),
    /// Number literal that is not a valid real (`1.2.3`).
    InvalidNumber(String),
    /// Integer literal that does not fit in 64 bits.
    IntegerOutOfRange(String),
    /// An operand was required.
    ExpectedExpression { found: String },
    /// Expected `)` to close a group.
    ExpectedClosingParen { found: String },
    /// Token that cannot continue the expression.
    UnexpectedToken { found: String },
    /// Expression nests deeper than the parser allows.
    NestingTooDeep { limit: usize },
}

impl DiagnosticKind {
    /// Stable template key, for hosts that localize messages.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::InvalidToken(_) => "invalid_token",
            Self::InvalidNumber(_) => "invalid_number",
            Self::IntegerOutOfRange(_) => "integer_out_of_range",
            Self::ExpectedExpression { .. } => "expected_expression",
            Self::ExpectedClosingParen { .. } => "expected_closing_paren",
            Self::UnexpectedToken { .. } => "unexpected_token",
            Self::NestingTooDeep { .. } => "nesting_too_deep",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken(ch) => write!(f, "invalid token '{ch}'"),
            Self::InvalidNumber(text) => write!(f, "invalid number literal '{text}'"),
            Self::IntegerOutOfRange(text) => {
                write!(f, "integer literal '{text}' is out of range")
            }
            Self::ExpectedExpression { found } => {
                write!(f, "expected expression, got '{found}'")
            }
            Self::ExpectedClosingParen { found } => write!(f, "expected ')', got '{found}'"),
            Self::UnexpectedToken { found } => write!(f, "unexpected token '{found}'"),
            Self::NestingTooDeep { limit } => {
                write!(f, "expression nested more than {limit} levels deep")
            }
        }
    }
}

/// A lexical or syntax error report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.start.line, span.start.column)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
}

/// Append-only sink the lexer and parser report into.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in the order they were reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}
