use std::fmt;

use crate::token::{Token, TokenKind};

/// Expression tree. Each node owns its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Name reference. No binding environment exists, so it evaluates to 0.
    Identifier(String),
    IntegerLiteral(i64),
    RealLiteral(f64),
    /// `( inner )`, kept so the tree mirrors the source.
    Parenthesized(Box<Self>),
    Binary {
        left: Box<Self>,
        operator: Token,
        right: Box<Self>,
    },
    Unary {
        operator: Token,
        operand: Box<Self>,
    },
}

/// Binary operators the code generator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Power,
}

impl BinaryOperator {
    /// Resolve an operator token kind, `None` for anything else.
    #[must_use]
    pub const fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Add),
            TokenKind::Minus => Some(Self::Subtract),
            TokenKind::Star => Some(Self::Multiply),
            TokenKind::Slash => Some(Self::Divide),
            TokenKind::Percent => Some(Self::Remainder),
            TokenKind::Caret => Some(Self::Power),
            _ => None,
        }
    }

    #[must_use]
    pub const fn token_kind(self) -> TokenKind {
        match self {
            Self::Add => TokenKind::Plus,
            Self::Subtract => TokenKind::Minus,
            Self::Multiply => TokenKind::Star,
            Self::Divide => TokenKind::Slash,
            Self::Remainder => TokenKind::Percent,
            Self::Power => TokenKind::Caret,
        }
    }

    /// Binding strength; higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide | Self::Remainder => 2,
            Self::Power => 3,
        }
    }

    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Power)
    }
}

/// Prefix operators the code generator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Identity, emits no code.
    Plus,
    Negate,
}

impl UnaryOperator {
    #[must_use]
    pub const fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Plus),
            TokenKind::Minus => Some(Self::Negate),
            _ => None,
        }
    }

    #[must_use]
    pub const fn token_kind(self) -> TokenKind {
        match self {
            Self::Plus => TokenKind::Plus,
            Self::Negate => TokenKind::Minus,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token_kind())
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token_kind())
    }
}
