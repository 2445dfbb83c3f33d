use std::ops;

use crate::ast::{BinaryOperator, Expression, UnaryOperator};
use crate::token::Token;

impl Expression {
    /// Integer literal node.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::IntegerLiteral(value)
    }

    /// Real literal node.
    #[must_use]
    pub const fn real(value: f64) -> Self {
        Self::RealLiteral(value)
    }

    /// Identifier node.
    #[must_use]
    pub fn identifier(name: &str) -> Self {
        Self::Identifier(name.to_string())
    }

    /// Wrap in parentheses.
    #[must_use]
    pub fn parenthesized(self) -> Self {
        Self::Parenthesized(Box::new(self))
    }

    /// Binary node with a synthesized operator token.
    #[must_use]
    pub fn binary(left: Self, operator: BinaryOperator, right: Self) -> Self {
        Self::Binary {
            left: Box::new(left),
            operator: Token::synthetic(operator.token_kind()),
            right: Box::new(right),
        }
    }

    /// Unary node with a synthesized operator token.
    #[must_use]
    pub fn unary(operator: UnaryOperator, operand: Self) -> Self {
        Self::Unary {
            operator: Token::synthetic(operator.token_kind()),
            operand: Box::new(operand),
        }
    }

    /// `self ^ exponent`.
    #[must_use]
    pub fn pow(self, exponent: Self) -> Self {
        Self::binary(self, BinaryOperator::Power, exponent)
    }
}

macro_rules! binary_op {
    ($trait:ident, $method:ident, $operator:expr) => {
        impl ops::$trait for Expression {
            type Output = Self;

            fn $method(self, right: Self) -> Self {
                Self::binary(self, $operator, right)
            }
        }
    };
}

binary_op!(Add, add, BinaryOperator::Add);
binary_op!(Sub, sub, BinaryOperator::Subtract);
binary_op!(Mul, mul, BinaryOperator::Multiply);
binary_op!(Div, div, BinaryOperator::Divide);
binary_op!(Rem, rem, BinaryOperator::Remainder);

impl ops::Neg for Expression {
    type Output = Self;

    fn neg(self) -> Self {
        Self::unary(UnaryOperator::Negate, self)
    }
}
