//! Code generator tests on hand-built trees.

#![allow(clippy::float_cmp)]

mod common;

use arithc::{
    BinaryOperator, CodegenError, Expression, OperatorPosition, Token, TokenKind, UnaryOperator,
    compile,
};
use common::reference_eval;

#[test]
fn codegen_builder_tree() {
    let expression = (Expression::integer(2) + Expression::integer(3)).parenthesized()
        * Expression::integer(4).pow(Expression::integer(2));
    let function = compile(&expression).expect("compile");
    assert_eq!(function.call(), 80.0);
}

#[test]
fn codegen_left_operand_evaluated_first() {
    // Subtraction and division are not commutative, so operand order
    // shows up in the result.
    let expression = Expression::real(1.0) / (Expression::integer(8) - Expression::integer(6));
    assert_eq!(compile(&expression).expect("compile").call(), 0.5);
}

#[test]
fn codegen_matches_reference_on_deep_tree() {
    let mut expression = Expression::integer(1);
    for i in 1..200 {
        let operator = match i % 5 {
            0 => BinaryOperator::Add,
            1 => BinaryOperator::Multiply,
            2 => BinaryOperator::Subtract,
            3 => BinaryOperator::Divide,
            _ => BinaryOperator::Remainder,
        };
        expression = Expression::binary(expression, operator, Expression::real(f64::from(i) / 3.0));
    }
    let function = compile(&expression).expect("compile");
    assert_eq!(function.call().to_bits(), reference_eval(&expression).to_bits());
}

#[test]
fn codegen_right_nested_tree() {
    let mut expression = Expression::integer(0);
    for i in 0..100 {
        expression = Expression::integer(i) - expression;
    }
    let function = compile(&expression).expect("compile");
    assert_eq!(function.call(), reference_eval(&expression));
}

#[test]
fn codegen_tree_can_be_dropped_after_compile() {
    let function = {
        let expression = -Expression::real(2.5) * Expression::integer(2);
        compile(&expression).expect("compile")
    };
    assert_eq!(function.call(), -5.0);
}

#[test]
fn codegen_clone_shares_behaviour() {
    let function = compile(&(Expression::integer(9) % Expression::integer(4))).expect("compile");
    let copy = function.clone();
    assert_eq!(function.call(), copy.call());
}

// -----------------------------------------------------------
// Operators outside the generator's table are hard errors.
// -----------------------------------------------------------

#[test]
fn codegen_rejects_comparison_operator() {
    let expression = Expression::Binary {
        left: Box::new(Expression::integer(1)),
        operator: Token::new(TokenKind::LessEquals, 2, 7, "<=".to_string()),
        right: Box::new(Expression::integer(2)),
    };
    let err = compile(&expression).unwrap_err();
    assert_eq!(
        err,
        CodegenError {
            operator: "<=".to_string(),
            position: OperatorPosition::Binary,
            line: 2,
            column: 7,
        }
    );
}

#[test]
fn codegen_rejects_binary_only_operator_in_unary_position() {
    let expression = Expression::Unary {
        operator: Token::synthetic(TokenKind::Star),
        operand: Box::new(Expression::integer(1)),
    };
    let err = compile(&expression).unwrap_err();
    assert_eq!(err.position, OperatorPosition::Unary);
    assert!(err.to_string().starts_with("operation not supported: '*'"));
}

#[test]
fn codegen_rejects_unsupported_operator_deep_in_tree() {
    let bad = Expression::Binary {
        left: Box::new(Expression::integer(1)),
        operator: Token::synthetic(TokenKind::PipePipe),
        right: Box::new(Expression::integer(0)),
    };
    let expression = Expression::integer(1) + Expression::unary(UnaryOperator::Negate, bad);
    assert!(compile(&expression).is_err());
}

#[test]
fn codegen_error_converts_into_crate_error() {
    let err: arithc::Error = CodegenError {
        operator: "==".to_string(),
        position: OperatorPosition::Binary,
        line: 1,
        column: 1,
    }
    .into();
    assert!(matches!(err, arithc::Error::Codegen(_)));
}
