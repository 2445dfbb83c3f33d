#![allow(dead_code)]

use arithc::{BinaryOperator, Diagnostics, Expression, UnaryOperator, compile_str, parse};

/// Compile and run an expression that must be valid.
pub fn eval(input: &str) -> f64 {
    compile_str(input)
        .unwrap_or_else(|e| panic!("failed to compile {input:?}:\n{e}"))
        .call()
}

/// Parse an expression and return only the diagnostics.
pub fn diagnostics_for(input: &str) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let _ = parse(input, &mut diagnostics);
    diagnostics
}

/// Straightforward tree-walking evaluator used as an oracle for the
/// compiled code.
#[allow(clippy::cast_precision_loss)]
pub fn reference_eval(expression: &Expression) -> f64 {
    match expression {
        Expression::Identifier(_) => 0.0,
        Expression::IntegerLiteral(value) => *value as f64,
        Expression::RealLiteral(value) => *value,
        Expression::Parenthesized(inner) => reference_eval(inner),
        Expression::Binary {
            left,
            operator,
            right,
        } => {
            let l = reference_eval(left);
            let r = reference_eval(right);
            match BinaryOperator::from_kind(operator.kind) {
                Some(BinaryOperator::Add) => l + r,
                Some(BinaryOperator::Subtract) => l - r,
                Some(BinaryOperator::Multiply) => l * r,
                Some(BinaryOperator::Divide) => l / r,
                Some(BinaryOperator::Remainder) => l % r,
                Some(BinaryOperator::Power) => l.powf(r),
                None => panic!("unexpected operator {:?}", operator.kind),
            }
        }
        Expression::Unary { operator, operand } => {
            let value = reference_eval(operand);
            match UnaryOperator::from_kind(operator.kind) {
                Some(UnaryOperator::Negate) => -value,
                Some(UnaryOperator::Plus) => value,
                None => panic!("unexpected operator {:?}", operator.kind),
            }
        }
    }
}

/// Bitwise float equality that treats every NaN as equal.
pub fn same_value(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
}
