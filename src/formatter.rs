//! Pretty-printer that renders an expression tree back into source text.
//!
//! Binary operators get one space on each side, unary operators attach
//! to their operand, and reals always carry a decimal point. Parentheses
//! from the source are kept; extra ones are added only where a
//! hand-built tree would otherwise read back differently. Literals with
//! no source spelling (infinities, NaN, `i64::MIN`) print as a
//! parenthesized expression with the same value.

use std::fmt::{self, Write as _};

use crate::ast::{BinaryOperator, Expression};

/// Format an expression into canonical source text.
#[must_use]
pub fn format(expression: &Expression) -> String {
    let mut out = String::new();
    format_expression(&mut out, expression);
    out
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self))
    }
}

fn format_expression(out: &mut String, expression: &Expression) {
    match expression {
        Expression::Identifier(name) => out.push_str(name),
        // Its magnitude is one past `i64::MAX`, so it has no literal form.
        Expression::IntegerLiteral(i64::MIN) => out.push_str("(-9223372036854775807 - 1)"),
        Expression::IntegerLiteral(value) => {
            let _ = write!(out, "{value}");
        }
        Expression::RealLiteral(value) => format_real(out, *value),
        Expression::Parenthesized(inner) => {
            out.push('(');
            format_expression(out, inner);
            out.push(')');
        }
        Expression::Binary {
            left,
            operator,
            right,
        } => {
            let op = BinaryOperator::from_kind(operator.kind);
            format_operand(out, left, op.is_some_and(|op| needs_parens(left, op, false)));
            out.push(' ');
            out.push_str(&operator.text);
            out.push(' ');
            format_operand(out, right, op.is_some_and(|op| needs_parens(right, op, true)));
        }
        Expression::Unary { operator, operand } => {
            out.push_str(&operator.text);
            let grouped = matches!(operand.as_ref(), Expression::Binary { .. });
            format_operand(out, operand, grouped);
        }
    }
}

fn format_operand(out: &mut String, operand: &Expression, grouped: bool) {
    if grouped {
        out.push('(');
        format_expression(out, operand);
        out.push(')');
    } else {
        format_expression(out, operand);
    }
}

/// Whether a bare binary child of `parent` would bind differently when
/// read back.
fn needs_parens(child: &Expression, parent: BinaryOperator, is_right: bool) -> bool {
    let Expression::Binary { operator, .. } = child else {
        return false;
    };
    let Some(child) = BinaryOperator::from_kind(operator.kind) else {
        return true;
    };
    if child.precedence() != parent.precedence() {
        return child.precedence() < parent.precedence();
    }
    // Same level: only the side the operator associates toward is free.
    is_right != parent.is_right_associative()
}

/// Non-finite values have no literal syntax and are spelled as the
/// division that produces them.
fn format_real(out: &mut String, value: f64) {
    if value.is_nan() {
        out.push_str("(0.0 / 0.0)");
    } else if value.is_infinite() {
        out.push_str(if value > 0.0 { "(1.0 / 0.0)" } else { "(-1.0 / 0.0)" });
    } else {
        let start = out.len();
        let _ = write!(out, "{value}");
        if !out[start..].contains('.') {
            out.push_str(".0");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_binary_operators() {
        let expression = Expression::integer(2) + Expression::integer(3) * Expression::integer(4);
        assert_eq!(format(&expression), "2 + 3 * 4");
    }

    #[test]
    fn adds_parens_for_lower_precedence_child() {
        let expression = (Expression::integer(2) + Expression::integer(3)) * Expression::integer(4);
        assert_eq!(format(&expression), "(2 + 3) * 4");
    }

    #[test]
    fn keeps_source_parens() {
        let expression = Expression::integer(2).parenthesized() * Expression::integer(4);
        assert_eq!(format(&expression), "(2) * 4");
    }

    #[test]
    fn associativity() {
        let left = (Expression::integer(1) - Expression::integer(2)) - Expression::integer(3);
        assert_eq!(format(&left), "1 - 2 - 3");
        let right = Expression::integer(1) - (Expression::integer(2) - Expression::integer(3));
        assert_eq!(format(&right), "1 - (2 - 3)");
        let power = Expression::integer(2).pow(Expression::integer(3).pow(Expression::integer(2)));
        assert_eq!(format(&power), "2 ^ 3 ^ 2");
        let power = Expression::integer(2)
            .pow(Expression::integer(3))
            .pow(Expression::integer(2));
        assert_eq!(format(&power), "(2 ^ 3) ^ 2");
    }

    #[test]
    fn unary_attaches() {
        let expression = -Expression::identifier("x") + -(Expression::integer(1) + Expression::integer(2));
        assert_eq!(format(&expression), "-x + -(1 + 2)");
    }

    #[test]
    fn reals_keep_decimal_point() {
        assert_eq!(format(&Expression::real(2.0)), "2.0");
        assert_eq!(format(&Expression::real(0.125)), "0.125");
        assert_eq!(format(&Expression::real(1e21)), "1000000000000000000000.0");
    }

    #[test]
    fn literals_without_source_form() {
        assert_eq!(format(&Expression::real(f64::INFINITY)), "(1.0 / 0.0)");
        assert_eq!(format(&Expression::real(f64::NEG_INFINITY)), "(-1.0 / 0.0)");
        assert_eq!(format(&Expression::real(f64::NAN)), "(0.0 / 0.0)");
        assert_eq!(format(&Expression::real(-0.0)), "-0.0");
        assert_eq!(
            format(&Expression::integer(i64::MIN)),
            "(-9223372036854775807 - 1)"
        );
    }

    #[test]
    fn display_matches_format() {
        let expression = Expression::integer(5) % Expression::integer(3);
        assert_eq!(expression.to_string(), "5 % 3");
    }
}
