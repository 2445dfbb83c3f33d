//! Formatter-specific tests.

mod common;

use arithc::{Diagnostics, Expression, format, parse};

fn reformat(input: &str) -> String {
    let mut diagnostics = Diagnostics::new();
    let expression = parse(input, &mut diagnostics);
    assert!(diagnostics.is_empty(), "{diagnostics}");
    format(&expression)
}

#[test]
fn format_normalises_spacing() {
    assert_eq!(reformat("1+2   *3"), "1 + 2 * 3");
    assert_eq!(reformat("\t( 4 )^ - 1"), "(4) ^ -1");
}

#[test]
fn format_keeps_integer_and_real_spelling() {
    assert_eq!(reformat("2 + 2.0 + 2.50 + 007"), "2 + 2.0 + 2.5 + 7");
}

#[test]
fn format_is_idempotent() {
    for input in ["-(1+2)^3%x", "((a))", "1-(2-3)", "2^3^4", "+1*-2/+3"] {
        let once = reformat(input);
        assert_eq!(reformat(&once), once, "input {input:?}");
    }
}

#[test]
fn format_groups_hand_built_trees() {
    let expression = (Expression::integer(1) + Expression::integer(2)).pow(Expression::integer(3));
    let text = format(&expression);
    assert_eq!(text, "(1 + 2) ^ 3");
    assert_eq!(common::eval(&text), 27.0_f64);
}

#[test]
fn format_unary_of_binary() {
    let expression = -(Expression::identifier("a") * Expression::identifier("b"));
    assert_eq!(format(&expression), "-(a * b)");
}

#[test]
fn format_literals_without_source_spelling_read_back() {
    let expressions = [
        Expression::real(f64::INFINITY),
        -Expression::real(f64::NEG_INFINITY),
        Expression::integer(i64::MIN) * Expression::integer(2),
        Expression::real(-2.5).pow(Expression::integer(2)),
    ];
    for expression in expressions {
        let text = format(&expression);
        let value = common::eval(&text);
        assert!(
            common::same_value(value, common::reference_eval(&expression)),
            "{text} read back as {value}"
        );
    }
    assert!(common::eval(&format(&Expression::real(f64::NAN))).is_nan());
}
