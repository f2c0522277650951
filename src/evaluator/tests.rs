//! Unit tests for the evaluator module.

use super::evaluator::{evaluate, parse_int_literal, BinaryOperator, UnaryOperator};
use crate::{
    ast::ast::Expr,
    errors::errors::ErrorImpl,
    lexer::{lexer::tokenize, tokens::{Token, TokenKind}},
    parser::parser::parse,
    Position, Span, MK_TOKEN,
};

fn eval(source: &str) -> i64 {
    evaluate(&parse(tokenize(source)).unwrap()).unwrap()
}

fn eval_error(source: &str) -> (ErrorImpl, u32) {
    let error = evaluate(&parse(tokenize(source)).unwrap()).unwrap_err();
    (error.get_kind().clone(), error.get_position().0)
}

fn token(kind: TokenKind, literal: &str) -> Token {
    MK_TOKEN!(kind, literal.to_string(), Span::default())
}

fn int_literal(literal: &str) -> Result<i64, ErrorImpl> {
    parse_int_literal(&token(TokenKind::Int, literal)).map_err(|error| error.get_kind().clone())
}

#[test]
fn test_evaluate_binary_expressions() {
    let cases = vec![
        ("1 + 2", 3),
        ("1+2+3", 6),
        ("1*2+3+4+5+1*2", 16),
        ("1 + 2 * 3", 7),
        ("1 * 2 + 3", 5),
        ("1+2+3+4", 10),
        ("1*2+3*4", 14),
        ("1*2+3*4+5*6+7*8+9", 109),
        ("1*2+3*4+5*6+7*8+9+100", 209),
    ];

    for (source, expected) in cases {
        assert_eq!(eval(source), expected, "evaluating {}", source);
    }
}

#[test]
fn test_evaluate_left_associative_subtraction_and_division() {
    assert_eq!(eval("10 - 4 - 3"), 3);
    assert_eq!(eval("100 / 10 / 5"), 2);
    assert_eq!(eval("10 - 6 / 2"), 7);
    assert_eq!(eval("2 * 3 / 4"), 1);
}

#[test]
fn test_evaluate_unary_chains() {
    assert_eq!(eval("+1"), 1);
    assert_eq!(eval("-1"), -1);
    assert_eq!(eval("--1"), 1);
    assert_eq!(eval("---5"), -5);
    assert_eq!(eval("+1+-+-+-1"), 0);
    assert_eq!(eval("2*-3"), -6);
    assert_eq!(eval("-2--3"), 1);
}

#[test]
fn test_division_truncates_toward_zero() {
    assert_eq!(eval("7 / 2"), 3);
    assert_eq!(eval("-7 / 2"), -3);
    assert_eq!(eval("7 / -2"), -3);
    assert_eq!(eval("-7 / -2"), 3);
}

#[test]
fn test_division_by_zero() {
    assert_eq!(eval_error("1 / 0"), (ErrorImpl::DivisionByZero, 2));
    assert_eq!(eval_error("5 + 6 / -0"), (ErrorImpl::DivisionByZero, 6));
    assert_eq!(eval_error("7 * 3 / 000"), (ErrorImpl::DivisionByZero, 6));
}

#[test]
fn test_invalid_literal() {
    assert_eq!(
        eval_error("99999999999999999999 + 1"),
        (
            ErrorImpl::InvalidLiteral {
                literal: "99999999999999999999".to_string()
            },
            0
        )
    );
    assert_eq!(
        eval_error("-9223372036854775808").0,
        ErrorImpl::InvalidLiteral {
            literal: "9223372036854775808".to_string()
        }
    );
}

#[test]
fn test_wrapping_arithmetic() {
    assert_eq!(eval("9223372036854775807 + 1"), i64::MIN);
    assert_eq!(eval("-9223372036854775807 - 2"), i64::MAX);
    assert_eq!(eval("4611686018427387904 * 2"), i64::MIN);
}

#[test]
fn test_parse_int_literal_prefixes() {
    assert_eq!(int_literal("42"), Ok(42));
    assert_eq!(int_literal("007"), Ok(7));
    assert_eq!(int_literal("010"), Ok(10));
    assert_eq!(eval("010"), 10);
    assert_eq!(int_literal("0x1F"), Ok(31));
    assert_eq!(int_literal("0XfF"), Ok(255));
    assert_eq!(int_literal("0o17"), Ok(15));
    assert_eq!(int_literal("0b101"), Ok(5));
    assert_eq!(int_literal("1_000_000"), Ok(1_000_000));
    assert_eq!(int_literal("-12"), Ok(-12));
    assert_eq!(int_literal("+12"), Ok(12));
    assert_eq!(int_literal("-9223372036854775808"), Ok(i64::MIN));
    assert_eq!(int_literal("9223372036854775807"), Ok(i64::MAX));
}

#[test]
fn test_parse_int_literal_rejects() {
    for literal in [
        "", "-", "0x", "abc", "1.5", "0b102", "0o8", "_1", "1_", "1__0", "--1", "0x-1", "+-1",
        "9223372036854775808", "-9223372036854775809",
    ] {
        assert_eq!(
            int_literal(literal),
            Err(ErrorImpl::InvalidLiteral {
                literal: literal.to_string()
            }),
            "parsing {:?}",
            literal
        );
    }
}

#[test]
fn test_non_integer_leaf() {
    let expr = Expr::literal(token(TokenKind::Ident, "x"));

    assert_eq!(
        evaluate(&expr).unwrap_err().get_kind(),
        &ErrorImpl::InvalidLiteral { literal: "x".to_string() }
    );
}

#[test]
fn test_unknown_binary_operator() {
    let expr = Expr::binary(
        Expr::literal(token(TokenKind::Int, "1")),
        MK_TOKEN!(TokenKind::Lt, "<".to_string(), Span { start: Position(2), end: Position(3) }),
        Expr::literal(token(TokenKind::Int, "2")),
    );

    let error = evaluate(&expr).unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::UnknownOperator { operator: "<".to_string() });
    assert_eq!(error.get_position().0, 2);
}

#[test]
fn test_unknown_unary_operator() {
    let expr = Expr::unary_chain(
        token(TokenKind::Int, "1"),
        vec![token(TokenKind::Minus, "-"), token(TokenKind::Asterisk, "*")],
    );

    assert_eq!(
        evaluate(&expr).unwrap_err().get_kind(),
        &ErrorImpl::UnknownOperator { operator: "*".to_string() }
    );
}

#[test]
fn test_operator_tables() {
    assert_eq!(BinaryOperator::Divide.apply(1, 0), None);
    assert_eq!(BinaryOperator::Divide.apply(i64::MIN, -1), Some(i64::MIN));
    assert_eq!(BinaryOperator::Subtract.apply(3, 5), Some(-2));
    assert_eq!(UnaryOperator::Negate.apply(i64::MIN), i64::MIN);
    assert_eq!(UnaryOperator::Identity.apply(-4), -4);
    assert!(UnaryOperator::from_token(&token(TokenKind::Slash, "/")).is_err());
    assert_eq!(
        BinaryOperator::from_token(&token(TokenKind::Asterisk, "*")).unwrap(),
        BinaryOperator::Multiply
    );
}

#[test]
fn test_evaluate_deep_left_nested_tree() {
    let mut expr = Expr::literal(token(TokenKind::Int, "0"));
    for i in 1..=150_000 {
        let operator = if i % 2 == 0 { token(TokenKind::Minus, "-") } else { token(TokenKind::Plus, "+") };
        expr = Expr::binary(expr, operator, Expr::literal(token(TokenKind::Int, "3")));
    }

    // 75 000 additions and 75 000 subtractions of 3
    assert_eq!(evaluate(&expr).unwrap(), 0);

    let divided = Expr::binary(
        expr,
        MK_TOKEN!(TokenKind::Slash, "/".to_string(), Span { start: Position(9), end: Position(10) }),
        Expr::literal(token(TokenKind::Int, "0")),
    );
    let error = evaluate(&divided).unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::DivisionByZero);
    assert_eq!(error.get_position().0, 9);
}
