//! Unit tests for the expression tree and its canonical string form.

use pretty_assertions::assert_eq;

use super::ast::{stringify, Expr, Visit};
use crate::{
    lexer::tokens::{Token, TokenKind},
    Span, MK_TOKEN,
};

fn token(kind: TokenKind, literal: &str) -> Token {
    MK_TOKEN!(kind, literal.to_string(), Span::default())
}

fn int(literal: &str) -> Expr {
    Expr::literal(token(TokenKind::Int, literal))
}

#[test]
fn test_stringify_leaf() {
    assert_eq!(stringify(&int("1")), "{1}");
}

#[test]
fn test_stringify_binary() {
    let expr = Expr::binary(int("1"), token(TokenKind::Plus, "+"), int("2"));

    assert_eq!(stringify(&expr), "{+,{1},{2}}");
}

#[test]
fn test_stringify_nested_binary() {
    let product = Expr::binary(int("2"), token(TokenKind::Asterisk, "*"), int("3"));
    let expr = Expr::binary(int("1"), token(TokenKind::Plus, "+"), product);

    assert_eq!(stringify(&expr), "{+,{1},{*,{2},{3}}}");
}

#[test]
fn test_stringify_unary_chain() {
    let single = Expr::unary_chain(token(TokenKind::Int, "2"), vec![token(TokenKind::Plus, "+")]);
    assert_eq!(stringify(&single), "{2,{+}}");

    let chain = Expr::unary_chain(
        token(TokenKind::Int, "1"),
        vec![
            token(TokenKind::Minus, "-"),
            token(TokenKind::Plus, "+"),
            token(TokenKind::Minus, "-"),
        ],
    );
    assert_eq!(stringify(&chain), "{1,{-,{+,{-}}}}");
}

#[test]
fn test_empty_unary_chain_is_literal() {
    let expr = Expr::unary_chain(token(TokenKind::Int, "5"), vec![]);

    assert_eq!(expr, int("5"));
}

#[test]
fn test_stringify_is_pure() {
    let expr = Expr::binary(
        Expr::unary_chain(token(TokenKind::Int, "1"), vec![token(TokenKind::Minus, "-")]),
        token(TokenKind::Slash, "/"),
        int("7"),
    );

    assert_eq!(stringify(&expr), stringify(&expr));
    assert_eq!(expr.to_string(), stringify(&expr));
    assert_eq!(stringify(&expr), "{/,{1,{-}},{7}}");
}

#[test]
fn test_root_token() {
    let expr = Expr::binary(int("1"), token(TokenKind::Minus, "-"), int("2"));

    assert_eq!(expr.token().kind, TokenKind::Minus);
    assert_eq!(int("9").token().literal, "9");
}

/// `1 + 1 + ... + 1` with `terms` operands, nested to the left.
fn left_nested_sum(terms: usize) -> Expr {
    let mut expr = int("1");
    for _ in 1..terms {
        expr = Expr::binary(expr, token(TokenKind::Plus, "+"), int("1"));
    }
    expr
}

#[test]
fn test_post_order_visits_operands_first() {
    let product = Expr::binary(int("2"), token(TokenKind::Asterisk, "*"), int("3"));
    let expr = Expr::binary(
        Expr::unary_chain(token(TokenKind::Int, "1"), vec![token(TokenKind::Minus, "-")]),
        token(TokenKind::Plus, "+"),
        product,
    );

    let rendered: Vec<String> = expr
        .post_order()
        .map(|visit| match visit {
            Visit::Literal(token) => token.literal.clone(),
            Visit::UnaryChain { literal, operators } => format!("{}/{}", literal.literal, operators.len()),
            Visit::Binary(operator) => operator.literal.clone(),
        })
        .collect();

    assert_eq!(rendered, vec!["1/1", "2", "3", "*", "+"]);
}

#[test]
fn test_structural_equality() {
    let sum = Expr::binary(int("1"), token(TokenKind::Plus, "+"), int("2"));

    assert_eq!(sum, Expr::binary(int("1"), token(TokenKind::Plus, "+"), int("2")));
    assert_ne!(sum, Expr::binary(int("1"), token(TokenKind::Minus, "-"), int("2")));
    assert_ne!(sum, int("1"));

    // Same post-order leaves, different shape
    let left = Expr::binary(
        Expr::binary(int("1"), token(TokenKind::Plus, "+"), int("2")),
        token(TokenKind::Plus, "+"),
        int("3"),
    );
    let right = Expr::binary(
        int("1"),
        token(TokenKind::Plus, "+"),
        Expr::binary(int("2"), token(TokenKind::Plus, "+"), int("3")),
    );
    assert_ne!(left, right);
}

#[test]
fn test_deep_tree_clone_compare_stringify_and_drop() {
    let expr = left_nested_sum(200_000);

    let copy = expr.clone();
    assert!(copy == expr);

    let rendered = stringify(&copy);
    assert!(rendered.starts_with("{+,{+,{+,"));
    assert!(rendered.ends_with("{1}},{1}},{1}}"));
    assert_eq!(rendered.matches("{1}").count(), 200_000);

    drop(copy);
    drop(expr);
}
