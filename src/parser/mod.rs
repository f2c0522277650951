//! Parser module for building the expression tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into an [`Expr`](crate::ast::ast::Expr). It is a precedence-climbing
//! parser that keeps its pending operands on an explicit frame stack
//! instead of recursing, and handles:
//!
//! - Integer literals and chains of unary `+`/`-` prefixes
//! - Binary `+ - * /` with `*`/`/` binding tighter than `+`/`-`
//! - Left associativity between operators of equal binding power
//!
//! The parser uses NUD (null denotation) handlers for operands and a
//! binding power table for infix operators.

pub mod lookups;
pub mod parser;
