//! Evaluation module for the interpreter.
//!
//! This module reduces an expression tree to a 64-bit signed integer.
//! It handles:
//!
//! - Integer literal parsing, with `0x`/`0o`/`0b` prefixes
//! - Unary chains, applied from the operator nearest the literal outwards
//! - Binary arithmetic with wrapping overflow and checked division

pub mod evaluator;

#[cfg(test)]
mod tests;
