//! Lexical analysis module for the interpreter.
//!
//! This module contains the lexer (tokenizer) that converts a line of source
//! into a lazy stream of tokens for parsing. It handles:
//!
//! - Tokenization driven by a table of anchored regex patterns
//! - Recognition of keywords, identifiers, integers, strings and operators
//! - Token position tracking for error reporting
//! - Whitespace skipping and `Illegal` tokens for anything unrecognised

pub mod lexer;
pub mod tokens;
