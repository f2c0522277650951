//! Code generation module for the interpreter.
//!
//! This module lowers an expression tree into a program for a 64-bit
//! integer stack machine, rendered in a WebAssembly-text flavoured listing.
//! It handles:
//!
//! - Post-order emission (left operand, right operand, then the operator)
//! - Lowering unary chains to negations
//! - Running the program on an explicit value stack

pub mod compiler;
