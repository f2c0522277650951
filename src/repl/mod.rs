//! Interactive read-evaluate-print loop.
//!
//! Reads one expression per line, prints its tree and value (or a
//! diagnostic) and moves on to the next line.

pub mod repl;
