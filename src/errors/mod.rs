//! Error types and error handling for the interpreter.
//!
//! Every stage of the pipeline (lexing, parsing, evaluation and lowering to
//! the stack machine) reports failures through the single [`errors::Error`]
//! type. It includes:
//!
//! - The position of the token that caused the failure
//! - The failure kind as an [`errors::ErrorImpl`] variant
//! - A human readable hint used by the diagnostic renderer

pub mod errors;
