#![allow(clippy::module_inception)]

use crate::{
    ast::ast::Expr,
    errors::errors::{Error, ErrorTip},
    evaluator::evaluator::evaluate,
    lexer::lexer::tokenize,
    parser::parser::parse,
};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod evaluator;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod repl;

extern crate regex;

/// Byte offset into the input line.
///
/// Offsets past `u32::MAX` (lines over 4 GiB) are clamped to `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position(pub u32);

impl Position {
    pub fn null() -> Self {
        Position(0)
    }

    pub fn from_offset(offset: usize) -> Self {
        Position(u32::try_from(offset).unwrap_or(u32::MAX))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// The outcome of running one input through the whole pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub tree: Expr,
    pub value: i64,
}

/// Tokenizes, parses and evaluates a single input.
pub fn interpret(source: &str) -> Result<Evaluation, Error> {
    let tree = parse(tokenize(source))?;
    let value = evaluate(&tree)?;

    Ok(Evaluation { tree, value })
}

pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = position as usize;

    let mut start = 0;
    let mut line_number = 1;
    let mut last_line = String::new();

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return (line_number, line.to_string(), line_pos);
        }

        last_line = line.to_string();
        start = end;
        line_number += 1;
    }

    // Past the end: point just after the last character of the final line
    let trimmed = last_line.trim_end_matches(['\n', '\r']).to_string();
    let line_pos = trimmed.len();
    (line_number.max(2) - 1, trimmed, line_pos)
}

pub fn display_error(error: &Error, source: &str) -> String {
    /*
        Error: DivisionByZero (...)
          |
        1 | 1 / 0
          | ----^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let header = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}", error.get_error_name())
    } else {
        format!("Error: {} ({})", error.get_error_name(), error.get_tip())
    };

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    format!(
        "{}\n{:>padding$}\n{} | {}\n{:>padding$} {:->arrows$}",
        header,
        "|",
        line_string,
        line_text_removed.trim_end(),
        "|",
        "^"
    )
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
