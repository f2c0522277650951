use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A terminal failure for one input, tagged with the source position it refers to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{internal_error} at position {}", .position.0)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::IllegalToken { .. } => "IllegalToken",
            ErrorImpl::UnexpectedEndOfInput => "UnexpectedEndOfInput",
            ErrorImpl::InvalidLiteral { .. } => "InvalidLiteral",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::UnknownOperator { .. } => "UnknownOperator",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::IllegalToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected an integer or an operator",
                token
            )),
            ErrorImpl::UnexpectedEndOfInput => ErrorTip::Suggestion(String::from(
                "Input ended while an operand was still expected",
            )),
            ErrorImpl::InvalidLiteral { literal } => ErrorTip::Suggestion(format!(
                "Invalid integer: `{}`, is it above the integer limit?",
                literal
            )),
            ErrorImpl::DivisionByZero => ErrorTip::Suggestion(String::from(
                "Division by zero, the right operand evaluated to 0",
            )),
            ErrorImpl::UnknownOperator { operator } => {
                ErrorTip::Suggestion(format!("Operator `{}` cannot be applied here", operator))
            }
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("illegal token: {token:?}")]
    IllegalToken { token: String },
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("invalid integer literal: {literal:?}")]
    InvalidLiteral { literal: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("unknown operator: {operator:?}")]
    UnknownOperator { operator: String },
}
