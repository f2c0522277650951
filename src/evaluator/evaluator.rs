use crate::{
    ast::ast::{Expr, Visit},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    pub fn from_token(token: &Token) -> Result<Self, Error> {
        match token.kind {
            TokenKind::Plus => Ok(BinaryOperator::Add),
            TokenKind::Minus => Ok(BinaryOperator::Subtract),
            TokenKind::Asterisk => Ok(BinaryOperator::Multiply),
            TokenKind::Slash => Ok(BinaryOperator::Divide),
            _ => Err(unknown_operator(token)),
        }
    }

    /// Returns `None` on division by zero. Everything else wraps at 64 bits,
    /// and division truncates toward zero.
    pub fn apply(self, left: i64, right: i64) -> Option<i64> {
        match self {
            BinaryOperator::Add => Some(left.wrapping_add(right)),
            BinaryOperator::Subtract => Some(left.wrapping_sub(right)),
            BinaryOperator::Multiply => Some(left.wrapping_mul(right)),
            BinaryOperator::Divide => {
                if right == 0 {
                    None
                } else {
                    Some(left.wrapping_div(right))
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Identity,
    Negate,
}

impl UnaryOperator {
    pub fn from_token(token: &Token) -> Result<Self, Error> {
        match token.kind {
            TokenKind::Plus => Ok(UnaryOperator::Identity),
            TokenKind::Minus => Ok(UnaryOperator::Negate),
            _ => Err(unknown_operator(token)),
        }
    }

    pub fn apply(self, value: i64) -> i64 {
        match self {
            UnaryOperator::Identity => value,
            UnaryOperator::Negate => value.wrapping_neg(),
        }
    }
}

fn unknown_operator(token: &Token) -> Error {
    Error::new(
        ErrorImpl::UnknownOperator {
            operator: token.literal.clone(),
        },
        token.span.start,
    )
}

/// Parses an integer literal token.
///
/// Accepts an optional sign, then decimal digits or a `0x`, `0o` or `0b`
/// prefixed numeral, with single `_` separators between digits.
pub fn parse_int_literal(token: &Token) -> Result<i64, Error> {
    parse_integer(&token.literal).ok_or_else(|| {
        Error::new(
            ErrorImpl::InvalidLiteral {
                literal: token.literal.clone(),
            },
            token.span.start,
        )
    })
}

fn parse_integer(literal: &str) -> Option<i64> {
    let (negative, body) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal.strip_prefix('+').unwrap_or(literal)),
    };

    let (radix, digits) = if let Some(rest) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        (16, rest)
    } else if let Some(rest) = body.strip_prefix("0o").or_else(|| body.strip_prefix("0O")) {
        (8, rest)
    } else if let Some(rest) = body.strip_prefix("0b").or_else(|| body.strip_prefix("0B")) {
        (2, rest)
    } else {
        (10, body)
    };

    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
        || !digits.chars().all(|c| c == '_' || c.is_digit(radix))
    {
        return None;
    }

    let magnitude = u64::from_str_radix(&digits.replace('_', ""), radix).ok()?;

    if negative {
        // i64::MIN has no positive counterpart
        if magnitude > i64::MAX as u64 + 1 {
            None
        } else {
            Some((magnitude as i64).wrapping_neg())
        }
    } else {
        i64::try_from(magnitude).ok()
    }
}

/// Reduces an expression tree to its integer value.
///
/// Nodes are visited in post-order, so the first failing subtree from the
/// left reports its error.
pub fn evaluate(expr: &Expr) -> Result<i64, Error> {
    let mut values: Vec<i64> = vec![];

    for visit in expr.post_order() {
        let value = match visit {
            Visit::Literal(token) => parse_int_literal(token)?,
            Visit::UnaryChain { literal, operators } => {
                let mut value = parse_int_literal(literal)?;

                // Innermost operator first
                for operator in operators.iter().rev() {
                    value = UnaryOperator::from_token(operator)?.apply(value);
                }

                value
            }
            Visit::Binary(operator) => {
                let right = pop_operand(&mut values, operator.span.start)?;
                let left = pop_operand(&mut values, operator.span.start)?;

                BinaryOperator::from_token(operator)?
                    .apply(left, right)
                    .ok_or_else(|| Error::new(ErrorImpl::DivisionByZero, operator.span.start))?
            }
        };

        values.push(value);
    }

    pop_operand(&mut values, expr.token().span.start)
}

fn pop_operand(values: &mut Vec<i64>, position: Position) -> Result<i64, Error> {
    values
        .pop()
        .ok_or_else(|| Error::new(ErrorImpl::UnexpectedEndOfInput, position))
}
