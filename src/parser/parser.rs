//! Parser implementation for building the expression tree.
//!
//! This module contains the main Parser struct and the precedence-climbing
//! loop. Operands are read through NUD handlers; every binary operator
//! opens a [`ParseFrame`] holding the operand to its left, and frames are
//! reduced into binary nodes once an operator of lower or equal binding
//! power (or the end of input) shows that their right operand is complete.
//!
//! It maintains lookup tables for:
//! - NUD (null denotation) handlers for literals and unary prefixes
//! - Binding powers for infix operators

use std::collections::HashMap;

use log::trace;

use crate::{
    ast::ast::Expr,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::lookups::{create_token_lookups, BPLookup, BindingPower, NUDHandler, NUDLookup};

/// The main parser structure that maintains parsing state.
///
/// Tokens are pulled lazily from the underlying stream, one at a time.
/// Once the stream is exhausted the parser keeps reporting an
/// `EndOfInput` token, so a stream that never produces one is still
/// terminated.
pub struct Parser<'a> {
    /// The remaining tokens
    tokens: Box<dyn Iterator<Item = Token> + 'a>,
    /// The token under examination
    current: Token,
    /// Lookup table for null denotation (operand) handlers
    nud_lookup: NUDLookup,
    /// Lookup table for infix binding powers (precedence)
    binding_power_lookup: BPLookup,
}

/// An operand waiting for the right-hand side of its operator.
#[derive(Debug)]
struct ParseFrame {
    left: Expr,
    operator: Token,
    binding_power: BindingPower,
}

impl<'a> Parser<'a> {
    /// Creates a new Parser instance with empty lookup tables.
    ///
    /// # Arguments
    ///
    /// * `tokens` - The token stream to parse, usually a [`Lexer`](crate::lexer::lexer::Lexer)
    pub fn new<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = Token>,
        I::IntoIter: 'a,
    {
        let mut tokens: Box<dyn Iterator<Item = Token> + 'a> = Box::new(tokens.into_iter());
        let current = tokens
            .next()
            .unwrap_or_else(|| end_of_input(Position::null()));

        Parser {
            tokens,
            current,
            nud_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let next = self
            .tokens
            .next()
            .unwrap_or_else(|| end_of_input(self.current.span.end));

        std::mem::replace(&mut self.current, next)
    }

    /// Expects a token of the specified kind.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            Err(self.unexpected_token())
        } else {
            Ok(self.advance())
        }
    }

    /// Builds the error for a current token that cannot appear here.
    pub fn unexpected_token(&self) -> Error {
        if self.current_token_kind() == TokenKind::EndOfInput {
            Error::new(ErrorImpl::UnexpectedEndOfInput, self.get_position())
        } else {
            Error::new(
                ErrorImpl::IllegalToken {
                    token: self.current.literal.clone(),
                },
                self.get_position(),
            )
        }
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Binding power of `kind` as an infix operator, `Default` if it is none.
    pub fn binding_power(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Registers a token as an infix operator.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower) {
        self.binding_power_lookup.insert(kind, binding_power);
    }

    /// Registers a null denotation (operand) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `nud_fn` - The handler function for operands starting with this token
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.span.start
    }
}

fn end_of_input(position: Position) -> Token {
    MK_TOKEN!(
        TokenKind::EndOfInput,
        String::new(),
        Span {
            start: position,
            end: position
        }
    )
}

/// Parses one operand: a literal, optionally behind unary prefixes.
pub fn parse_nud(parser: &mut Parser) -> Result<Expr, Error> {
    let token_kind = parser.current_token_kind();
    match parser.get_nud_lookup().get(&token_kind).copied() {
        Some(nud_fn) => nud_fn(parser),
        None => Err(parser.unexpected_token()),
    }
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.expect(TokenKind::Int)?;

    Ok(Expr::literal(token))
}

/// Parses `+-+1` style operands into a single unary chain.
pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut operators = vec![];

    while parser.current_token().is_unary_operator() {
        operators.push(parser.advance());
    }

    let literal = parser.expect(TokenKind::Int)?;

    Ok(Expr::unary_chain(literal, operators))
}

/// Reduces frames whose binding power is at least `min_bp`, innermost first.
fn reduce_frames(stack: &mut Vec<ParseFrame>, mut left: Expr, min_bp: BindingPower) -> Expr {
    while let Some(frame) = stack.pop() {
        if frame.binding_power < min_bp {
            stack.push(frame);
            break;
        }

        trace!("reducing `{}` frame, {} frames left", frame.operator, stack.len());
        left = Expr::binary(frame.left, frame.operator, left);
    }

    left
}

pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut stack: Vec<ParseFrame> = vec![];
    let mut left = parse_nud(parser)?;

    while parser.current_token_kind() != TokenKind::EndOfInput {
        let binding_power = parser.binding_power(parser.current_token_kind());
        if binding_power == BindingPower::Default {
            return Err(parser.unexpected_token());
        }

        let operator = parser.advance();

        // Equal binding power closes the open frame first: left associativity
        left = reduce_frames(&mut stack, left, binding_power);

        trace!("opening `{}` frame at depth {}", operator, stack.len());
        stack.push(ParseFrame {
            left,
            operator,
            binding_power,
        });

        left = parse_nud(parser)?;
    }

    Ok(reduce_frames(&mut stack, left, BindingPower::Default))
}

/// Parses a token stream into a single expression tree.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes the lookup tables, and consumes the stream through its
/// `EndOfInput` token.
///
/// # Returns
///
/// The root of the expression tree, or the first error encountered.
pub fn parse<'a, I>(tokens: I) -> Result<Expr, Error>
where
    I: IntoIterator<Item = Token>,
    I::IntoIter: 'a,
{
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);

    let expr = parse_expr(&mut parser)?;
    parser.expect(TokenKind::EndOfInput)?;

    Ok(expr)
}
