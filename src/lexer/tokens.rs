use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fn", TokenKind::Function);
        map.insert("var", TokenKind::Let);
        map.insert("val", TokenKind::Let);
        map.insert("string", TokenKind::TypeKeyword);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EndOfInput,
    Illegal,

    Int,
    StringLit,
    Ident,

    Plus,
    Minus,
    Asterisk,
    Slash,

    Assign,
    Lt,
    Gt,

    Comma,
    Colon,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // Reserved
    TypeKeyword,
    Let,
    Function,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kind == TokenKind::EndOfInput {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}", self.literal)
        }
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// Whether this token may start an operand as a unary prefix.
    pub fn is_unary_operator(&self) -> bool {
        self.is_one_of_many(&[TokenKind::Plus, TokenKind::Minus])
    }
}
