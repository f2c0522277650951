use std::iter::FusedIterator;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Consumes the text matched by `regex` at the lexer position. Returns `None`
/// when the match produces no token (whitespace).
pub type RegexHandler = fn(&mut Lexer, &Regex) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Tried in order, every pattern is anchored at the current position
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[ \t\n\r]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\"[^\"]*\"?").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assign, "=") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RParen, ")") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Lt, "<") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Gt, ">") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LBrace, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RBrace, "}") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Minus, "-") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Asterisk, "*") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
    ];
}

/// A lazy token stream over one line of source.
///
/// Yields tokens in source order and finishes with exactly one
/// `EndOfInput` token. Cloning a fresh lexer (or calling [`tokenize`]
/// again) restarts from the beginning of the input.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    pub(crate) pos: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            source,
            pos: 0,
            finished: false,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn span_of(&self, len: usize) -> Span {
        Span {
            start: Position::from_offset(self.pos),
            end: Position::from_offset(self.pos + len),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while !self.finished {
            if self.at_eof() {
                self.finished = true;
                return Some(MK_TOKEN!(TokenKind::EndOfInput, String::new(), self.span_of(0)));
            }

            let remainder = self.remainder();
            let pattern = PATTERNS.iter().find(|pattern| pattern.regex.is_match(remainder));

            match pattern {
                Some(pattern) => {
                    if let Some(token) = (pattern.handler)(self, &pattern.regex) {
                        return Some(token);
                    }
                }
                None => return illegal_handler(self),
            }
        }

        None
    }
}

impl FusedIterator for Lexer<'_> {}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let matched = regex.find(lexer.remainder())?.end();
    lexer.advance_n(matched);
    None
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let matched = regex.find(lexer.remainder())?.as_str();

    let token = MK_TOKEN!(TokenKind::Int, matched.to_string(), lexer.span_of(matched.len()));
    lexer.advance_n(matched.len());
    Some(token)
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let matched = regex.find(lexer.remainder())?.as_str();

    // No escapes: everything up to the closing quote, or the end of input
    let inner = &matched[1..];
    let string_literal = inner.strip_suffix('"').unwrap_or(inner);

    let token = MK_TOKEN!(TokenKind::StringLit, string_literal.to_string(), lexer.span_of(matched.len()));
    lexer.advance_n(matched.len());
    Some(token)
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let value = regex.find(lexer.remainder())?.as_str();

    let kind = RESERVED_LOOKUP.get(value).copied().unwrap_or(TokenKind::Ident);

    let token = MK_TOKEN!(kind, value.to_string(), lexer.span_of(value.len()));
    lexer.advance_n(value.len());
    Some(token)
}

fn illegal_handler(lexer: &mut Lexer) -> Option<Token> {
    let ch = lexer.remainder().chars().next()?;

    let token = MK_TOKEN!(TokenKind::Illegal, ch.to_string(), lexer.span_of(ch.len_utf8()));
    lexer.advance_n(ch.len_utf8());
    Some(token)
}

/// Starts a lazy token stream over `source`.
pub fn tokenize(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}
