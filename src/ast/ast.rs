use std::fmt::Display;

use crate::{
    lexer::tokens::{Token, TokenKind},
    Span, MK_TOKEN,
};

/// Expression tree
///
/// Every node exclusively owns its children, and trees are never mutated
/// once the parser hands them out.
///
/// A chain of equal-precedence operators nests as deep as it is long.
/// Walks over the tree keep their pending nodes on the heap and never
/// recurse, except for the derived `Debug`.
#[derive(Debug, Eq)]
pub enum Expr {
    /// An integer literal with no prefix operators.
    Literal { token: Token },
    /// An integer literal preceded by one or more unary `+`/`-` operators.
    ///
    /// `operators` is in source order, so the first entry is the outermost
    /// operator and the last one binds directly to the literal.
    UnaryChain { literal: Token, operators: Vec<Token> },
    /// `left operator right`
    Binary {
        operator: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn literal(token: Token) -> Self {
        Expr::Literal { token }
    }

    /// Builds a literal with prefix operators. An empty operator list yields a
    /// plain literal.
    pub fn unary_chain(literal: Token, operators: Vec<Token>) -> Self {
        if operators.is_empty() {
            Expr::Literal { token: literal }
        } else {
            Expr::UnaryChain { literal, operators }
        }
    }

    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// The token rendered first for this node: the operator of a binary
    /// node, the literal otherwise.
    pub fn token(&self) -> &Token {
        match self {
            Expr::Literal { token } => token,
            Expr::UnaryChain { literal, .. } => literal,
            Expr::Binary { operator, .. } => operator,
        }
    }

    /// Walks the tree bottom-up, left operand before right operand.
    pub fn post_order(&self) -> PostOrder<'_> {
        PostOrder {
            pending: vec![(self, false)],
        }
    }

    /// Leaf used in place of children that were moved out during drop.
    fn detached() -> Self {
        Expr::Literal {
            token: MK_TOKEN!(TokenKind::EndOfInput, String::new(), Span::default()),
        }
    }

    fn write_canonical(&self, out: &mut String) {
        enum Step<'a> {
            Enter(&'a Expr),
            Text(&'static str),
        }

        let mut steps = vec![Step::Enter(self)];

        while let Some(step) = steps.pop() {
            match step {
                Step::Text(text) => out.push_str(text),
                Step::Enter(Expr::Literal { token }) => {
                    out.push('{');
                    out.push_str(&token.literal);
                    out.push('}');
                }
                Step::Enter(Expr::UnaryChain { literal, operators }) => {
                    // {1,{-,{+}}}: each operator is the left child of the one before it
                    out.push('{');
                    out.push_str(&literal.literal);
                    for operator in operators {
                        out.push_str(",{");
                        out.push_str(&operator.literal);
                    }
                    out.push_str(&"}".repeat(operators.len() + 1));
                }
                Step::Enter(Expr::Binary { operator, left, right }) => {
                    out.push('{');
                    out.push_str(&operator.literal);
                    out.push(',');
                    steps.push(Step::Text("}"));
                    steps.push(Step::Enter(right.as_ref()));
                    steps.push(Step::Text(","));
                    steps.push(Step::Enter(left.as_ref()));
                }
            }
        }
    }
}

/// One node of a [`PostOrder`] walk.
#[derive(Debug, Clone, Copy)]
pub enum Visit<'a> {
    Literal(&'a Token),
    UnaryChain { literal: &'a Token, operators: &'a [Token] },
    /// Comes right after both operands of the node have been visited
    Binary(&'a Token),
}

/// Post-order iterator over an [`Expr`], driven by an explicit stack.
pub struct PostOrder<'a> {
    /// Nodes still to visit, flagged once their operands have been queued
    pending: Vec<(&'a Expr, bool)>,
}

impl<'a> Iterator for PostOrder<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Visit<'a>> {
        while let Some((expr, expanded)) = self.pending.pop() {
            match expr {
                Expr::Literal { token } => return Some(Visit::Literal(token)),
                Expr::UnaryChain { literal, operators } => {
                    return Some(Visit::UnaryChain {
                        literal,
                        operators: operators.as_slice(),
                    })
                }
                Expr::Binary { operator, left, right } => {
                    if expanded {
                        return Some(Visit::Binary(operator));
                    }

                    self.pending.push((expr, true));
                    self.pending.push((right.as_ref(), false));
                    self.pending.push((left.as_ref(), false));
                }
            }
        }

        None
    }
}

impl Clone for Expr {
    fn clone(&self) -> Self {
        let mut built: Vec<Expr> = vec![];

        for visit in self.post_order() {
            let node = match visit {
                Visit::Literal(token) => Expr::literal(token.clone()),
                Visit::UnaryChain { literal, operators } => Expr::UnaryChain {
                    literal: literal.clone(),
                    operators: operators.to_vec(),
                },
                Visit::Binary(operator) => {
                    // Post-order guarantees both operands are on the stack
                    let right = built.pop().unwrap_or_else(Expr::detached);
                    let left = built.pop().unwrap_or_else(Expr::detached);
                    Expr::binary(left, operator.clone(), right)
                }
            };
            built.push(node);
        }

        built.pop().unwrap_or_else(Expr::detached)
    }
}

impl PartialEq for Expr {
    /// Two trees are equal when their post-order walks are: every node has a
    /// fixed number of operands, so the walk determines the shape.
    fn eq(&self, other: &Self) -> bool {
        let mut ours = self.post_order();
        let mut theirs = other.post_order();

        loop {
            let same = match (ours.next(), theirs.next()) {
                (None, None) => return true,
                (Some(Visit::Literal(a)), Some(Visit::Literal(b))) => a == b,
                (
                    Some(Visit::UnaryChain { literal: a, operators: x }),
                    Some(Visit::UnaryChain { literal: b, operators: y }),
                ) => a == b && x == y,
                (Some(Visit::Binary(a)), Some(Visit::Binary(b))) => a == b,
                _ => false,
            };

            if !same {
                return false;
            }
        }
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut detached = vec![];
        detach_operands(self, &mut detached);

        // Each popped node drops here with leaf operands only
        while let Some(mut expr) = detached.pop() {
            detach_operands(&mut expr, &mut detached);
        }
    }
}

fn detach_operands(expr: &mut Expr, detached: &mut Vec<Expr>) {
    if let Expr::Binary { left, right, .. } = expr {
        detached.push(std::mem::replace(left.as_mut(), Expr::detached()));
        detached.push(std::mem::replace(right.as_mut(), Expr::detached()));
    }
}

/// Renders the canonical bracketed form, e.g. `{+,{1},{*,{2},{3}}}`.
pub fn stringify(expr: &Expr) -> String {
    let mut out = String::new();
    expr.write_canonical(&mut out);
    out
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", stringify(self))
    }
}
