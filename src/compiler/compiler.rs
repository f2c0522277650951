//! Stack machine lowering.
//!
//! The program mirrors the evaluator's traversal, so running it yields the
//! same value `evaluate` would for the same tree.

use std::fmt::Display;

use crate::{
    ast::ast::{Expr, Visit},
    errors::errors::{Error, ErrorImpl},
    evaluator::evaluator::{parse_int_literal, BinaryOperator, UnaryOperator},
    Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Pushes a value
    Const(i64),
    /// Negates the top of the stack
    Neg,
    /// Pops the right then the left operand and pushes the result
    Binary {
        operator: BinaryOperator,
        position: Position,
    },
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Const(value) => write!(f, "i64.const {}", value),
            Instruction::Neg => write!(f, "i64.neg"),
            Instruction::Binary { operator, .. } => match operator {
                BinaryOperator::Add => write!(f, "i64.add"),
                BinaryOperator::Subtract => write!(f, "i64.sub"),
                BinaryOperator::Multiply => write!(f, "i64.mul"),
                BinaryOperator::Divide => write!(f, "i64.div_s"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Executes the program and returns the value left on the stack.
    pub fn run(&self) -> Result<i64, Error> {
        let mut stack: Vec<i64> = Vec::with_capacity(self.instructions.len());

        for instruction in &self.instructions {
            match *instruction {
                Instruction::Const(value) => stack.push(value),
                Instruction::Neg => {
                    let value = pop(&mut stack)?;
                    stack.push(UnaryOperator::Negate.apply(value));
                }
                Instruction::Binary { operator, position } => {
                    let right = pop(&mut stack)?;
                    let left = pop(&mut stack)?;
                    let result = operator
                        .apply(left, right)
                        .ok_or_else(|| Error::new(ErrorImpl::DivisionByZero, position))?;
                    stack.push(result);
                }
            }
        }

        pop(&mut stack)
    }
}

fn pop(stack: &mut Vec<i64>) -> Result<i64, Error> {
    stack
        .pop()
        .ok_or_else(|| Error::new(ErrorImpl::UnexpectedEndOfInput, Position::null()))
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, instruction) in self.instructions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", instruction)?;
        }

        Ok(())
    }
}

/// Holds the instructions emitted so far.
pub struct Compiler {
    instructions: Vec<Instruction>,
}

impl Compiler {
    pub fn new() -> Self {
        Compiler {
            instructions: vec![],
        }
    }

    /// Appends the instructions for `expr`, operands before their operator.
    pub fn gen_expr(&mut self, expr: &Expr) -> Result<(), Error> {
        for visit in expr.post_order() {
            match visit {
                Visit::Literal(token) => {
                    self.instructions.push(Instruction::Const(parse_int_literal(token)?));
                }
                Visit::UnaryChain { literal, operators } => {
                    self.instructions.push(Instruction::Const(parse_int_literal(literal)?));

                    for operator in operators.iter().rev() {
                        if UnaryOperator::from_token(operator)? == UnaryOperator::Negate {
                            self.instructions.push(Instruction::Neg);
                        }
                    }
                }
                Visit::Binary(operator) => {
                    self.instructions.push(Instruction::Binary {
                        operator: BinaryOperator::from_token(operator)?,
                        position: operator.span.start,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn finish(self) -> Program {
        Program {
            instructions: self.instructions,
        }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowers `expr` into a stack machine program.
pub fn compile(expr: &Expr) -> Result<Program, Error> {
    let mut compiler = Compiler::new();
    compiler.gen_expr(expr)?;

    Ok(compiler.finish())
}
