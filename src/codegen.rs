//! Code generation: lower an expression tree into stack-machine code.
//!
//! Every node leaves exactly one value on the operand stack. Literals are
//! folded to `f64` constants at compile time, binary operators pop two
//! operands and push one, and `^` calls out to `f64::powf`. The resulting
//! [`CompiledFunction`] owns its code and can be invoked any number of
//! times, from any thread.

use std::fmt;
use std::sync::Arc;

use crate::ast::{BinaryOperator, Expression, UnaryOperator};
use crate::token::Token;

/// Error raised when the tree holds an operator the generator has no
/// instruction for. This is a parser/generator mismatch, not a user
/// input error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "operation not supported: '{operator}' as {position} operator at line {line}, column {column}"
)]
pub struct CodegenError {
    pub operator: String,
    pub position: OperatorPosition,
    pub line: usize,
    pub column: usize,
}

/// Where an unsupported operator was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorPosition {
    Binary,
    Unary,
}

impl fmt::Display for OperatorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary => write!(f, "binary"),
            Self::Unary => write!(f, "unary"),
        }
    }
}

/// Stack-machine instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Instruction {
    Const(f64),
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Neg,
    CallPow,
}

/// Zero-argument function computing the value of a compiled expression.
///
/// Holds no mutable state: cloning shares the code, and calls from
/// several threads at once are fine.
#[derive(Debug, Clone)]
pub struct CompiledFunction {
    code: Arc<[Instruction]>,
    max_stack: usize,
}

impl CompiledFunction {
    /// Evaluate the expression.
    #[must_use]
    pub fn call(&self) -> f64 {
        let mut stack: Vec<f64> = Vec::with_capacity(self.max_stack);
        for instruction in self.code.iter() {
            match *instruction {
                Instruction::Const(value) => stack.push(value),
                Instruction::Neg => {
                    let value = pop(&mut stack);
                    stack.push(-value);
                }
                Instruction::Add => apply(&mut stack, |l, r| l + r),
                Instruction::Sub => apply(&mut stack, |l, r| l - r),
                Instruction::Mul => apply(&mut stack, |l, r| l * r),
                Instruction::Div => apply(&mut stack, |l, r| l / r),
                Instruction::Rem => apply(&mut stack, |l, r| l % r),
                Instruction::CallPow => apply(&mut stack, f64::powf),
            }
        }
        pop(&mut stack)
    }

    /// Turn into a plain closure.
    #[must_use]
    pub fn into_fn(self) -> impl Fn() -> f64 + Send + Sync + 'static {
        move || self.call()
    }
}

fn pop(stack: &mut Vec<f64>) -> f64 {
    // The generator emits balanced code, so an empty stack is a bug here.
    let Some(value) = stack.pop() else {
        unreachable!("operand stack underflow");
    };
    value
}

fn apply(stack: &mut Vec<f64>, op: impl Fn(f64, f64) -> f64) {
    let right = pop(stack);
    let left = pop(stack);
    stack.push(op(left, right));
}

/// Compile an expression tree into a callable function.
///
/// The tree is only borrowed; the result keeps no reference to it.
///
/// # Errors
///
/// Returns `CodegenError` if a binary node carries an operator other than
/// `+ - * / % ^`, or a unary node one other than `+ -`. The parser never
/// produces such trees, so this only signals a mismatch between the
/// parser's and the generator's operator tables. It is an `Err`, not a
/// panic: callers compiling hand-built trees handle it like any other
/// error, and no partial function is produced.
pub fn compile(expression: &Expression) -> Result<CompiledFunction, CodegenError> {
    let mut generator = CodeGenerator::default();
    generator.emit_expression(expression)?;
    Ok(CompiledFunction {
        code: generator.code.into(),
        max_stack: generator.max_depth,
    })
}

#[derive(Default)]
struct CodeGenerator {
    code: Vec<Instruction>,
    depth: usize,
    max_depth: usize,
}

impl CodeGenerator {
    fn emit(&mut self, instruction: Instruction) {
        match instruction {
            Instruction::Const(_) => {
                self.depth += 1;
                self.max_depth = self.max_depth.max(self.depth);
            }
            Instruction::Neg => {}
            Instruction::Add
            | Instruction::Sub
            | Instruction::Mul
            | Instruction::Div
            | Instruction::Rem
            | Instruction::CallPow => self.depth -= 1,
        }
        self.code.push(instruction);
    }

    /// Post-order walk: children first, left before right.
    fn emit_expression(&mut self, expression: &Expression) -> Result<(), CodegenError> {
        match expression {
            // No binding environment: every name reads as zero.
            Expression::Identifier(_) => self.emit(Instruction::Const(0.0)),
            Expression::IntegerLiteral(value) => self.emit(Instruction::Const(widen(*value))),
            Expression::RealLiteral(value) => self.emit(Instruction::Const(*value)),
            Expression::Parenthesized(inner) => self.emit_expression(inner)?,
            Expression::Binary {
                left,
                operator,
                right,
            } => {
                self.emit_expression(left)?;
                self.emit_expression(right)?;
                let op = BinaryOperator::from_kind(operator.kind)
                    .ok_or_else(|| unsupported(operator, OperatorPosition::Binary))?;
                self.emit(match op {
                    BinaryOperator::Add => Instruction::Add,
                    BinaryOperator::Subtract => Instruction::Sub,
                    BinaryOperator::Multiply => Instruction::Mul,
                    BinaryOperator::Divide => Instruction::Div,
                    BinaryOperator::Remainder => Instruction::Rem,
                    BinaryOperator::Power => Instruction::CallPow,
                });
            }
            Expression::Unary { operator, operand } => {
                self.emit_expression(operand)?;
                match UnaryOperator::from_kind(operator.kind) {
                    Some(UnaryOperator::Negate) => self.emit(Instruction::Neg),
                    Some(UnaryOperator::Plus) => {}
                    None => return Err(unsupported(operator, OperatorPosition::Unary)),
                }
            }
        }
        Ok(())
    }
}

#[allow(clippy::cast_precision_loss)]
const fn widen(value: i64) -> f64 {
    // Exact up to 2^53 in magnitude, rounded to nearest beyond.
    value as f64
}

fn unsupported(operator: &Token, position: OperatorPosition) -> CodegenError {
    CodegenError {
        operator: operator.text.clone(),
        position,
        line: operator.line,
        column: operator.column,
    }
}
