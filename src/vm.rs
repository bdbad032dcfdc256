//! Stack-machine evaluator
//!
//! A linear scan over a compiled program's opcodes against a scratch
//! operand stack of doubles. The stack is allocated fresh for every
//! evaluation and sized from the program's recorded maximum depth, so
//! one `Vm` can evaluate any number of programs, and a program can be
//! evaluated any number of times without being mutated.

use log::trace;

use crate::bytecode::{Op, Program};
use crate::error::EvalError;

/// Default operand-stack capacity, in values.
pub const STACK_CAPACITY: usize = 32;

/// The evaluator. Holds only configuration.
pub struct Vm {
    capacity: usize,
}

impl Default for Vm {
    fn default() -> Self {
        Vm {
            capacity: STACK_CAPACITY,
        }
    }
}

impl Vm {
    pub fn new() -> Self {
        Vm::default()
    }

    /// An evaluator with a widened (or narrowed) operand stack. Only
    /// programs whose [`max_depth`](Program::max_depth) exceeds
    /// [`STACK_CAPACITY`] need this.
    pub fn with_capacity(capacity: usize) -> Self {
        Vm { capacity }
    }

    /// Run `program` and return its value.
    ///
    /// `Var` operands are read as the loop reaches them, so each
    /// evaluation observes the host's current state. Division by zero
    /// follows IEEE-754 (infinity or NaN) and is not an error.
    pub fn eval(&self, program: &Program) -> Result<f64, EvalError> {
        trace!(
            "eval: {} ops, max depth {}",
            program.ops().len(),
            program.max_depth()
        );
        let mut stack: Vec<f64> = Vec::with_capacity(program.max_depth().min(self.capacity));

        for (pc, op) in program.ops().iter().enumerate() {
            match op {
                Op::Neg => {
                    let top = last_mut(&mut stack, pc)?;
                    *top = -*top;
                }
                Op::Add => {
                    let rhs = pop(&mut stack, pc)?;
                    *last_mut(&mut stack, pc)? += rhs;
                }
                Op::Sub => {
                    let rhs = pop(&mut stack, pc)?;
                    *last_mut(&mut stack, pc)? -= rhs;
                }
                Op::Mul => {
                    let rhs = pop(&mut stack, pc)?;
                    *last_mut(&mut stack, pc)? *= rhs;
                }
                Op::Div => {
                    let rhs = pop(&mut stack, pc)?;
                    *last_mut(&mut stack, pc)? /= rhs;
                }
                Op::Var(cell) => self.push(&mut stack, cell.get())?,
                Op::Con(value) => self.push(&mut stack, *value)?,
                Op::Fun { arity, fun } => {
                    // The first-compiled argument is the deepest; the
                    // top-of-stack window is already in call order.
                    let base = args_base(&stack, *arity, pc)?;
                    let result = fun(&stack[base..]);
                    stack.truncate(base);
                    self.push(&mut stack, result)?;
                }
                Op::Clo { arity, fun, ctx } => {
                    let base = args_base(&stack, *arity, pc)?;
                    let result = fun(ctx.as_ref(), &stack[base..]);
                    stack.truncate(base);
                    self.push(&mut stack, result)?;
                }
                Op::Ret => {
                    return if stack.len() == 1 {
                        Ok(stack[0])
                    } else {
                        Err(EvalError::MalformedBytecode(pc))
                    };
                }
            }
        }
        Err(EvalError::MalformedBytecode(program.ops().len()))
    }

    fn push(&self, stack: &mut Vec<f64>, value: f64) -> Result<(), EvalError> {
        if stack.len() == self.capacity {
            return Err(EvalError::StackOverflow(self.capacity));
        }
        stack.push(value);
        Ok(())
    }
}

fn pop(stack: &mut Vec<f64>, pc: usize) -> Result<f64, EvalError> {
    stack.pop().ok_or(EvalError::MalformedBytecode(pc))
}

fn last_mut(stack: &mut [f64], pc: usize) -> Result<&mut f64, EvalError> {
    stack.last_mut().ok_or(EvalError::MalformedBytecode(pc))
}

fn args_base(stack: &[f64], arity: u8, pc: usize) -> Result<usize, EvalError> {
    stack
        .len()
        .checked_sub(arity as usize)
        .ok_or(EvalError::MalformedBytecode(pc))
}
