//! An embeddable arithmetic-expression compiler and evaluator.
//!
//! An infix expression is compiled once, against a table of host
//! bindings, into a compact stack-machine [`Program`], then evaluated
//! any number of times. Variables are read handles on host state, so
//! each evaluation sees the host's current values:
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use exprvm::{compile, Bindings, Vm};
//!
//! let a = Rc::new(Cell::new(7.0));
//! let mut bindings = Bindings::new();
//! bindings.value("a", a.clone());
//! bindings.function("halve", 1, |args: &[f64]| args[0] / 2.0);
//!
//! let program = compile("halve(a) + 1", &bindings).unwrap();
//! let vm = Vm::new();
//! assert_eq!(vm.eval(&program).unwrap(), 4.5);
//!
//! a.set(9.0);
//! assert_eq!(vm.eval(&program).unwrap(), 5.5);
//! ```

mod binding;
mod bytecode;
mod compiler;
mod error;
mod lexer;
mod token;
mod vm;

pub use binding::{Bindings, HostClosure, HostFn, MAX_ARITY};
pub use bytecode::Program;
pub use compiler::compile;
pub use error::{CompileError, CompileErrorKind, EvalError};
pub use vm::{Vm, STACK_CAPACITY};

/// Compile and evaluate `src` with no host bindings. Any error, at
/// either stage, collapses to NaN.
pub fn interp(src: &str) -> f64 {
    match compile(src, &Bindings::new()) {
        Ok(program) => Vm::new().eval(&program).unwrap_or(f64::NAN),
        Err(_) => f64::NAN,
    }
}
