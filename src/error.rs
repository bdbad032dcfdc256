//! Error types for compilation and evaluation

use thiserror::Error;

/// What went wrong while compiling an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileErrorKind {
    /// A character matching no token class, or a token in a position
    /// the grammar does not allow.
    #[error("unexpected character")]
    UnexpectedCharacter,

    /// The identifier is in neither the host table nor the builtin table.
    #[error("unknown identifier `{0}`")]
    UnknownIdentifier(String),

    /// A value used as a callee, or a callable read as a value.
    #[error("kind mismatch for `{0}`")]
    KindMismatch(String),

    /// Argument count disagrees with the binding's declared arity.
    #[error("expected {expected} arguments, found {found}")]
    ArityMismatch { expected: u8, found: u8 },

    /// Stray `)`, missing `)`, or `,` outside a call's parentheses.
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    /// The source did not produce a complete value.
    #[error("empty expression")]
    EmptyExpression,
}

/// A compile failure and the byte offset it was detected at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at byte {at}")]
pub struct CompileError {
    pub kind: CompileErrorKind,
    pub at: usize,
}

impl CompileError {
    pub(crate) fn new(kind: CompileErrorKind, at: usize) -> Self {
        CompileError { kind, at }
    }
}

/// Evaluation failures. Arithmetic that produces infinity or NaN is not
/// an error; results follow IEEE-754.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A push would have exceeded the operand-stack capacity.
    #[error("operand stack overflow (capacity {0})")]
    StackOverflow(usize),

    /// The program violated the bytecode well-formedness contract.
    /// Compiled programs never do; this indicates a compiler bug.
    #[error("malformed bytecode at op {0}")]
    MalformedBytecode(usize),
}
