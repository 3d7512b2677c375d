use qcal_parser::ast::{InfixOp, PostfixOp, PrefixOp};
use qcal_value::{Value, ValueKind};
use thiserror::Error;

/// An error raised while evaluating. The first runtime error aborts evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("type mismatch: {lhs} {op} {rhs}")]
    TypeMismatch {
        lhs: ValueKind,
        op: InfixOp,
        rhs: ValueKind,
    },
    #[error("unknown operator: {lhs} {op} {rhs}")]
    UnknownInfixOperator {
        lhs: ValueKind,
        op: InfixOp,
        rhs: ValueKind,
    },
    #[error("unknown operator: {op}{arg}")]
    UnknownPrefixOperator { op: PrefixOp, arg: ValueKind },
    #[error("unknown operator: {arg}{op}")]
    UnknownPostfixOperator { op: PostfixOp, arg: ValueKind },
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),
    #[error("cannot assign value to the builtin constant \"{0}\"")]
    ReservedConstant(String),
    #[error("not a function: {0}")]
    NotAFunction(ValueKind),
    #[error("\"{ident}\": not enough arguments, expected={expected}, got={got}")]
    NotEnoughArguments {
        ident: String,
        expected: usize,
        got: usize,
    },
    #[error("\"{ident}\": too many arguments, expected={expected}, got={got}")]
    TooManyArguments {
        ident: String,
        expected: usize,
        got: usize,
    },
    #[error("argument index {index} of function \"{ident}\" should be type {expected}, got {got}")]
    WrongArgumentType {
        index: usize,
        ident: String,
        expected: ValueKind,
        got: ValueKind,
    },
    #[error("maximum call depth exceeded ({0})")]
    RecursionLimit(usize),
    #[error("cannot evaluate an expression that failed to parse")]
    SyntaxErrorNode,
}

impl RuntimeError {
    /// Converts the error into its displayable [`Value::Error`] form.
    pub fn into_value(self) -> Value {
        Value::Error(self.to_string())
    }
}
