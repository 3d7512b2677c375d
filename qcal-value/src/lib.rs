pub mod environment;
pub mod object;

pub use environment::Environment;
pub use object::{BuiltinVars, NativeFn};

use qcal_parser::ast::{ConciseFunctionLiteral, NormalFunctionLiteral};
use std::fmt;
use std::rc::Rc;

/// Runtime values produced by evaluation. Values are never mutated once constructed.
#[derive(Clone)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Null,
    /// Displayable form of a runtime error.
    Error(String),
    /// Produced by `return`. Unwrapped by the nearest function call.
    Return(Box<Value>),
    /// Produced by a let declaration. Displays as the bound value.
    Let(Box<Value>),
    /// A function with a block body. Functions do not capture their defining environment.
    NormalFn(Rc<NormalFunctionLiteral>),
    /// A function with a single expression body.
    ConciseFn(Rc<ConciseFunctionLiteral>),
    NativeFn(Rc<NativeFn>),
}

/// The kind of a [`Value`], used in error messages and builtin signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    Bool,
    Null,
    Error,
    Return,
    Let,
    Function,
    NativeFunction,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Number => "NUMBER",
            ValueKind::Bool => "BOOLEAN",
            ValueKind::Null => "NULL",
            ValueKind::Error => "ERROR",
            ValueKind::Return => "RETURN_VALUE",
            ValueKind::Let => "LET_VALUE",
            ValueKind::Function => "FUNCTION",
            ValueKind::NativeFunction => "BUILTIN_FUNCTION",
        })
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Bool,
            Value::Null => ValueKind::Null,
            Value::Error(_) => ValueKind::Error,
            Value::Return(_) => ValueKind::Return,
            Value::Let(_) => ValueKind::Let,
            Value::NormalFn(_) | Value::ConciseFn(_) => ValueKind::Function,
            Value::NativeFn(_) => ValueKind::NativeFunction,
        }
    }

    pub fn cast_to_number(&self) -> Option<f64> {
        match self {
            Self::Number(val) => Some(*val),
            _ => None,
        }
    }

    /// `null` and `false` are falsy. Everything else (including `0`) is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Bool(false))
    }

    /// Strips [`Value::Let`] and [`Value::Return`] wrappers.
    pub fn into_inner(self) -> Value {
        match self {
            Value::Let(val) | Value::Return(val) => val.into_inner(),
            val => val,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(l), Value::Number(r)) => l == r,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::Null, Value::Null) => true,
            (Value::Error(l), Value::Error(r)) => l == r,
            (Value::Return(l), Value::Return(r)) => l == r,
            (Value::Let(l), Value::Let(r)) => l == r,
            // functions are only equal to themselves
            (Value::NormalFn(l), Value::NormalFn(r)) => Rc::ptr_eq(l, r),
            (Value::ConciseFn(l), Value::ConciseFn(r)) => Rc::ptr_eq(l, r),
            (Value::NativeFn(l), Value::NativeFn(r)) => l.ident == r.ident,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(val) => write!(f, "{}", val),
            Value::Bool(val) => write!(f, "{}", val),
            Value::Null => f.write_str("null"),
            Value::Error(message) => write!(f, "ERROR: {}", message),
            Value::Return(val) | Value::Let(val) => write!(f, "{}", val),
            Value::NormalFn(func) => write!(f, "{}", func),
            Value::ConciseFn(func) => write!(f, "{}", func),
            Value::NativeFn(func) => write!(f, "<builtin fn {}>", func.ident),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcal_parser::ast::{Expr, InfixOp};

    #[test]
    fn test_display() {
        assert_eq!(Value::Number(6.0).to_string(), "6");
        assert_eq!(Value::Number(0.5).to_string(), "0.5");
        assert_eq!(Value::Number(-2.25).to_string(), "-2.25");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(
            Value::Error("identifier not found: x".to_string()).to_string(),
            "ERROR: identifier not found: x"
        );
        assert_eq!(Value::Let(Box::new(Value::Number(1.0))).to_string(), "1");
    }

    #[test]
    fn test_display_fn() {
        let func = ConciseFunctionLiteral {
            params: vec!["a".to_string(), "b".to_string()],
            body: Expr::Binary {
                lhs: Box::new(Expr::Identifier("a".to_string())),
                op: InfixOp::Add,
                rhs: Box::new(Expr::Identifier("b".to_string())),
            },
        };
        assert_eq!(Value::ConciseFn(Rc::new(func)).to_string(), "(a, b) => (a + b)");
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(0.0).is_truthy());
    }

    #[test]
    fn test_into_inner() {
        let val = Value::Return(Box::new(Value::Let(Box::new(Value::Bool(true)))));
        assert_eq!(val.into_inner(), Value::Bool(true));
    }
}
