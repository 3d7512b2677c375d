//! Builtin (native) functions and constants.

use crate::{Value, ValueKind};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A function implemented in Rust. All parameters are numbers.
#[derive(Clone)]
pub struct NativeFn {
    pub ident: String,
    /// Expected kind of each parameter. The length is the arity of the function.
    pub params: Vec<ValueKind>,
    pub func: fn(&[f64]) -> f64,
}

impl NativeFn {
    /// Number of arguments that the function accepts.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFn")
            .field("ident", &self.ident)
            .field("params", &self.params)
            .finish()
    }
}

/// The builtin constants and functions available to every program.
#[derive(Debug, Clone, Default)]
pub struct BuiltinVars {
    constants: HashMap<String, f64>,
    functions: HashMap<String, Rc<NativeFn>>,
}

impl BuiltinVars {
    /// Creates an empty `BuiltinVars`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_constant(&mut self, ident: &str, value: f64) {
        self.constants.insert(ident.to_string(), value);
    }

    pub fn add_native_fn(&mut self, ident: &str, func: fn(&[f64]) -> f64, arity: usize) {
        self.functions.insert(
            ident.to_string(),
            Rc::new(NativeFn {
                ident: ident.to_string(),
                params: vec![ValueKind::Number; arity],
                func,
            }),
        );
    }

    /// Returns `true` if `ident` is a builtin constant. Constants cannot be reassigned.
    pub fn is_constant(&self, ident: &str) -> bool {
        self.constants.contains_key(ident)
    }

    pub fn constant(&self, ident: &str) -> Option<Value> {
        self.constants.get(ident).map(|val| Value::Number(*val))
    }

    pub fn native_fn(&self, ident: &str) -> Option<Value> {
        self.functions
            .get(ident)
            .map(|func| Value::NativeFn(Rc::clone(func)))
    }
}
