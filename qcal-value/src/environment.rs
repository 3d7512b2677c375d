use crate::Value;
use std::collections::HashMap;

/// Maps variable names to values.
///
/// One `Environment` lives for a whole session. Every user function call gets a fresh one that only
/// contains the call's parameters; environments are never chained.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    store: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the environment of a function call by binding `params` to `args` positionally.
    /// Extra arguments are ignored.
    pub fn with_params(params: &[String], args: Vec<Value>) -> Self {
        let store = params.iter().cloned().zip(args).collect();
        Self { store }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.store.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut env = Environment::new();
        assert!(env.get("x").is_none());
        env.set("x", Value::Number(1.0));
        env.set("x", Value::Number(2.0));
        assert_eq!(env.get("x"), Some(&Value::Number(2.0)));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_with_params() {
        let params = vec!["a".to_string(), "b".to_string()];
        let env = Environment::with_params(
            &params,
            vec![Value::Number(1.0), Value::Bool(true), Value::Null],
        );
        assert_eq!(env.len(), 2);
        assert_eq!(env.get("a"), Some(&Value::Number(1.0)));
        assert_eq!(env.get("b"), Some(&Value::Bool(true)));
    }
}
