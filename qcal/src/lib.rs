//! qcal, a small calculator language.
//!
//! ```
//! use qcal::{evaluate, Environment, Value};
//!
//! let mut env = Environment::new();
//! assert_eq!(evaluate("f = x => x ^ 2; f(3)", &mut env), Ok(Value::Number(9.0)));
//! ```

pub mod builtin_functions;

use log::{debug, trace};
use qcal_eval::{Evaluator, RuntimeError};
use qcal_parser::Parser;
use qcal_source::SyntaxError;
use qcal_value::BuiltinVars;
use thiserror::Error;

pub use qcal_eval::EvalConfig;
pub use qcal_value::{Environment, Value};

/// An error reported by [`evaluate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("{} at position {}", .0.message(), .0.span().start)]
    Syntax(SyntaxError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Converts the error into a displayable [`Value::Error`], which renders as `ERROR: <message>`.
    pub fn into_value(self) -> Value {
        match self {
            Error::Syntax(_) => Value::Error(self.to_string()),
            Error::Runtime(err) => err.into_value(),
        }
    }
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self {
        Error::Syntax(err)
    }
}

/// Evaluates programs against a fixed set of builtins.
pub struct Interpreter {
    builtin_vars: BuiltinVars,
    config: EvalConfig,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter with the [default builtins](builtin_functions::default_builtin_vars).
    pub fn new() -> Self {
        Self::with_config(EvalConfig::default())
    }

    pub fn with_config(config: EvalConfig) -> Self {
        Self {
            builtin_vars: builtin_functions::default_builtin_vars(),
            config,
        }
    }

    pub fn builtin_vars(&self) -> &BuiltinVars {
        &self.builtin_vars
    }

    /// Mutable access to the builtins, for registering additional constants and functions.
    pub fn builtin_vars_mut(&mut self) -> &mut BuiltinVars {
        &mut self.builtin_vars
    }

    /// Parses and evaluates `source`. Variables are read from and written to `env`.
    ///
    /// If parsing fails, all syntax errors are returned and nothing is evaluated. Otherwise the
    /// first runtime error aborts evaluation and is returned on its own.
    pub fn evaluate(&self, source: &str, env: &mut Environment) -> Result<Value, Vec<Error>> {
        trace!("parsing {:?}", source);
        let (program, errors) = Parser::new(source).parse_program();
        if !errors.is_empty() {
            debug!("{} syntax error(s)", errors.len());
            return Err(errors.into_iter().map(Error::from).collect());
        }
        trace!("evaluating {}", program);

        let mut evaluator = Evaluator::with_config(&self.builtin_vars, self.config);
        match evaluator.eval_program(&program, env) {
            Ok(val) => Ok(val),
            Err(err) => {
                debug!("runtime error: {}", err);
                Err(vec![err.into()])
            }
        }
    }
}

/// Evaluates `source` with the default builtins. See [`Interpreter::evaluate`].
pub fn evaluate(source: &str, env: &mut Environment) -> Result<Value, Vec<Error>> {
    Interpreter::new().evaluate(source, env)
}
