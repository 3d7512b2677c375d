//! Tree-walking evaluator.

pub mod error;
pub mod eval;

pub use error::RuntimeError;
pub use eval::Evaluator;

/// Tunables for the [`Evaluator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    /// Maximum number of nested user function calls. Exceeding it raises
    /// [`RuntimeError::RecursionLimit`] instead of overflowing the stack.
    pub max_call_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_call_depth: 128,
        }
    }
}
